use std::collections::VecDeque;

/// Rolling arithmetic mean over the most recent readings.
///
/// The window is FIFO-bounded: once full, each new reading evicts the
/// oldest one, so memory stays constant over arbitrarily long uptime.
/// Until the window fills, the mean is taken over however many readings
/// have arrived; callers are expected to tolerate that warm-up period.
#[derive(Debug, Clone)]
pub struct RollingAverage {
    readings: VecDeque<f64>,
    capacity: usize,
}

impl RollingAverage {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a reading and returns the mean of the retained window.
    pub fn observe(&mut self, reading: f64) -> f64 {
        self.readings.push_back(reading);
        while self.readings.len() > self.capacity {
            self.readings.pop_front();
        }

        let sum: f64 = self.readings.iter().sum();
        sum / self.readings.len() as f64
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
