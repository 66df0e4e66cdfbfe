/// Leading-edge rate limiter.
///
/// The first fire in a quiet window passes immediately and starts the
/// window; anything else inside `wait_ms` of that fire is dropped outright,
/// never queued or coalesced into a trailing call. Callers supply the
/// clock as milliseconds on a monotonic timeline, so tests can move time
/// without sleeping.
#[derive(Debug, Clone)]
pub struct Throttle {
    wait_ms: u64,
    last_fired_ms: Option<u64>,
}

impl Throttle {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            last_fired_ms: None,
        }
    }

    /// Returns true when the caller may forward this event, recording
    /// `now_ms` as the start of the next quiet window.
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_fired_ms {
            if now_ms.saturating_sub(last) < self.wait_ms {
                return false;
            }
        }
        self.last_fired_ms = Some(now_ms);
        true
    }

    pub fn last_fired_ms(&self) -> Option<u64> {
        self.last_fired_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_fire_passes_immediately() {
        let mut throttle = Throttle::new(900_000);
        assert!(throttle.try_fire(0));
        assert_eq!(throttle.last_fired_ms(), Some(0));
    }

    #[test]
    fn repeat_fires_inside_window_are_dropped() {
        let mut throttle = Throttle::new(900_000);
        assert!(throttle.try_fire(1_000));
        assert!(!throttle.try_fire(1_001));
        assert!(!throttle.try_fire(899_999 + 1_000));
        // Dropped fires must not extend the window.
        assert_eq!(throttle.last_fired_ms(), Some(1_000));
    }

    #[test]
    fn fires_again_once_window_elapses() {
        let mut throttle = Throttle::new(900_000);
        assert!(throttle.try_fire(0));
        assert!(!throttle.try_fire(899_999));
        assert!(throttle.try_fire(900_000));
        assert_eq!(throttle.last_fired_ms(), Some(900_000));
    }
}
