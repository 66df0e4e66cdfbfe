use serde::{Deserialize, Serialize};

/// Fixed operating constants of the control loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Readings retained by the rolling average window.
    pub window_size: usize,
    /// Minimum interval between repeated switch commands of the same kind.
    pub throttle_wait_ms: u64,
    /// Readings outside these bounds are dropped by the decoder.
    pub min_valid_temp_f: f64,
    pub max_valid_temp_f: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            window_size: 20,
            throttle_wait_ms: 15 * 60 * 1_000,
            min_valid_temp_f: -40.0,
            max_valid_temp_f: 150.0,
        }
    }
}

/// Target band the controller holds the smoothed temperature inside.
/// Supplied once at startup and immutable for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlSettings {
    pub target_temp_c: f64,
    pub deviation_c: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            target_temp_c: 20.0,
            deviation_c: 0.5,
        }
    }
}

impl ControlSettings {
    pub fn sanitize(&mut self) {
        if !self.target_temp_c.is_finite() {
            self.target_temp_c = 20.0;
        }
        self.target_temp_c = self.target_temp_c.clamp(0.0, 100.0);

        if !self.deviation_c.is_finite() {
            self.deviation_c = 0.5;
        }
        self.deviation_c = self.deviation_c.clamp(0.1, 5.0);
    }
}
