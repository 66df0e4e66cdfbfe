use serde::{Deserialize, Serialize};

/// Directional control decision: what the heater should be told to do.
///
/// Intents carry no payload beyond the tag. The decision logic re-emits
/// the same intent on every out-of-band reading; deduplication is the
/// throttle's job, not the decider's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    HeatOn,
    HeatOff,
}

impl Intent {
    /// The wire word the smart switch expects.
    pub fn switch_payload(self) -> &'static str {
        match self {
            Self::HeatOn => "on",
            Self::HeatOff => "off",
        }
    }
}

/// Snapshot published after each evaluated reading.
#[derive(Debug, Clone, Serialize)]
pub struct StatePayload {
    pub temp: f64,
    pub average: f64,
    pub target: f64,
    pub gravity: f64,
}
