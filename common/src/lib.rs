pub mod beacon;
pub mod config;
pub mod filter;
pub mod thermostat;
pub mod throttle;
pub mod types;
pub mod units;

pub use beacon::{TiltColor, UnknownColorError};
pub use config::{ControlSettings, ControllerConfig};
pub use filter::RollingAverage;
pub use thermostat::{decide, Evaluation, ThermostatEngine};
pub use throttle::Throttle;
pub use types::{Intent, StatePayload};
pub use units::fahrenheit_to_celsius;
