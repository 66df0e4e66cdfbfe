use std::str::FromStr;

use clap::Parser;
use tiltstat_common::TiltColor;

/// Holds a fermentation at temperature by listening to a Tilt hydrometer
/// and switching a heater smart plug.
///
/// Every option can also be supplied through a `TT_`-prefixed environment
/// variable.
#[derive(Debug, Parser)]
#[command(name = "tiltstat", version, about)]
pub struct Args {
    /// Color of the Tilt beacon to follow.
    #[arg(long, env = "TT_COLOR", value_parser = TiltColor::from_str)]
    pub color: TiltColor,

    /// Target temperature in degrees Celsius.
    #[arg(long, env = "TT_TEMP")]
    pub temp: f64,

    /// Device identifier of the heater smart plug; commands go to
    /// cmnd/<device-id>/POWER.
    #[arg(long, env = "TT_DEVICE_ID")]
    pub device_id: String,

    /// MQTT broker host.
    #[arg(long, env = "TT_MQTT_HOST", default_value = "127.0.0.1")]
    pub mqtt_host: String,

    /// MQTT broker port.
    #[arg(long, env = "TT_MQTT_PORT", default_value_t = 1883)]
    pub mqtt_port: u16,

    /// MQTT username; anonymous when unset.
    #[arg(long, env = "TT_MQTT_USER")]
    pub mqtt_user: Option<String>,

    /// MQTT password.
    #[arg(long, env = "TT_MQTT_PASS", hide_env_values = true)]
    pub mqtt_pass: Option<String>,
}
