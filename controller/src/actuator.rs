use rumqttc::{AsyncClient, QoS};
use tracing::warn;

use tiltstat_common::Intent;

/// Fire-and-forget gateway to the heater smart plug.
///
/// Commands ride the broker's `cmnd/<device>/POWER` convention. The control
/// loop never waits on delivery: a failed hand-off is logged and dropped,
/// not retried, and the intent's throttle window stays consumed either way.
pub struct HeatSwitch {
    mqtt: AsyncClient,
    topic: String,
}

impl HeatSwitch {
    pub fn new(mqtt: AsyncClient, device_id: &str) -> Self {
        Self {
            mqtt,
            topic: format!("cmnd/{device_id}/POWER"),
        }
    }

    pub fn send(&self, intent: Intent) {
        if let Err(err) =
            self.mqtt
                .try_publish(&self.topic, QoS::AtLeastOnce, false, intent.switch_payload())
        {
            warn!("heater switch command dropped: {err}");
        }
    }
}
