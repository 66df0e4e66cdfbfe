mod actuator;
mod cli;
mod scanner;

use std::{
    sync::OnceLock,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use rumqttc::{AsyncClient, Event, Incoming, MqttOptions, QoS};
use tracing::{debug, info, warn};

use tiltstat_common::{ControlSettings, ControllerConfig, StatePayload, ThermostatEngine};

use crate::{actuator::HeatSwitch, cli::Args, scanner::BeaconScanner};

const TOPIC_STATUS: &str = "tiltstat/status";
const TOPIC_STATE: &str = "tiltstat/state";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    run(Args::parse()).await
}

async fn run(args: Args) -> anyhow::Result<()> {
    let beacon_id = args.color.beacon_id();
    info!("looking for {} tilt beacon {beacon_id}", args.color);

    let config = ControllerConfig::default();
    let engine = ThermostatEngine::new(
        config.clone(),
        ControlSettings {
            target_temp_c: args.temp,
            ..ControlSettings::default()
        },
    );

    let mut mqtt_options =
        MqttOptions::new("tiltstat-controller", args.mqtt_host.clone(), args.mqtt_port);
    if let Some(user) = args.mqtt_user.clone() {
        mqtt_options.set_credentials(user, args.mqtt_pass.clone().unwrap_or_default());
    }
    let (mqtt, eventloop) = AsyncClient::new(mqtt_options, 64);
    spawn_mqtt_loop(eventloop);

    mqtt.publish(TOPIC_STATUS, QoS::AtLeastOnce, true, "online")
        .await
        .context("failed to publish controller online status")?;

    let mut scanner = BeaconScanner::spawn()?;
    if let Some(pid) = scanner.pid() {
        info!("scanner process started (pid {pid})");
    }

    let mut controller = Controller {
        config,
        beacon_id,
        switch: HeatSwitch::new(mqtt.clone(), &args.device_id),
        mqtt,
        engine,
        decode_failures: 0,
    };

    loop {
        tokio::select! {
            line = scanner.next_line() => {
                match line.context("failed to read from scanner stdout")? {
                    Some(line) => controller.handle_line(&line),
                    None => anyhow::bail!("scanner process closed its stdout"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

struct Controller {
    config: ControllerConfig,
    beacon_id: &'static str,
    engine: ThermostatEngine,
    switch: HeatSwitch,
    mqtt: AsyncClient,
    decode_failures: u64,
}

impl Controller {
    /// One scanner line, processed to completion before the next is read.
    fn handle_line(&mut self, line: &str) {
        let frame = match scanner::decode_frame(line, self.beacon_id, &self.config) {
            Ok(Some(frame)) => frame,
            // Someone else's beacon; not even worth counting.
            Ok(None) => return,
            Err(err) => {
                self.decode_failures += 1;
                debug!("dropped frame #{}: {err}", self.decode_failures);
                return;
            }
        };

        let evaluation = self.engine.observe_fahrenheit(frame.major, monotonic_ms());
        let target_c = self.engine.settings().target_temp_c;
        info!(
            "temp {:.2}°C, rolling avg {:.2}°C, target {target_c:.1}°C",
            evaluation.temp_c, evaluation.average_c,
        );

        if let Some(intent) = evaluation.command {
            info!("heat {}", intent.switch_payload());
            self.switch.send(intent);
        }

        self.publish_state(&StatePayload {
            temp: evaluation.temp_c,
            average: evaluation.average_c,
            target: target_c,
            gravity: frame.minor,
        });
    }

    // Best effort; the control loop never blocks on the broker.
    fn publish_state(&self, payload: &StatePayload) {
        match serde_json::to_vec(payload) {
            Ok(body) => {
                if let Err(err) = self.mqtt.try_publish(TOPIC_STATE, QoS::AtMostOnce, true, body) {
                    debug!("state publish dropped: {err}");
                }
            }
            Err(err) => warn!("state serialization failed: {err}"),
        }
    }
}

fn spawn_mqtt_loop(mut eventloop: rumqttc::EventLoop) {
    tokio::spawn(async move {
        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Incoming::ConnAck(_))) => info!("mqtt connected"),
                Ok(_) => {}
                Err(err) => {
                    warn!("mqtt poll error: {err}");
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        }
    });
}

fn monotonic_ms() -> u64 {
    static START: OnceLock<Instant> = OnceLock::new();
    START
        .get_or_init(Instant::now)
        .elapsed()
        .as_millis()
        .try_into()
        .unwrap_or(u64::MAX)
}
