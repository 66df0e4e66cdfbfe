use crate::{
    config::{ControlSettings, ControllerConfig},
    filter::RollingAverage,
    throttle::Throttle,
    types::Intent,
    units::fahrenheit_to_celsius,
};

/// Outcome of feeding one beacon reading through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub temp_c: f64,
    pub average_c: f64,
    /// Switch command to forward, if one survived the dead band and the
    /// throttle. `None` on most readings.
    pub command: Option<Intent>,
}

/// Compares a smoothed temperature against the target band.
///
/// Strict inequalities on both sides: a reading sitting exactly on
/// `target ± deviation` is inside the dead band and produces no intent.
pub fn decide(settings: &ControlSettings, average_c: f64) -> Option<Intent> {
    if average_c < settings.target_temp_c - settings.deviation_c {
        Some(Intent::HeatOn)
    } else if average_c > settings.target_temp_c + settings.deviation_c {
        Some(Intent::HeatOff)
    } else {
        None
    }
}

/// The control core: convert → smooth → decide → throttle.
///
/// Owns all process-scoped mutable control state (the rolling window and
/// one throttle per intent kind) as plain fields, initialized empty at
/// construction. The engine never touches a clock or performs I/O; callers
/// pass `now_ms` on a monotonic timeline and execute whatever command an
/// evaluation carries.
#[derive(Debug, Clone)]
pub struct ThermostatEngine {
    settings: ControlSettings,
    window: RollingAverage,
    heat_on_gate: Throttle,
    heat_off_gate: Throttle,
}

impl ThermostatEngine {
    pub fn new(config: ControllerConfig, mut settings: ControlSettings) -> Self {
        settings.sanitize();
        Self {
            settings,
            window: RollingAverage::new(config.window_size),
            heat_on_gate: Throttle::new(config.throttle_wait_ms),
            heat_off_gate: Throttle::new(config.throttle_wait_ms),
        }
    }

    pub fn settings(&self) -> &ControlSettings {
        &self.settings
    }

    /// Feeds one raw Fahrenheit reading, as broadcast by the beacon.
    pub fn observe_fahrenheit(&mut self, temp_f: f64, now_ms: u64) -> Evaluation {
        self.observe_celsius(fahrenheit_to_celsius(temp_f), now_ms)
    }

    /// Runs one full pipeline pass over an already-converted reading.
    ///
    /// An emitted command consumes its intent's throttle window at this
    /// point, whether or not the downstream switch call later succeeds; a
    /// broker outage can therefore eat a full window before the next
    /// command goes out.
    pub fn observe_celsius(&mut self, temp_c: f64, now_ms: u64) -> Evaluation {
        let average_c = self.window.observe(temp_c);

        let mut command = decide(&self.settings, average_c);
        if let Some(intent) = command {
            if !self.gate_mut(intent).try_fire(now_ms) {
                command = None;
            }
        }

        Evaluation {
            temp_c,
            average_c,
            command,
        }
    }

    pub fn last_fired_ms(&self, intent: Intent) -> Option<u64> {
        match intent {
            Intent::HeatOn => self.heat_on_gate.last_fired_ms(),
            Intent::HeatOff => self.heat_off_gate.last_fired_ms(),
        }
    }

    fn gate_mut(&mut self, intent: Intent) -> &mut Throttle {
        match intent {
            Intent::HeatOn => &mut self.heat_on_gate,
            Intent::HeatOff => &mut self.heat_off_gate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn engine(target_temp_c: f64) -> ThermostatEngine {
        ThermostatEngine::new(
            ControllerConfig::default(),
            ControlSettings {
                target_temp_c,
                deviation_c: 0.5,
            },
        )
    }

    #[test]
    fn dead_band_uses_strict_inequalities() {
        let settings = ControlSettings {
            target_temp_c: 70.0,
            deviation_c: 0.5,
        };

        assert_eq!(decide(&settings, 69.4), Some(Intent::HeatOn));
        assert_eq!(decide(&settings, 69.5), None);
        assert_eq!(decide(&settings, 70.0), None);
        assert_eq!(decide(&settings, 70.5), None);
        assert_eq!(decide(&settings, 70.6), Some(Intent::HeatOff));
    }

    #[test]
    fn first_reading_drives_a_command_through() {
        let mut engine = engine(20.0);

        let eval = engine.observe_celsius(10.0, 0);

        // Warm-up: a single reading is its own average.
        assert_eq!(eval.average_c, 10.0);
        assert_eq!(eval.command, Some(Intent::HeatOn));
    }

    #[test]
    fn repeated_intent_is_suppressed_within_the_window() {
        let mut engine = engine(20.0);

        assert_eq!(engine.observe_celsius(10.0, 0).command, Some(Intent::HeatOn));
        assert_eq!(engine.observe_celsius(10.0, 5_000).command, None);
        assert_eq!(engine.observe_celsius(10.0, 899_999).command, None);
    }

    #[test]
    fn intent_fires_again_after_the_window_elapses() {
        let mut engine = engine(20.0);

        assert_eq!(engine.observe_celsius(10.0, 0).command, Some(Intent::HeatOn));
        assert_eq!(
            engine.observe_celsius(10.0, 900_000).command,
            Some(Intent::HeatOn)
        );
    }

    #[test]
    fn on_and_off_gates_are_independent() {
        let mut engine = engine(20.0);

        assert_eq!(engine.observe_celsius(10.0, 0).command, Some(Intent::HeatOn));
        // One hot reading drags the two-reading average above the band.
        assert_eq!(
            engine.observe_celsius(40.0, 1_000).command,
            Some(Intent::HeatOff)
        );
    }

    #[test]
    fn command_consumes_window_even_if_transport_fails() {
        let mut engine = engine(20.0);

        let eval = engine.observe_celsius(10.0, 2_000);
        assert_eq!(eval.command, Some(Intent::HeatOn));

        // The caller's publish failing changes nothing here: the window
        // started when the command was emitted.
        assert_eq!(engine.last_fired_ms(Intent::HeatOn), Some(2_000));
        assert_eq!(engine.observe_celsius(10.0, 10_000).command, None);
    }

    #[test]
    fn cold_tilt_stream_forwards_exactly_one_on_command() {
        let mut engine = engine(70.0);
        let mut forwarded = Vec::new();

        // Twenty broadcasts at 60°F (~15.6°C) against a 70°C target.
        for i in 0..20u64 {
            let eval = engine.observe_fahrenheit(60.0, i * 1_000);
            forwarded.extend(eval.command);
        }
        assert_eq!(forwarded, vec![Intent::HeatOn]);

        // A 21st reading at 80°F lifts the average but stays far below
        // the 69.5°C threshold; the throttle swallows the repeat intent.
        let eval = engine.observe_fahrenheit(80.0, 21_000);
        assert!(eval.average_c < 69.5);
        assert_eq!(eval.command, None);
    }
}
