use std::process::Stdio;

use anyhow::Context;
use serde::Deserialize;
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines},
    process::{Child, ChildStdout, Command},
};

use tiltstat_common::ControllerConfig;

/// The external BLE decoder; prints one JSON frame per line on stdout.
pub const SCANNER_PROGRAM: &str = "python3";
pub const SCANNER_ARGS: [&str; 4] = ["-u", "-m", "aioblescan", "-T"];

/// Lines longer than this are dropped without parsing.
const MAX_FRAME_BYTES: usize = 512;

/// One decoded Tilt broadcast.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TiltFrame {
    pub uuid: String,
    /// Temperature in whole degrees Fahrenheit (iBeacon major field).
    pub major: f64,
    /// Specific gravity ×1000 (iBeacon minor field); logged and published,
    /// never used for control.
    pub minor: f64,
}

/// Noise the decode path drops without touching control state.
///
/// A well-formed frame from a different beacon is not an error; see
/// [`decode_frame`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("frame exceeds {MAX_FRAME_BYTES} bytes ({0})")]
    Oversized(usize),
    #[error("frame is not a tilt broadcast: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("implausible temperature reading {0}°F")]
    ImplausibleReading(f64),
}

/// Decodes one scanner line.
///
/// Returns `Ok(None)` for a well-formed frame whose uuid is not the
/// configured beacon. Non-finite or implausible temperatures are rejected
/// here so the rolling window never sees them.
pub fn decode_frame(
    line: &str,
    beacon_id: &str,
    config: &ControllerConfig,
) -> Result<Option<TiltFrame>, DecodeError> {
    if line.len() > MAX_FRAME_BYTES {
        return Err(DecodeError::Oversized(line.len()));
    }

    let frame: TiltFrame = serde_json::from_str(line)?;
    if !frame.uuid.eq_ignore_ascii_case(beacon_id) {
        return Ok(None);
    }

    if !frame.major.is_finite()
        || frame.major < config.min_valid_temp_f
        || frame.major > config.max_valid_temp_f
    {
        return Err(DecodeError::ImplausibleReading(frame.major));
    }

    Ok(Some(frame))
}

/// Owns the scanner subprocess and its line-buffered stdout.
pub struct BeaconScanner {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

impl BeaconScanner {
    /// Spawns the scanner with stdout piped; the child is killed when the
    /// scanner is dropped.
    pub fn spawn() -> anyhow::Result<Self> {
        let mut child = Command::new(SCANNER_PROGRAM)
            .args(SCANNER_ARGS)
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .context("failed to spawn the aioblescan scanner process")?;

        let stdout = child
            .stdout
            .take()
            .context("scanner process has no stdout handle")?;

        Ok(Self {
            child,
            lines: BufReader::new(stdout).lines(),
        })
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Next raw line from the scanner; `None` once its stdout closes.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.lines.next_line().await
    }
}
