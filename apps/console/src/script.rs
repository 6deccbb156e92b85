use std::time::Duration;

use anyhow::{Context, Result};
use control_core::{ControlSession, SessionError};
use serde::Deserialize;
use shared::{
    domain::{Point2D, RotationMatrix},
    protocol::ControlRequest,
};
use tracing::{debug, warn};

use crate::devices::ScriptedSensor;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Control(ControlRequest),
    Host(HostStep),
}

/// Steps that drive the simulated hardware rather than the UI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum HostStep {
    Tilt { x: f64, y: f64 },
    Attitude { matrix: RotationMatrix },
    SensorLost,
    Wait { ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberedStep {
    pub line: usize,
    pub step: ScriptStep,
}

/// Parses JSON lines, skipping blanks and `#` comments.
pub fn parse_script(raw: &str) -> Result<Vec<NumberedStep>> {
    raw.lines()
        .enumerate()
        .map(|(index, text)| (index + 1, text.trim()))
        .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'))
        .map(|(line, text)| {
            let step = serde_json::from_str::<ScriptStep>(text)
                .with_context(|| format!("script line {line}: unrecognised step '{text}'"))?;
            Ok(NumberedStep { line, step })
        })
        .collect()
}

pub async fn run_script(
    steps: &[NumberedStep],
    session: &ControlSession,
    sensor: &ScriptedSensor,
) -> Result<()> {
    for NumberedStep { line, step } in steps {
        debug!(line, ?step, "script: step");
        match step {
            ScriptStep::Control(request) => match session.apply(request.clone()).await {
                Ok(()) => {}
                Err(SessionError::Sensor(err)) => {
                    warn!("script line {line}: motion control unavailable: {err}");
                }
                Err(err) => return Err(err).with_context(|| format!("script line {line}")),
            },
            ScriptStep::Host(HostStep::Tilt { x, y }) => sensor.set_tilt(Point2D::new(*x, *y)),
            ScriptStep::Host(HostStep::Attitude { matrix }) => sensor.set_tilt(matrix.tilt()),
            ScriptStep::Host(HostStep::SensorLost) => sensor.lose(),
            ScriptStep::Host(HostStep::Wait { ms }) => {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
