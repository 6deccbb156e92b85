use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use control_core::{spawn_actuator_bridge, ControlSession};
use tracing::info;

mod config;
mod devices;
mod script;

use config::load_settings;
use devices::{ScriptedSensor, StdoutActuator};
use script::{parse_script, run_script};

/// Replays a JSON-lines input script through a control session and prints
/// the resulting actuator calls.
#[derive(Parser, Debug)]
struct Args {
    script: PathBuf,
    #[arg(long, default_value = "tiltpad.toml")]
    config: PathBuf,
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(&args.config);
    let raw = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script '{}'", args.script.display()))?;
    let steps = parse_script(&raw)?;
    info!(steps = steps.len(), "console: loaded script");

    let sensor = Arc::new(ScriptedSensor::new());
    let session = ControlSession::spawn(settings.session_config(), sensor.clone());
    let bridge = spawn_actuator_bridge(
        session.subscribe(),
        session.latest_vector(),
        Arc::new(StdoutActuator),
        settings.command_mapper(),
    );

    let outcome = run_script(&steps, &session, &sensor).await;

    session.shutdown().await;
    bridge.await.context("actuator bridge panicked")?;
    outcome
}
