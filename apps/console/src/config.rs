use std::{fs, path::Path, time::Duration};

use control_core::{CommandMapper, ControlGeometry, HeadingPolicy, SessionConfig};
use serde::Deserialize;
use shared::domain::Point2D;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tick_interval_ms: u64,
    pub change_threshold: f64,
    pub speed_scale: f64,
    pub heading_policy: HeadingPolicy,
    pub control_center_x: f64,
    pub control_center_y: f64,
    pub control_diameter: f64,
    pub knob_diameter: f64,
    pub event_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 500,
            change_threshold: 0.1,
            speed_scale: 0.5,
            heading_policy: HeadingPolicy::Wrap,
            control_center_x: 180.0,
            control_center_y: 180.0,
            control_diameter: 300.0,
            knob_diameter: 65.0,
            event_capacity: 64,
        }
    }
}

impl Settings {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            geometry: ControlGeometry::new(
                Point2D::new(self.control_center_x, self.control_center_y),
                self.control_diameter,
                self.knob_diameter,
            ),
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            change_threshold: self.change_threshold,
            event_capacity: self.event_capacity,
            ..SessionConfig::default()
        }
    }

    pub fn command_mapper(&self) -> CommandMapper {
        CommandMapper::new(self.speed_scale, self.heading_policy)
    }
}

/// Defaults, then the TOML file at `path` if present, then `APP__*`
/// environment overrides.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<Settings>(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("config: ignoring malformed '{}': {err}", path.display());
                Settings::default()
            }
        },
        Err(_) => {
            debug!("config: no file at '{}', using defaults", path.display());
            Settings::default()
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__TICK_INTERVAL_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.tick_interval_ms = parsed;
        }
    }
    if let Some(v) = lookup("APP__CHANGE_THRESHOLD") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.change_threshold = parsed;
        }
    }
    if let Some(v) = lookup("APP__SPEED_SCALE") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.speed_scale = parsed;
        }
    }
    if let Some(v) = lookup("APP__HEADING_POLICY") {
        if let Some(policy) = parse_heading_policy(&v) {
            settings.heading_policy = policy;
        }
    }
}

fn parse_heading_policy(raw: &str) -> Option<HeadingPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "wrap" => Some(HeadingPolicy::Wrap),
        "pass_through" | "passthrough" => Some(HeadingPolicy::PassThrough),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
