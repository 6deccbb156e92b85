use super::*;
use std::collections::HashMap;

fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings(&dir.path().join("absent.toml"));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.session_config().tick_interval, Duration::from_millis(500));
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tiltpad.toml");
    fs::write(
        &path,
        "tick_interval_ms = 250\nheading_policy = \"pass_through\"\ncontrol_diameter = 200.0\n",
    )
    .expect("write config");

    let settings = load_settings(&path);
    assert_eq!(settings.tick_interval_ms, 250);
    assert_eq!(settings.heading_policy, HeadingPolicy::PassThrough);
    assert_eq!(settings.control_diameter, 200.0);
    assert_eq!(settings.knob_diameter, 65.0);

    let geometry = settings.session_config().geometry;
    assert_eq!(geometry.track_radius(), 100.0);
}

#[test]
fn malformed_file_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tiltpad.toml");
    fs::write(&path, "tick_interval_ms = \"soon\"").expect("write config");

    let settings = load_settings(&path);
    assert_eq!(settings.tick_interval_ms, Settings::default().tick_interval_ms);
}

#[test]
fn env_overrides_apply_and_skip_garbage() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        overrides(&[
            ("APP__TICK_INTERVAL_MS", "100"),
            ("APP__CHANGE_THRESHOLD", "not-a-number"),
            ("APP__SPEED_SCALE", "1.0"),
            ("APP__HEADING_POLICY", " PassThrough "),
        ]),
    );

    assert_eq!(settings.tick_interval_ms, 100);
    assert_eq!(settings.change_threshold, 0.1);
    assert_eq!(settings.speed_scale, 1.0);
    assert_eq!(settings.heading_policy, HeadingPolicy::PassThrough);
    assert_eq!(settings.command_mapper().speed_scale(), 1.0);
}

#[test]
fn unknown_heading_policy_keeps_current() {
    assert_eq!(parse_heading_policy("wrap"), Some(HeadingPolicy::Wrap));
    assert_eq!(parse_heading_policy("modulo"), None);
}
