//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_defaults_apply_to_empty_document() {
    let settings = Settings::from_toml_str("").expect("empty config is valid");

    tracing::debug!(?settings, "Loaded default settings");

    assert_eq!(settings.rotation.horizon_weeks, DEFAULT_HORIZON_WEEKS);
    assert_eq!(settings.logging.level, "info");
    assert!(settings.calendar.display_timezone.is_none());
    assert!(settings.calendar.color_seed.is_none());
    assert!(settings.timezones.allowed.is_none());
}

#[test]
fn test_toml_overrides_defaults() {
    let settings = Settings::from_toml_str(
        r#"
        [rotation]
        horizon_weeks = 4

        [calendar]
        display_timezone = "Africa/Nairobi"
        color_seed = 7

        [timezones]
        allowed = ["Africa/Nairobi", "Asia/Tokyo"]

        [logging]
        level = "debug"
        "#,
    )
    .expect("valid config");

    assert_eq!(settings.rotation.horizon_weeks, 4);
    assert_eq!(
        settings.calendar.display_timezone.as_deref(),
        Some("Africa/Nairobi")
    );
    assert_eq!(settings.calendar.color_seed, Some(7));
    assert_eq!(
        settings.timezones.allowed,
        Some(vec!["Africa/Nairobi".to_string(), "Asia/Tokyo".to_string()])
    );
    assert_eq!(settings.logging.level, "debug");
}

#[test]
fn test_invalid_horizon_type_is_rejected() {
    let result = Settings::from_toml_str(
        r#"
        [rotation]
        horizon_weeks = "forever"
        "#,
    );

    assert!(result.is_err());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = Settings::load_with_file(Some(Path::new("does/not/exist.toml")));
    assert!(result.is_err());
}
