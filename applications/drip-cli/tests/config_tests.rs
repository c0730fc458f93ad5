/// Configuration loading tests
/// Tests defaults, config files, and DRIP_ environment overrides
use drip_cli::config::{environment, DripConfig};
use drip_cli::CliError;
use std::io::Write;

fn env(vars: &[(&str, &str)]) -> config::Environment {
    let mut map = config::Map::new();
    for (key, value) in vars {
        map.insert((*key).to_string(), (*value).to_string());
    }
    environment().source(Some(map))
}

/// Test that an empty environment yields the defaults
#[test]
fn test_defaults_without_sources() {
    let config = DripConfig::load_with_env(None, env(&[])).unwrap();

    assert_eq!(config, DripConfig::default());
    assert_eq!(config.schedule.group_gap_days, 1);
    assert_eq!(config.schedule.default_import_interval_days, 1);
    assert_eq!(config.schedule.live_session_minutes, 60);
    assert_eq!(config.logging.filter, "drip=info,drip_sync=info");
}

/// Test values from a config file, with unset keys keeping their defaults
#[test]
fn test_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[schedule]\ngroup_gap_days = 0\nlive_session_minutes = 90\n\n[logging]\nfilter = \"drip=debug\""
    )
    .unwrap();

    let config = DripConfig::load_with_env(Some(file.path()), env(&[])).unwrap();

    assert_eq!(config.schedule.group_gap_days, 0);
    assert_eq!(config.schedule.live_session_minutes, 90);
    assert_eq!(config.schedule.default_import_interval_days, 1);
    assert_eq!(config.logging.filter, "drip=debug");
}

/// Test that DRIP_ environment variables override the file
#[test]
fn test_environment_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[schedule]\ngroup_gap_days = 0").unwrap();

    let config = DripConfig::load_with_env(
        Some(file.path()),
        env(&[
            ("DRIP_SCHEDULE__GROUP_GAP_DAYS", "3"),
            ("DRIP_SCHEDULE__DEFAULT_IMPORT_INTERVAL_DAYS", "7"),
            ("DRIP_LOGGING__FILTER", "drip_sync=trace"),
        ]),
    )
    .unwrap();

    assert_eq!(config.schedule.group_gap_days, 3);
    assert_eq!(config.schedule.default_import_interval_days, 7);
    assert_eq!(config.logging.filter, "drip_sync=trace");
}

/// Test that an explicit config path must exist
#[test]
fn test_missing_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = DripConfig::load_with_env(Some(&missing), env(&[])).unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}

/// Test that validation rejects a zero-length live session
#[test]
fn test_validation_from_environment() {
    let config =
        DripConfig::load_with_env(None, env(&[("DRIP_SCHEDULE__LIVE_SESSION_MINUTES", "0")]))
            .unwrap();

    assert!(matches!(config.validate(), Err(CliError::Config(_))));
}
