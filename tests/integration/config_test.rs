//! Configuration loading tests

use std::path::PathBuf;

use rust_decimal_macros::dec;
use tempfile::TempDir;
use trade_journal::config::{Config, LogFormat};

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.ledger.path, PathBuf::from("./data/trades.csv"));
    assert_eq!(config.projection.range().unwrap().values().count(), 21);
    assert_eq!(config.limits.soft_allocation_pct, dec!(20));
    assert_eq!(config.telemetry.format, LogFormat::Pretty);
}

#[test]
fn test_config_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
            [ledger]
            path = "journal/trades.csv"

            [telemetry]
            format = "json"
        "#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.ledger.path, PathBuf::from("journal/trades.csv"));
    assert_eq!(config.telemetry.format, LogFormat::Json);
    assert_eq!(config.telemetry.log_level, "info");
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = Config::default();
    let rendered = toml::to_string_pretty(&config).unwrap();
    let parsed: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed.projection.r_step, config.projection.r_step);
    assert_eq!(parsed.session.snapshot_path, config.session.snapshot_path);
}
