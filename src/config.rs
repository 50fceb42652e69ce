//! Configuration types for trade-journal

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::risk::{ProjectionError, RRange};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub session: SessionStoreConfig,
    #[serde(default)]
    pub labels: LabelsConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Trade ledger location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("./data/trades.csv")
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

/// Session snapshot location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStoreConfig {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("./data/snapshot.json")
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

/// Label lists location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    #[serde(default = "default_labels_path")]
    pub path: PathBuf,
}

fn default_labels_path() -> PathBuf {
    PathBuf::from("./config/labels.json")
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            path: default_labels_path(),
        }
    }
}

/// R-multiple projection range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Lowest reward multiple
    #[serde(default = "default_r_min")]
    pub r_min: Decimal,

    /// Highest reward multiple (inclusive)
    #[serde(default = "default_r_max")]
    pub r_max: Decimal,

    /// Step between multiples; 0.01 gives a smooth curve
    #[serde(default = "default_r_step")]
    pub r_step: Decimal,
}

fn default_r_min() -> Decimal {
    dec!(1.0)
}
fn default_r_max() -> Decimal {
    dec!(5.0)
}
fn default_r_step() -> Decimal {
    dec!(0.2)
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            r_min: default_r_min(),
            r_max: default_r_max(),
            r_step: default_r_step(),
        }
    }
}

impl ProjectionConfig {
    pub fn range(&self) -> Result<RRange, ProjectionError> {
        RRange::new(self.r_min, self.r_max, self.r_step)
    }
}

/// Soft limits that warn rather than block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Allocation percent above which a trade is flagged
    #[serde(default = "default_soft_allocation_pct")]
    pub soft_allocation_pct: Decimal,
}

fn default_soft_allocation_pct() -> Decimal {
    dec!(20)
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            soft_allocation_pct: default_soft_allocation_pct(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
