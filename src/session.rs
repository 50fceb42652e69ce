//! Session settings and their persisted snapshot
//!
//! The calculators never read this state themselves; callers pass a
//! [`SessionConfig`] into each call.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::risk::RiskLimits;

/// Errors from snapshot persistence
#[derive(Error, Debug)]
pub enum SessionError {
    /// IO error reading/writing the snapshot
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Account and risk settings for a journaling session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Account balance
    #[serde(default)]
    pub balance: Decimal,
    /// Risk per trade, percent of balance
    #[serde(default = "default_risk_percent")]
    pub risk_percent: Decimal,
    /// Ceiling on money at risk across open trades, percent of balance
    #[serde(default = "default_max_open_risk")]
    pub max_open_risk: Decimal,
    /// Ceiling on capital committed across open trades, percent of balance
    #[serde(default = "default_max_exposure", alias = "max_exposure_pct")]
    pub max_exposure: Decimal,
}

fn default_risk_percent() -> Decimal {
    dec!(1.0)
}
fn default_max_open_risk() -> Decimal {
    dec!(3.0)
}
fn default_max_exposure() -> Decimal {
    dec!(50.0)
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            balance: Decimal::ZERO,
            risk_percent: default_risk_percent(),
            max_open_risk: default_max_open_risk(),
            max_exposure: default_max_exposure(),
        }
    }
}

impl SessionConfig {
    /// Money risked per trade
    pub fn monetary_risk(&self) -> Decimal {
        self.risk_percent / Decimal::ONE_HUNDRED * self.balance
    }

    /// Capital cap for a trade allocating `contribution_pct` of the balance
    pub fn max_capital(&self, contribution_pct: Decimal) -> Decimal {
        contribution_pct / Decimal::ONE_HUNDRED * self.balance
    }

    /// Risk limits derived from this session
    pub fn limits(&self, soft_allocation_pct: Decimal) -> RiskLimits {
        RiskLimits {
            max_exposure_pct: self.max_exposure,
            max_open_risk_pct: self.max_open_risk,
            soft_allocation_pct,
        }
    }
}

/// Loads and saves the session snapshot
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot, falling back to defaults when none exists
    pub fn load(&self) -> Result<SessionConfig, SessionError> {
        if !self.path.exists() {
            tracing::info!(
                path = %self.path.display(),
                "No session snapshot found, using defaults"
            );
            return Ok(SessionConfig::default());
        }

        let file = File::open(&self.path)?;
        let session: SessionConfig = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %self.path.display(), balance = %session.balance, "Loaded session snapshot");
        Ok(session)
    }

    /// Replace the snapshot atomically
    pub fn save(&self, session: &SessionConfig) -> Result<(), SessionError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, session)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), "Saved session snapshot");
        Ok(())
    }
}
