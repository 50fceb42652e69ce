//! CLI interface for trade-journal
//!
//! Provides subcommands for:
//! - `preview`: Size a prospective trade and project its reward curve
//! - `log`: Append a trade to the ledger
//! - `update`: Amend fields of a logged trade
//! - `close`: Record a trade's exit and outcome
//! - `list`: Show logged trades
//! - `session`: Show/edit balance and risk settings
//! - `labels`: Show journal label lists
//! - `config`: Show configuration

mod close;
mod list;
mod log;
mod preview;
mod session;
mod update;

pub use close::CloseArgs;
pub use list::ListArgs;
pub use log::LogArgs;
pub use preview::PreviewArgs;
pub use session::SessionArgs;
pub use update::UpdateArgs;

use chrono::NaiveTime;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::journal::Journal;
use crate::ledger::Ledger;
use crate::session::{SessionConfig, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "trade-journal")]
#[command(about = "Risk-bounded position sizing and a durable trade journal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Size a prospective trade and project its reward curve
    Preview(PreviewArgs),
    /// Append a trade to the ledger
    Log(LogArgs),
    /// Amend fields of a logged trade
    Update(UpdateArgs),
    /// Record a trade's exit and outcome
    Close(CloseArgs),
    /// Show logged trades
    List(ListArgs),
    /// Show/edit balance and risk settings
    Session(SessionArgs),
    /// Show journal label lists
    Labels,
    /// Show configuration
    Config,
}

/// Shared state for command execution
pub struct Context {
    pub config: Config,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn journal(&self) -> Journal {
        Journal::new(
            Ledger::new(self.config.ledger.path.clone()),
            self.config.limits.soft_allocation_pct,
        )
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(self.config.session.snapshot_path.clone())
    }

    pub fn session(&self) -> anyhow::Result<SessionConfig> {
        Ok(self.session_store().load()?)
    }
}

/// Parse `HH:MM` or `HH:MM:SS`
pub(crate) fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| format!("invalid time '{}', expected HH:MM", s))
}

/// Parse `KEY=VALUE`
pub(crate) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
