//! Trade identifiers
//!
//! `DDMMYYYY-HHMM-NNNNN`: entry date, entry time without separators, and the
//! 1-based position of the trade among all trades logged on that date.

use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// Identifier of a logged trade
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TradeId(String);

impl TradeId {
    pub fn new(date: NaiveDate, time: NaiveTime, sequence: usize) -> Self {
        Self(format!(
            "{}-{}-{:05}",
            date.format("%d%m%Y"),
            time.format("%H%M"),
            sequence
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Same-date sequence number, if the id is well-formed
    pub fn sequence(&self) -> Option<usize> {
        self.0.rsplit('-').next()?.parse().ok()
    }

    /// Entry date encoded in the id, if well-formed
    pub fn date(&self) -> Option<NaiveDate> {
        let date = self.0.split('-').next()?;
        NaiveDate::parse_from_str(date, "%d%m%Y").ok()
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TradeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<TradeId> for String {
    fn from(id: TradeId) -> Self {
        id.0
    }
}
