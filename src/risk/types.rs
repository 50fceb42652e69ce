//! Risk management types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Risk limit errors
#[derive(Debug, Error, PartialEq)]
pub enum RiskError {
    /// Projected exposure would exceed the session limit
    #[error("Maximum exposure reached: projected {projected} exceeds limit {limit}")]
    MaxExposureReached { projected: Decimal, limit: Decimal },
    /// Projected open risk would exceed the session limit
    #[error("Maximum open risk reached: projected {projected} exceeds limit {limit}")]
    MaxOpenRiskReached { projected: Decimal, limit: Decimal },
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Stop below entry
    Long,
    /// Stop at or above entry
    Short,
}

impl Direction {
    /// Infer direction from entry and stop levels.
    ///
    /// A stop equal to the entry yields `Short`.
    pub fn infer(entry: Decimal, stop: Decimal) -> Self {
        if stop < entry {
            Direction::Long
        } else {
            Direction::Short
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

/// Why a calculation collapsed to zero instead of producing a size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegenerateInput {
    /// Entry and stop are the same price
    ZeroStopDistance,
    /// Entry price is zero
    ZeroEntry,
    /// A derived value does not fit in a `Decimal`
    Overflow,
}

impl fmt::Display for DegenerateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateInput::ZeroStopDistance => f.write_str("zero stop distance"),
            DegenerateInput::ZeroEntry => f.write_str("zero entry price"),
            DegenerateInput::Overflow => f.write_str("numeric overflow"),
        }
    }
}

/// Absolute distance between entry and stop
pub fn stop_distance(entry: Decimal, stop: Decimal) -> Decimal {
    entry.saturating_sub(stop).abs()
}
