//! R-multiple projection
//!
//! Profit curve for a sized trade across a range of hypothetical reward
//! multiples. The output is a plain numeric series; rendering it is left to
//! whoever consumes it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::economics::TradeEconomics;
use super::types::Direction;

/// Decimal places each R value is rounded to
const R_DP: u32 = 10;

/// Projection errors
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// Step must move the range forward
    #[error("R step must be positive, got {0}")]
    NonPositiveStep(Decimal),
    /// Lower bound above upper bound
    #[error("R range is inverted: {start} > {end}")]
    InvertedRange { start: Decimal, end: Decimal },
}

/// Inclusive, ascending range of R values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RRange {
    start: Decimal,
    end: Decimal,
    step: Decimal,
}

impl RRange {
    /// Create a range from `start` to `end` inclusive
    pub fn new(start: Decimal, end: Decimal, step: Decimal) -> Result<Self, ProjectionError> {
        if step <= Decimal::ZERO {
            return Err(ProjectionError::NonPositiveStep(step));
        }
        if start > end {
            return Err(ProjectionError::InvertedRange { start, end });
        }
        Ok(Self { start, end, step })
    }

    pub fn start(&self) -> Decimal {
        self.start
    }

    pub fn end(&self) -> Decimal {
        self.end
    }

    pub fn step(&self) -> Decimal {
        self.step
    }

    /// Iterate the R values
    pub fn values(&self) -> RValues {
        RValues {
            next: self.start,
            range: *self,
        }
    }
}

impl Default for RRange {
    fn default() -> Self {
        Self {
            start: dec!(1.0),
            end: dec!(5.0),
            step: dec!(0.2),
        }
    }
}

/// Iterator over the R values of an [`RRange`]
#[derive(Debug, Clone)]
pub struct RValues {
    next: Decimal,
    range: RRange,
}

impl Iterator for RValues {
    type Item = Decimal;

    fn next(&mut self) -> Option<Decimal> {
        if self.next > self.range.end {
            return None;
        }
        let r = self.next.round_dp(R_DP);
        self.next += self.range.step;
        Some(r)
    }
}

/// One point on the profit curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Reward multiple
    pub r: Decimal,
    /// Take-profit price at this multiple
    pub take_profit: Decimal,
    /// Money made if the take-profit fills
    pub profit: Decimal,
    /// Profit as percent of balance; `None` for a zero balance
    pub profit_pct: Option<Decimal>,
}

/// Lazy, restartable profit curve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    direction: Direction,
    entry: Decimal,
    stop_distance: Decimal,
    position_size: Decimal,
    balance: Decimal,
    range: RRange,
}

impl Projection {
    /// Build a projection from raw trade parameters
    pub fn new(
        direction: Direction,
        entry: Decimal,
        stop_distance: Decimal,
        position_size: Decimal,
        balance: Decimal,
        range: RRange,
    ) -> Self {
        Self {
            direction,
            entry,
            stop_distance,
            position_size,
            balance,
            range,
        }
    }

    pub fn range(&self) -> &RRange {
        &self.range
    }

    /// Evaluate the curve at a single R value
    pub fn point(&self, r: Decimal) -> ProjectionPoint {
        // Saturates rather than overflowing on extreme inputs
        let offset = r.saturating_mul(self.stop_distance);
        let take_profit = match self.direction {
            Direction::Long => self.entry.saturating_add(offset),
            Direction::Short => self.entry.saturating_sub(offset),
        };
        let profit = take_profit
            .saturating_sub(self.entry)
            .abs()
            .saturating_mul(self.position_size);
        let profit_pct = if self.balance.is_zero() {
            None
        } else {
            profit
                .checked_div(self.balance)
                .map(|share| share.saturating_mul(Decimal::ONE_HUNDRED))
        };

        ProjectionPoint {
            r,
            take_profit,
            profit,
            profit_pct,
        }
    }

    /// Iterate the curve from the start of the range
    pub fn iter(&self) -> ProjectionIter<'_> {
        ProjectionIter {
            projection: self,
            values: self.range.values(),
        }
    }
}

impl<'a> IntoIterator for &'a Projection {
    type Item = ProjectionPoint;
    type IntoIter = ProjectionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`ProjectionPoint`]s
#[derive(Debug, Clone)]
pub struct ProjectionIter<'a> {
    projection: &'a Projection,
    values: RValues,
}

impl Iterator for ProjectionIter<'_> {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<ProjectionPoint> {
        self.values.next().map(|r| self.projection.point(r))
    }
}

/// Project the profit curve of a prospective trade
pub fn project(trade: &TradeEconomics, balance: Decimal, range: RRange) -> Projection {
    Projection::new(
        trade.direction,
        trade.entry,
        trade.stop_distance,
        trade.position_size,
        balance,
        range,
    )
}
