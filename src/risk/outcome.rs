//! Closed trade outcome

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::Direction;

/// Win/loss classification of a closed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeResult {
    Win,
    Loss,
    Breakeven,
}

impl fmt::Display for TradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeResult::Win => f.write_str("Win"),
            TradeResult::Loss => f.write_str("Loss"),
            TradeResult::Breakeven => f.write_str("Breakeven"),
        }
    }
}

/// Realized outcome of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOutcome {
    /// Win, loss or breakeven
    pub result: TradeResult,
    /// Realized P&L, rounded to 2dp
    pub pnl: Decimal,
    /// P&L in units of initial risk; `None` when nothing was at risk
    pub final_r: Option<Decimal>,
}

impl TradeOutcome {
    /// Compute the outcome of exiting a position at `exit_price`
    pub fn close(
        direction: Direction,
        entry: Decimal,
        position_size: Decimal,
        risk: Decimal,
        exit_price: Decimal,
    ) -> Self {
        let move_per_unit = match direction {
            Direction::Long => exit_price - entry,
            Direction::Short => entry - exit_price,
        };
        let pnl = (move_per_unit * position_size).round_dp(2);

        let result = if pnl > Decimal::ZERO {
            TradeResult::Win
        } else if pnl < Decimal::ZERO {
            TradeResult::Loss
        } else {
            TradeResult::Breakeven
        };

        let final_r = if risk.is_zero() {
            None
        } else {
            Some((pnl / risk).round_dp(2))
        };

        Self {
            result,
            pnl,
            final_r,
        }
    }
}
