//! Trade economics
//!
//! Turns entry/stop levels and a capital allocation into the numbers a
//! prospective trade is judged on. Money and size values are rounded to two
//! decimal places (half-to-even) at each step, in the order listed on
//! [`derive_trade`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{stop_distance, DegenerateInput, Direction};

const MONEY_DP: u32 = 2;

/// Economics of a prospective trade, held in memory until it is logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeEconomics {
    /// Inferred direction
    pub direction: Direction,
    /// Entry price
    pub entry: Decimal,
    /// Stop-loss price
    pub stop: Decimal,
    /// Optional take-profit target
    pub target_tp: Option<Decimal>,
    /// Capital allocation as percent of balance
    pub contribution_pct: Decimal,
    /// |entry - stop|
    pub stop_distance: Decimal,
    /// Money allocated to the trade
    pub capital_allocation: Decimal,
    /// Units
    pub position_size: Decimal,
    /// Capital actually committed
    pub capital_used: Decimal,
    /// Money lost if the stop is hit
    pub risk: Decimal,
    /// Target distance over stop distance; `None` until computable
    pub r_multiple: Option<Decimal>,
    /// Set when a zero or overflow guard fired
    pub degenerate: Option<DegenerateInput>,
}

impl TradeEconomics {
    /// True when the position carries no units because an input was degenerate
    pub fn is_degenerate(&self) -> bool {
        self.degenerate.is_some()
    }
}

/// Derive trade economics.
///
/// 1. `capital_allocation = round(balance * contribution_pct / 100)`
/// 2. `position_size = round(capital_allocation / entry)`, zero for a zero entry
/// 3. `capital_used = round(position_size * entry)`
/// 4. `risk = round(stop_distance * position_size)`
/// 5. `r_multiple = round(|target - entry| / stop_distance)` when both exist
///
/// A value that does not fit in a `Decimal` zeroes steps 2-4 and sets
/// `degenerate` to [`DegenerateInput::Overflow`].
pub fn derive_trade(
    entry: Decimal,
    stop: Decimal,
    contribution_pct: Decimal,
    balance: Decimal,
    target_tp: Option<Decimal>,
) -> TradeEconomics {
    let direction = Direction::infer(entry, stop);
    let distance = stop_distance(entry, stop);

    let allocated = balance
        .checked_mul(contribution_pct)
        .map(|v| (v / Decimal::ONE_HUNDRED).round_dp(MONEY_DP));
    let sized = allocated.and_then(|allocation| position_for(allocation, entry, distance));

    let (capital_allocation, position_size, capital_used, risk) = match (allocated, sized) {
        (Some(allocation), Some((size, used, risk))) => (allocation, size, used, risk),
        (allocation, _) => (
            allocation.unwrap_or(Decimal::ZERO),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        ),
    };

    let r_multiple = match target_tp {
        Some(target) if !distance.is_zero() => target
            .checked_sub(entry)
            .and_then(|reward| reward.abs().checked_div(distance))
            .map(|r| r.round_dp(MONEY_DP)),
        _ => None,
    };

    let degenerate = if sized.is_none() {
        Some(DegenerateInput::Overflow)
    } else if entry.is_zero() {
        Some(DegenerateInput::ZeroEntry)
    } else if distance.is_zero() {
        Some(DegenerateInput::ZeroStopDistance)
    } else {
        None
    };

    if degenerate == Some(DegenerateInput::Overflow) {
        tracing::warn!(%entry, %stop, %balance, "Trade economics overflowed, sizing to zero");
    }

    tracing::debug!(
        %direction,
        %position_size,
        %capital_used,
        %risk,
        ?r_multiple,
        "Derived trade economics"
    );

    TradeEconomics {
        direction,
        entry,
        stop,
        target_tp,
        contribution_pct,
        stop_distance: distance,
        capital_allocation,
        position_size,
        capital_used,
        risk,
        r_multiple,
        degenerate,
    }
}

/// Size, capital used and risk for an allocation; `None` when a value overflows
fn position_for(
    allocation: Decimal,
    entry: Decimal,
    distance: Decimal,
) -> Option<(Decimal, Decimal, Decimal)> {
    if entry.is_zero() {
        return Some((Decimal::ZERO, Decimal::ZERO, Decimal::ZERO));
    }
    let size = allocation.checked_div(entry)?.round_dp(MONEY_DP);
    let used = size.checked_mul(entry)?.round_dp(MONEY_DP);
    let risk = distance.checked_mul(size)?.round_dp(MONEY_DP);
    Some((size, used, risk))
}
