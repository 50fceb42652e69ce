//! Position sizing
//!
//! Sizes a position so that a stop-out loses the requested risk amount,
//! unless the capital that size would need exceeds the allocation cap. The
//! cap always wins: the position shrinks and the realized risk drops below
//! the request instead of the call failing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{stop_distance, DegenerateInput};

/// Sized position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSize {
    /// Units to buy or sell
    pub size: Decimal,
    /// Capital committed (size * entry)
    pub capital_used: Decimal,
    /// Money lost if the stop is hit
    pub realized_risk: Decimal,
}

impl PositionSize {
    /// All-zero position
    pub const ZERO: PositionSize = PositionSize {
        size: Decimal::ZERO,
        capital_used: Decimal::ZERO,
        realized_risk: Decimal::ZERO,
    };
}

/// Outcome of a sizing calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sizing {
    /// Full risk amount fits inside the capital cap
    Sized(PositionSize),
    /// Capital cap bound; realized risk is below the request
    Capped(PositionSize),
    /// No risk per unit can be computed
    Degenerate(DegenerateInput),
}

impl Sizing {
    /// Resolved position, zero for degenerate inputs
    pub fn position(&self) -> PositionSize {
        match self {
            Sizing::Sized(p) | Sizing::Capped(p) => *p,
            Sizing::Degenerate(_) => PositionSize::ZERO,
        }
    }

    pub fn is_capped(&self) -> bool {
        matches!(self, Sizing::Capped(_))
    }

    pub fn degenerate(&self) -> Option<DegenerateInput> {
        match self {
            Sizing::Degenerate(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Size a position for `risk_amount` between `entry_price` and `stop_price`,
/// never committing more than `max_capital`.
pub fn size_position(
    risk_amount: Decimal,
    entry_price: Decimal,
    stop_price: Decimal,
    max_capital: Decimal,
) -> Sizing {
    let distance = stop_distance(entry_price, stop_price);
    if distance.is_zero() {
        return Sizing::Degenerate(DegenerateInput::ZeroStopDistance);
    }

    // An unrepresentable requirement is larger than any cap.
    let required = risk_amount
        .checked_div(distance)
        .and_then(|size| Some((size, size.checked_mul(entry_price)?)));

    match required {
        Some((ideal_size, capital_required)) if capital_required <= max_capital => {
            Sizing::Sized(PositionSize {
                size: ideal_size,
                capital_used: capital_required,
                realized_risk: risk_amount,
            })
        }
        _ => capped(max_capital, entry_price, distance),
    }
}

fn capped(max_capital: Decimal, entry_price: Decimal, distance: Decimal) -> Sizing {
    // Only reachable with a zero entry when the cap is negative.
    if entry_price.is_zero() {
        return Sizing::Degenerate(DegenerateInput::ZeroEntry);
    }
    let position = max_capital.checked_div(entry_price).and_then(|size| {
        Some(PositionSize {
            size,
            capital_used: max_capital,
            realized_risk: size.checked_mul(distance)?,
        })
    });
    match position {
        Some(position) => Sizing::Capped(position),
        None => Sizing::Degenerate(DegenerateInput::Overflow),
    }
}
