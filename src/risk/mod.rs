//! Risk management module
//!
//! Position sizing, trade economics, reward projections and session limits

mod economics;
mod limits;
mod outcome;
mod projection;
mod sizing;
mod types;

pub use economics::{derive_trade, TradeEconomics};
pub use limits::{Conviction, ExposureSummary, OpenBook, RiskLimits};
pub use outcome::{TradeOutcome, TradeResult};
pub use projection::{
    project, Projection, ProjectionError, ProjectionIter, ProjectionPoint, RRange, RValues,
};
pub use sizing::{size_position, PositionSize, Sizing};
pub use types::{stop_distance, DegenerateInput, Direction, RiskError};
