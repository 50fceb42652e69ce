//! trade-journal: risk-bounded position sizing and a durable trade journal
//!
//! This library provides the core components for:
//! - Position sizing under a per-trade risk budget and a capital cap
//! - Trade economics from entry, stop and capital allocation
//! - R-multiple take-profit projections
//! - Session exposure and open-risk limits
//! - A CSV trade ledger with atomic writes and a growing schema

pub mod cli;
pub mod config;
pub mod journal;
pub mod labels;
pub mod ledger;
pub mod risk;
pub mod session;
pub mod telemetry;
