//! Trade ledger
//!
//! Durable CSV table of logged trades, addressed by generated identifiers

mod error;
mod id;
mod record;
pub mod schema;
mod store;

pub use error::{LedgerError, StorageOp};
pub use id::TradeId;
pub use record::{NewTrade, TradeRecord};
pub use schema::{FieldRegistry, SchemaMigration};
pub use store::{AppendOutcome, Ledger, UpdateOutcome};
