//! Ledger columns and the field registry
//!
//! The header of a ledger only ever grows. Adding a column is a schema
//! migration: the registry records it and the whole table is rewritten with
//! the new header.

use serde::Serialize;

pub const ID: &str = "ID";
pub const DATE: &str = "Date";
pub const TIME: &str = "Time";
pub const INSTRUMENT: &str = "Instrument";
pub const ENTRY: &str = "Actual Entry";
pub const STOP: &str = "Actual Stop";
pub const TARGET_TP: &str = "Target TP";
pub const CONTRIBUTION_PCT: &str = "Capital Allocation (%)";
pub const POSITION_SIZE: &str = "Position Size";
pub const CAPITAL_USED: &str = "£ Used";
pub const RISK: &str = "£ Risk";
pub const R_MULTIPLE: &str = "R-Multiple";

/// Header written when a ledger is created
pub const CORE_FIELDS: [&str; 12] = [
    ID,
    DATE,
    TIME,
    INSTRUMENT,
    ENTRY,
    STOP,
    TARGET_TP,
    CONTRIBUTION_PCT,
    POSITION_SIZE,
    CAPITAL_USED,
    RISK,
    R_MULTIPLE,
];

pub const MOOD: &str = "Mood";
pub const STRATEGY: &str = "Strategy";
pub const NOTES: &str = "Notes";
pub const EXIT_PRICE: &str = "Exit Price";
pub const EXIT_TIME: &str = "Exit Time";
pub const EXIT_REASON: &str = "Exit Reason";
pub const RESULT: &str = "Result";
pub const PNL: &str = "P/L";
pub const FINAL_R_MULTIPLE: &str = "Final R-Multiple";
pub const WENT_WELL: &str = "What Went Well";
pub const TO_IMPROVE: &str = "What to Improve";
pub const CLOSING_NOTES: &str = "Closing Notes";

/// Columns attached to trades after entry
pub const JOURNAL_FIELDS: [&str; 12] = [
    MOOD,
    STRATEGY,
    NOTES,
    EXIT_PRICE,
    EXIT_TIME,
    EXIT_REASON,
    RESULT,
    PNL,
    FINAL_R_MULTIPLE,
    WENT_WELL,
    TO_IMPROVE,
    CLOSING_NOTES,
];

/// Columns added to a ledger by a single write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaMigration {
    /// Schema version before the write
    pub from_version: usize,
    /// Schema version after the write
    pub to_version: usize,
    /// New column names, in the order they were appended
    pub added: Vec<String>,
}

/// Ordered set of columns a ledger carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRegistry {
    fields: Vec<String>,
}

impl FieldRegistry {
    /// Registry for a brand new ledger
    pub fn initial() -> Self {
        Self {
            fields: CORE_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Registry for an existing header; an empty header means a new ledger
    pub fn from_header(header: Vec<String>) -> Self {
        if header.is_empty() {
            Self::initial()
        } else {
            Self { fields: header }
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of columns added on top of the initial header
    pub fn version(&self) -> usize {
        self.fields.len().saturating_sub(CORE_FIELDS.len())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Append every name not yet present, returning the migration if any
    pub fn migrate<'a, I>(&mut self, names: I) -> Option<SchemaMigration>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let from_version = self.version();
        let mut added = Vec::new();

        for name in names {
            if !self.contains(name) {
                self.fields.push(name.to_string());
                added.push(name.to_string());
            }
        }

        if added.is_empty() {
            None
        } else {
            Some(SchemaMigration {
                from_version,
                to_version: self.version(),
                added,
            })
        }
    }
}

/// True for the columns this journal knows how to fill in
pub fn is_known_field(name: &str) -> bool {
    CORE_FIELDS.contains(&name) || JOURNAL_FIELDS.contains(&name)
}
