//! Integration tests for trade-journal

mod config_test;
mod journal_test;
mod ledger_test;
