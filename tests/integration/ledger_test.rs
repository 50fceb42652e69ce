//! Ledger durability tests against real files

use chrono::{NaiveDate, NaiveTime};
use rust_decimal_macros::dec;
use tempfile::TempDir;
use trade_journal::ledger::{schema, Ledger, LedgerError, NewTrade};
use trade_journal::risk::derive_trade;

fn trade(date: NaiveDate, hour: u32, minute: u32) -> NewTrade {
    NewTrade::from_economics(
        date,
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
        "GBPUSD",
        &derive_trade(dec!(1.2650), dec!(1.2600), dec!(10), dec!(10000), Some(dec!(1.2800))),
    )
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn test_ids_restart_per_date_and_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trades.csv");

    let ledger = Ledger::new(&path);
    let a = ledger.append(&trade(day(4), 9, 30)).unwrap();
    let b = ledger.append(&trade(day(4), 14, 5)).unwrap();
    let c = ledger.append(&trade(day(5), 8, 0)).unwrap();
    assert_eq!(a.as_str(), "04032024-0930-00001");
    assert_eq!(b.as_str(), "04032024-1405-00002");
    assert_eq!(c.as_str(), "05032024-0800-00001");

    let reopened = Ledger::new(&path);
    let d = reopened.append(&trade(day(4), 16, 45)).unwrap();
    assert_eq!(d.as_str(), "04032024-1645-00003");
    assert_eq!(reopened.len().unwrap(), 4);
}

#[test]
fn test_header_lists_core_fields_in_order() {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::new(dir.path().join("trades.csv"));
    ledger.append(&trade(day(4), 9, 30)).unwrap();

    let header = ledger.header().unwrap();
    assert_eq!(header, schema::CORE_FIELDS.to_vec());

    let content = std::fs::read_to_string(ledger.path()).unwrap();
    assert!(content.starts_with("ID,Date,Time,Instrument,Actual Entry,Actual Stop"));
}

#[test]
fn test_update_grows_schema_for_every_row() {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::new(dir.path().join("trades.csv"));
    let first = ledger.append(&trade(day(4), 9, 30)).unwrap();
    let second = ledger.append(&trade(day(4), 10, 0)).unwrap();

    let outcome = ledger
        .update_fields(second.as_str(), [("Setup Quality", "A+")])
        .unwrap();
    let migration = outcome.migration.unwrap();
    assert_eq!(migration.added, vec!["Setup Quality".to_string()]);

    let header = ledger.header().unwrap();
    assert_eq!(header.len(), schema::CORE_FIELDS.len() + 1);
    assert_eq!(header.last().map(String::as_str), Some("Setup Quality"));

    let untouched = ledger.get(first.as_str()).unwrap().unwrap();
    assert_eq!(untouched.field("Setup Quality"), None);
    let updated = ledger.get(second.as_str()).unwrap().unwrap();
    assert_eq!(updated.field("Setup Quality"), Some("A+"));

    // The column stays for later appends too
    ledger.append(&trade(day(4), 11, 0)).unwrap();
    assert_eq!(ledger.header().unwrap().len(), schema::CORE_FIELDS.len() + 1);
}

#[test]
fn test_failed_update_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::new(dir.path().join("trades.csv"));
    ledger.append(&trade(day(4), 9, 30)).unwrap();
    let before = std::fs::read(ledger.path()).unwrap();

    let err = ledger
        .update_fields("01012000-0000-00001", [("Notes", "nope")])
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));

    let err = ledger
        .update_fields("04032024-0930-00001", [(schema::ID, "other")])
        .unwrap_err();
    assert!(matches!(err, LedgerError::ImmutableField(_)));

    assert_eq!(std::fs::read(ledger.path()).unwrap(), before);
}

#[test]
fn test_values_with_commas_and_quotes_survive() {
    let dir = TempDir::new().unwrap();
    let ledger = Ledger::new(dir.path().join("trades.csv"));
    let id = ledger
        .append(&trade(day(4), 9, 30).with_field(schema::NOTES, "Waited, then \"sniped\" it"))
        .unwrap();

    let record = ledger.get(id.as_str()).unwrap().unwrap();
    assert_eq!(record.field(schema::NOTES), Some("Waited, then \"sniped\" it"));
    assert_eq!(record.entry, dec!(1.2650));
    assert_eq!(record.target_tp, Some(dec!(1.2800)));
}

#[test]
fn test_hand_edited_short_rows_are_padded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trades.csv");
    std::fs::write(
        &path,
        "ID,Date,Time,Instrument,Actual Entry,Actual Stop,Target TP,Capital Allocation (%),Position Size,£ Used,£ Risk,R-Multiple,Mood\n\
         04032024-0930-00001,2024-03-04,09:30,SPY,100,90,,10,10,1000,100,\n",
    )
    .unwrap();

    let ledger = Ledger::new(&path);
    let record = ledger.get("04032024-0930-00001").unwrap().unwrap();
    assert_eq!(record.field("Mood"), None);
    assert_eq!(ledger.header().unwrap().len(), 13);
    assert!(record.is_open());

    let id = ledger.append(&trade(day(4), 10, 0)).unwrap();
    assert_eq!(id.as_str(), "04032024-1000-00002");
}
