//! End-to-end journal workflow tests

use chrono::{NaiveDate, NaiveTime};
use rust_decimal_macros::dec;
use tempfile::TempDir;
use trade_journal::journal::{ExitDetails, Journal, TradeRequest};
use trade_journal::ledger::{schema, Ledger, LedgerError};
use trade_journal::risk::{project, Direction, RRange, RiskError, TradeResult};
use trade_journal::session::{SessionConfig, SessionStore};

fn setup() -> (TempDir, Journal, SessionConfig) {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path().join("snapshot.json"));
    store
        .save(&SessionConfig {
            balance: dec!(20000),
            risk_percent: dec!(0.5),
            max_open_risk: dec!(2),
            max_exposure: dec!(40),
        })
        .unwrap();
    let session = store.load().unwrap();
    let journal = Journal::new(Ledger::new(dir.path().join("trades.csv")), dec!(20));
    (dir, journal, session)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn test_full_trade_lifecycle() {
    let (_dir, journal, session) = setup();

    let request = TradeRequest {
        entry: dec!(50),
        stop: dec!(52),
        contribution_pct: dec!(15),
        target_tp: Some(dec!(44)),
    };

    let preview = journal.preview(&session, &request).unwrap();
    assert_eq!(preview.economics.direction, Direction::Short);
    // £100 risk / 2 = 50 units = £2500, inside the £3000 cap
    assert_eq!(preview.sizing.position().size, dec!(50));
    assert!(!preview.sizing.is_capped());
    assert_eq!(preview.economics.r_multiple, Some(dec!(3)));

    let range = RRange::new(dec!(1), dec!(3), dec!(1)).unwrap();
    let projection = project(&preview.economics, session.balance, range);
    let tps: Vec<_> = projection.iter().map(|p| p.take_profit).collect();
    assert_eq!(tps, vec![dec!(48), dec!(46), dec!(44)]);

    let logged = journal
        .log(
            &session,
            &request,
            "TSLA",
            date(),
            time(15, 31),
            vec![(schema::STRATEGY.to_string(), "Fade".to_string())],
        )
        .unwrap();
    assert_eq!(logged.id.as_str(), "01072024-1531-00001");
    assert!(logged.migration.is_some());
    assert_eq!(journal.open_book().unwrap().count, 1);

    let closed = journal
        .close(
            logged.id.as_str(),
            &ExitDetails {
                exit_price: dec!(53),
                exit_time: Some(time(16, 0)),
                reason: Some("Stopped out".to_string()),
                notes: Some("Chased the entry".to_string()),
            },
        )
        .unwrap();
    assert_eq!(closed.outcome.result, TradeResult::Loss);
    assert!(closed.outcome.pnl < dec!(0));

    let record = journal.ledger().get(logged.id.as_str()).unwrap().unwrap();
    assert_eq!(record.field(schema::STRATEGY), Some("Fade"));
    assert_eq!(record.field(schema::EXIT_REASON), Some("Stopped out"));
    assert_eq!(record.field(schema::CLOSING_NOTES), Some("Chased the entry"));
    assert!(journal.ledger().open_trades().unwrap().is_empty());
}

#[test]
fn test_exposure_limit_breach_is_reported() {
    let (_dir, journal, session) = setup();
    let request = TradeRequest {
        entry: dec!(10),
        stop: dec!(9.9),
        contribution_pct: dec!(25),
        target_tp: None,
    };

    // Allocation cap binds: £5000 of a £20000 balance
    let preview = journal.preview(&session, &request).unwrap();
    assert!(preview.sizing.is_capped());
    assert!(preview.above_soft_allocation);
    assert!(preview.limit_breach.is_none());

    journal
        .log(&session, &request, "AAPL", date(), time(10, 0), vec![])
        .unwrap();
    journal
        .log(&session, &request, "MSFT", date(), time(10, 5), vec![])
        .unwrap();

    let preview = journal.preview(&session, &request).unwrap();
    assert!(matches!(
        preview.limit_breach,
        Some(RiskError::MaxExposureReached { .. })
    ));
}

#[test]
fn test_degenerate_request_is_flagged_not_fatal() {
    let (_dir, journal, session) = setup();
    let request = TradeRequest {
        entry: dec!(100),
        stop: dec!(100),
        contribution_pct: dec!(10),
        target_tp: Some(dec!(110)),
    };

    let preview = journal.preview(&session, &request).unwrap();
    assert!(preview.sizing.degenerate().is_some());
    assert!(preview.economics.is_degenerate());
    assert_eq!(preview.economics.position_size, dec!(20));
    assert_eq!(preview.economics.risk, dec!(0));
    assert_eq!(preview.economics.r_multiple, None);
}

#[test]
fn test_rejected_update_keeps_journal_readable() {
    let (_dir, journal, session) = setup();
    let request = TradeRequest {
        entry: dec!(100),
        stop: dec!(95),
        contribution_pct: dec!(5),
        target_tp: None,
    };
    let logged = journal
        .log(&session, &request, "SPY", date(), time(9, 30), vec![])
        .unwrap();

    let err = journal
        .ledger()
        .update_fields(logged.id.as_str(), [(schema::ENTRY, "n/a")])
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidValue { .. }));

    assert_eq!(journal.ledger().records().unwrap().len(), 1);
    let preview = journal.preview(&session, &request).unwrap();
    assert_eq!(preview.exposure.projected_exposure, dec!(2000));
}
