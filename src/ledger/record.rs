//! Trade records as stored in the ledger

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::LedgerError;
use super::schema;
use crate::risk::{Direction, TradeEconomics};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M";

/// A trade about to be appended; the ledger assigns its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrade {
    /// Entry date
    pub date: NaiveDate,
    /// Entry time, stored to the minute
    pub time: NaiveTime,
    /// Traded instrument
    pub instrument: String,
    /// Actual entry price
    pub entry: Decimal,
    /// Actual stop price
    pub stop: Decimal,
    /// Take-profit target
    pub target_tp: Option<Decimal>,
    /// Capital allocation as percent of balance
    pub contribution_pct: Decimal,
    /// Units
    pub position_size: Decimal,
    /// Capital committed
    pub capital_used: Decimal,
    /// Money at risk
    pub risk: Decimal,
    /// Planned reward multiple
    pub r_multiple: Option<Decimal>,
    /// Journal fields recorded at entry (mood, strategy, notes...)
    pub extra: Vec<(String, String)>,
}

impl NewTrade {
    /// Build from derived economics
    pub fn from_economics(
        date: NaiveDate,
        time: NaiveTime,
        instrument: impl Into<String>,
        economics: &TradeEconomics,
    ) -> Self {
        Self {
            date,
            time,
            instrument: instrument.into(),
            entry: economics.entry,
            stop: economics.stop,
            target_tp: economics.target_tp,
            contribution_pct: economics.contribution_pct,
            position_size: economics.position_size,
            capital_used: economics.capital_used,
            risk: economics.risk,
            r_multiple: economics.r_multiple,
            extra: Vec::new(),
        }
    }

    /// Attach a journal field, skipping empty values
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.extra.push((name.into(), value));
        }
        self
    }

    pub(crate) fn date_cell(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Cells for every column except the id
    pub(crate) fn cells(&self) -> Vec<(&str, String)> {
        let mut cells = vec![
            (schema::DATE, self.date_cell()),
            (schema::TIME, self.time.format(TIME_FORMAT).to_string()),
            (schema::INSTRUMENT, self.instrument.clone()),
            (schema::ENTRY, self.entry.to_string()),
            (schema::STOP, self.stop.to_string()),
            (schema::TARGET_TP, optional_cell(self.target_tp)),
            (schema::CONTRIBUTION_PCT, self.contribution_pct.to_string()),
            (schema::POSITION_SIZE, self.position_size.to_string()),
            (schema::CAPITAL_USED, self.capital_used.to_string()),
            (schema::RISK, self.risk.to_string()),
            (schema::R_MULTIPLE, optional_cell(self.r_multiple)),
        ];
        cells.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.clone())));
        cells
    }
}

fn optional_cell(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// A stored trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TradeRecord {
    pub id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub instrument: String,
    pub entry: Decimal,
    pub stop: Decimal,
    pub target_tp: Option<Decimal>,
    pub contribution_pct: Decimal,
    pub position_size: Decimal,
    pub capital_used: Decimal,
    pub risk: Decimal,
    pub r_multiple: Option<Decimal>,
    /// Non-empty cells of every other column, in header order
    pub extra: Vec<(String, String)>,
}

impl TradeRecord {
    /// Parse a row against the ledger header
    pub(crate) fn from_row(header: &[String], row: &[String]) -> Result<Self, LedgerError> {
        let view = RowView { header, row };
        let time_cell = view.cell(schema::TIME);

        let date = NaiveDate::parse_from_str(view.cell(schema::DATE), DATE_FORMAT)
            .map_err(|_| view.malformed(schema::DATE))?;
        let time = parse_time_cell(time_cell).ok_or_else(|| view.malformed(schema::TIME))?;

        let extra = header
            .iter()
            .zip(row.iter())
            .filter(|(name, value)| {
                !schema::CORE_FIELDS.contains(&name.as_str()) && !value.is_empty()
            })
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Ok(Self {
            id: view.cell(schema::ID).to_string(),
            date,
            time,
            instrument: view.cell(schema::INSTRUMENT).to_string(),
            entry: view.decimal(schema::ENTRY)?,
            stop: view.decimal(schema::STOP)?,
            target_tp: view.optional(schema::TARGET_TP)?,
            contribution_pct: view.decimal(schema::CONTRIBUTION_PCT)?,
            position_size: view.decimal(schema::POSITION_SIZE)?,
            capital_used: view.decimal(schema::CAPITAL_USED)?,
            risk: view.decimal(schema::RISK)?,
            r_multiple: view.optional(schema::R_MULTIPLE)?,
            extra,
        })
    }

    /// Value of a journal column, `None` when empty or absent
    pub fn field(&self, name: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn direction(&self) -> Direction {
        Direction::infer(self.entry, self.stop)
    }

    /// Open until an exit price is recorded
    pub fn is_open(&self) -> bool {
        self.field(schema::EXIT_PRICE).is_none()
    }
}

/// Minute resolution, with seconds accepted from hand-edited files
fn parse_time_cell(cell: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(cell, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(cell, "%H:%M:%S"))
        .ok()
}

/// Reject a value that [`TradeRecord::from_row`] could not read back
pub(crate) fn check_cell(column: &str, value: &str) -> Result<(), LedgerError> {
    let cell = value.trim();
    let readable = match column {
        schema::DATE => NaiveDate::parse_from_str(cell, DATE_FORMAT).is_ok(),
        schema::TIME => parse_time_cell(cell).is_some(),
        schema::ENTRY
        | schema::STOP
        | schema::CONTRIBUTION_PCT
        | schema::POSITION_SIZE
        | schema::CAPITAL_USED
        | schema::RISK => cell.parse::<Decimal>().is_ok(),
        schema::TARGET_TP | schema::R_MULTIPLE => {
            cell.is_empty() || cell.parse::<Decimal>().is_ok()
        }
        _ => true,
    };

    if readable {
        Ok(())
    } else {
        Err(LedgerError::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

/// Header-aware access to the cells of one row
struct RowView<'a> {
    header: &'a [String],
    row: &'a [String],
}

impl<'a> RowView<'a> {
    fn cell(&self, name: &str) -> &'a str {
        self.header
            .iter()
            .position(|h| h == name)
            .and_then(|i| self.row.get(i))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    fn malformed(&self, column: &str) -> LedgerError {
        LedgerError::Malformed {
            id: self.cell(schema::ID).to_string(),
            column: column.to_string(),
            value: self.cell(column).to_string(),
        }
    }

    fn decimal(&self, column: &str) -> Result<Decimal, LedgerError> {
        self.cell(column)
            .parse()
            .map_err(|_| self.malformed(column))
    }

    fn optional(&self, column: &str) -> Result<Option<Decimal>, LedgerError> {
        match self.cell(column) {
            "" => Ok(None),
            value => value.parse().map(Some).map_err(|_| self.malformed(column)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::schema::CORE_FIELDS;
    use rust_decimal_macros::dec;

    fn header() -> Vec<String> {
        CORE_FIELDS.iter().map(|s| s.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_core_row() {
        let record = TradeRecord::from_row(
            &header(),
            &row(&[
                "01022024-1030-00001",
                "2024-02-01",
                "10:30",
                "EURUSD",
                "1.085",
                "1.08",
                "",
                "10",
                "921.66",
                "1000.00",
                "4.61",
                "",
            ]),
        )
        .unwrap();

        assert_eq!(record.id, "01022024-1030-00001");
        assert_eq!(record.instrument, "EURUSD");
        assert_eq!(record.entry, dec!(1.085));
        assert_eq!(record.target_tp, None);
        assert_eq!(record.capital_used, dec!(1000));
        assert_eq!(record.direction(), Direction::Long);
        assert!(record.is_open());
    }

    #[test]
    fn test_parse_extra_columns() {
        let mut header = header();
        header.push("Exit Price".to_string());
        header.push("Mood".to_string());

        let record = TradeRecord::from_row(
            &header,
            &row(&[
                "id", "2024-02-01", "10:30", "X", "10", "9", "12", "5", "50", "500", "50", "2",
                "11.5", "",
            ]),
        )
        .unwrap();

        assert_eq!(record.field("Exit Price"), Some("11.5"));
        assert_eq!(record.field("Mood"), None);
        assert!(!record.is_open());
        assert_eq!(record.r_multiple, Some(dec!(2)));
    }

    #[test]
    fn test_malformed_number_names_column() {
        let err = TradeRecord::from_row(
            &header(),
            &row(&[
                "id", "2024-02-01", "10:30", "X", "ten", "9", "", "5", "50", "500", "50", "",
            ]),
        )
        .unwrap_err();

        match err {
            LedgerError::Malformed { column, value, .. } => {
                assert_eq!(column, "Actual Entry");
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_new_trade_skips_empty_fields() {
        let trade = NewTrade::from_economics(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
            "X",
            &crate::risk::derive_trade(dec!(10), dec!(9), dec!(5), dec!(1000), None),
        )
        .with_field("Mood", "Calm")
        .with_field("Notes", "");

        assert_eq!(trade.extra, vec![("Mood".to_string(), "Calm".to_string())]);
    }

    #[test]
    fn test_check_cell_typed_columns() {
        assert!(check_cell(schema::ENTRY, "1.2650").is_ok());
        assert!(check_cell(schema::ENTRY, "n/a").is_err());
        assert!(check_cell(schema::RISK, "").is_err());
        assert!(check_cell(schema::TARGET_TP, "").is_ok());
        assert!(check_cell(schema::R_MULTIPLE, "two").is_err());
        assert!(check_cell(schema::DATE, "2024-02-30").is_err());
        assert!(check_cell(schema::DATE, " 2024-02-29 ").is_ok());
        assert!(check_cell(schema::TIME, "9:30pm").is_err());
        assert!(check_cell(schema::TIME, "21:30:05").is_ok());
        assert!(check_cell(schema::INSTRUMENT, "").is_ok());
        assert!(check_cell("Mood", "anything at all").is_ok());
    }
}
