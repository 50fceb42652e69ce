//! Journal workflow
//!
//! Connects the calculators to the ledger: preview a prospective trade
//! against the session, log it, and close it out later.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::ledger::{schema, AppendOutcome, Ledger, LedgerError, NewTrade, UpdateOutcome};
use crate::risk::{
    derive_trade, size_position, Conviction, ExposureSummary, OpenBook, RiskError, Sizing,
    TradeEconomics, TradeOutcome,
};
use crate::session::SessionConfig;

/// Price levels and allocation for a prospective trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeRequest {
    /// Entry price
    pub entry: Decimal,
    /// Stop-loss price
    pub stop: Decimal,
    /// Capital allocation, percent of balance
    pub contribution_pct: Decimal,
    /// Optional take-profit target
    pub target_tp: Option<Decimal>,
}

/// Everything shown before a trade is confirmed
#[derive(Debug)]
pub struct TradePreview {
    /// Risk-bounded sizing under the allocation cap
    pub sizing: Sizing,
    /// Allocation-based economics
    pub economics: TradeEconomics,
    /// Exposure and open risk including this trade
    pub exposure: ExposureSummary,
    /// Limit the trade would break, if any
    pub limit_breach: Option<RiskError>,
    /// Conviction band of the allocation
    pub conviction: Conviction,
    /// Allocation is above the soft threshold
    pub above_soft_allocation: bool,
}

/// Exit details for closing a trade
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExitDetails {
    pub exit_price: Decimal,
    pub exit_time: Option<NaiveTime>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

/// Result of closing a trade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedTrade {
    pub outcome: TradeOutcome,
    pub update: UpdateOutcome,
}

/// Trade journal over a ledger
#[derive(Debug, Clone)]
pub struct Journal {
    ledger: Ledger,
    soft_allocation_pct: Decimal,
}

impl Journal {
    pub fn new(ledger: Ledger, soft_allocation_pct: Decimal) -> Self {
        Self {
            ledger,
            soft_allocation_pct,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Capital and risk tied up in trades without an exit
    pub fn open_book(&self) -> Result<OpenBook, LedgerError> {
        let mut book = OpenBook::default();
        for trade in self.ledger.open_trades()? {
            book.add(trade.capital_used, trade.risk);
        }
        Ok(book)
    }

    /// Size and check a prospective trade without writing anything
    pub fn preview(
        &self,
        session: &SessionConfig,
        request: &TradeRequest,
    ) -> Result<TradePreview, LedgerError> {
        let sizing = size_position(
            session.monetary_risk(),
            request.entry,
            request.stop,
            session.max_capital(request.contribution_pct),
        );
        let economics = derive_trade(
            request.entry,
            request.stop,
            request.contribution_pct,
            session.balance,
            request.target_tp,
        );

        let limits = session.limits(self.soft_allocation_pct);
        let book = self.open_book()?;
        let position = sizing.position();
        let exposure = limits.summarize(
            session.balance,
            &book,
            position.capital_used,
            position.realized_risk,
        );
        let limit_breach = limits
            .check(
                session.balance,
                &book,
                position.capital_used,
                position.realized_risk,
            )
            .err();

        if let Some(ref breach) = limit_breach {
            tracing::warn!(%breach, "Prospective trade breaks a session limit");
        }

        Ok(TradePreview {
            sizing,
            economics,
            exposure,
            limit_breach,
            conviction: Conviction::from_allocation(request.contribution_pct),
            above_soft_allocation: limits.above_soft_allocation(request.contribution_pct),
        })
    }

    /// Log a trade from its actual levels; `extra` carries entry-time journal fields
    pub fn log(
        &self,
        session: &SessionConfig,
        request: &TradeRequest,
        instrument: &str,
        date: NaiveDate,
        time: NaiveTime,
        extra: Vec<(String, String)>,
    ) -> Result<AppendOutcome, LedgerError> {
        let economics = derive_trade(
            request.entry,
            request.stop,
            request.contribution_pct,
            session.balance,
            request.target_tp,
        );
        let trade = extra
            .into_iter()
            .fold(
                NewTrade::from_economics(date, time, instrument, &economics),
                |trade, (k, v)| trade.with_field(k, v),
            );
        self.ledger.append_with_outcome(&trade)
    }

    /// Record the exit of a trade along with its derived outcome
    pub fn close(&self, id: &str, exit: &ExitDetails) -> Result<ClosedTrade, LedgerError> {
        let record = self
            .ledger
            .get(id)?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;

        let outcome = TradeOutcome::close(
            record.direction(),
            record.entry,
            record.position_size,
            record.risk,
            exit.exit_price,
        );

        let mut fields: Vec<(&str, String)> = vec![(schema::EXIT_PRICE, exit.exit_price.to_string())];
        if let Some(time) = exit.exit_time {
            fields.push((schema::EXIT_TIME, time.format("%H:%M").to_string()));
        }
        if let Some(ref reason) = exit.reason {
            fields.push((schema::EXIT_REASON, reason.clone()));
        }
        fields.push((schema::RESULT, outcome.result.to_string()));
        fields.push((schema::PNL, outcome.pnl.to_string()));
        fields.push((
            schema::FINAL_R_MULTIPLE,
            outcome.final_r.map(|r| r.to_string()).unwrap_or_default(),
        ));
        if let Some(ref notes) = exit.notes {
            fields.push((schema::CLOSING_NOTES, notes.clone()));
        }

        let update = self.ledger.update_fields(id, fields)?;
        tracing::info!(id, result = %outcome.result, pnl = %outcome.pnl, "Closed trade");

        Ok(ClosedTrade { outcome, update })
    }
}
