//! Log command implementation

use chrono::{Local, NaiveDate, NaiveTime};
use clap::Args;
use rust_decimal::Decimal;

use super::{parse_time, Context};
use crate::journal::TradeRequest;
use crate::ledger::schema;

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Traded instrument
    #[arg(long)]
    pub instrument: String,

    /// Actual entry price
    #[arg(long)]
    pub entry: Decimal,

    /// Actual stop price
    #[arg(long)]
    pub stop: Decimal,

    /// Capital allocation (% of balance)
    #[arg(long)]
    pub allocation: Decimal,

    /// Take-profit target
    #[arg(long)]
    pub target: Option<Decimal>,

    /// Entry date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Entry time (HH:MM), defaults to now
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,

    /// Mood at entry
    #[arg(long)]
    pub mood: Option<String>,

    /// Strategy used
    #[arg(long)]
    pub strategy: Option<String>,

    /// Entry notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl LogArgs {
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let session = ctx.session()?;
        let now = Local::now().naive_local();

        let request = TradeRequest {
            entry: self.entry,
            stop: self.stop,
            contribution_pct: self.allocation,
            target_tp: self.target,
        };

        let extra: Vec<(String, String)> = [
            (schema::MOOD, &self.mood),
            (schema::STRATEGY, &self.strategy),
            (schema::NOTES, &self.notes),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
        .collect();

        let outcome = ctx.journal().log(
            &session,
            &request,
            &self.instrument,
            self.date.unwrap_or(now.date()),
            self.time.unwrap_or(now.time()),
            extra,
        )?;

        if let Some(migration) = outcome.migration {
            tracing::debug!(added = ?migration.added, "Logging added columns");
        }
        println!("{}", outcome.id);
        Ok(())
    }
}
