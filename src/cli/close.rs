//! Close command implementation

use chrono::NaiveTime;
use clap::Args;
use rust_decimal::Decimal;

use super::{parse_time, Context};
use crate::journal::ExitDetails;

#[derive(Args, Debug)]
pub struct CloseArgs {
    /// Trade identifier
    pub id: String,

    /// Exit price
    #[arg(long)]
    pub exit_price: Decimal,

    /// Exit time (HH:MM)
    #[arg(long, value_parser = parse_time)]
    pub exit_time: Option<NaiveTime>,

    /// Exit reason
    #[arg(long)]
    pub reason: Option<String>,

    /// Closing notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl CloseArgs {
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let exit = ExitDetails {
            exit_price: self.exit_price,
            exit_time: self.exit_time,
            reason: self.reason.clone(),
            notes: self.notes.clone(),
        };
        let closed = ctx.journal().close(&self.id, &exit)?;

        let outcome = closed.outcome;
        match outcome.final_r {
            Some(r) => println!("{}: {} {:.2} ({:.2}R)", self.id, outcome.result, outcome.pnl, r),
            None => println!("{}: {} {:.2}", self.id, outcome.result, outcome.pnl),
        }
        Ok(())
    }
}
