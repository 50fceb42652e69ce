//! List command implementation

use clap::Args;

use super::Context;
use crate::ledger::schema;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only trades without an exit
    #[arg(long)]
    pub open: bool,

    /// Print every column as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let journal = ctx.journal();
        let ledger = journal.ledger();
        let records = if self.open {
            ledger.open_trades()?
        } else {
            ledger.records()?
        };

        if self.json {
            for record in &records {
                println!("{}", serde_json::to_string(record)?);
            }
            return Ok(());
        }

        println!(
            "{:<22} {:<10} {:<12} {:<5} {:>12} {:>12} {:>10} {:>10} {:<9}",
            "ID", "Date", "Instrument", "Dir", "Entry", "Stop", "Used", "Risk", "Result"
        );
        for record in &records {
            println!(
                "{:<22} {:<10} {:<12} {:<5} {:>12} {:>12} {:>10.2} {:>10.2} {:<9}",
                record.id,
                record.date.to_string(),
                record.instrument,
                record.direction().to_string(),
                record.entry,
                record.stop,
                record.capital_used,
                record.risk,
                record.field(schema::RESULT).unwrap_or("open")
            );
        }
        println!("{} trade(s)", records.len());
        Ok(())
    }
}
