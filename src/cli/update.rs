//! Update command implementation

use clap::Args;

use super::{parse_key_val, Context};

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Trade identifier
    pub id: String,

    /// Field to set, as KEY=VALUE (repeatable)
    #[arg(long, value_parser = parse_key_val, required = true)]
    pub set: Vec<(String, String)>,
}

impl UpdateArgs {
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let outcome = ctx
            .journal()
            .ledger()
            .update_fields(&self.id, self.set.iter().cloned())?;

        println!("Updated {}", self.id);
        if let Some(migration) = outcome.migration {
            println!(
                "New columns (schema v{}): {}",
                migration.to_version,
                migration.added.join(", ")
            );
        }
        Ok(())
    }
}
