//! Session command implementation

use clap::Args;
use rust_decimal::Decimal;

use super::Context;

#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Account balance
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Risk per trade (%)
    #[arg(long)]
    pub risk_percent: Option<Decimal>,

    /// Max open risk (%)
    #[arg(long)]
    pub max_open_risk: Option<Decimal>,

    /// Max exposure (%)
    #[arg(long)]
    pub max_exposure: Option<Decimal>,
}

impl SessionArgs {
    fn has_changes(&self) -> bool {
        self.balance.is_some()
            || self.risk_percent.is_some()
            || self.max_open_risk.is_some()
            || self.max_exposure.is_some()
    }

    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let store = ctx.session_store();
        let mut session = store.load()?;

        if self.has_changes() {
            session.balance = self.balance.unwrap_or(session.balance);
            session.risk_percent = self.risk_percent.unwrap_or(session.risk_percent);
            session.max_open_risk = self.max_open_risk.unwrap_or(session.max_open_risk);
            session.max_exposure = self.max_exposure.unwrap_or(session.max_exposure);
            store.save(&session)?;
            tracing::info!(path = %store.path().display(), "Session snapshot updated");
        }

        println!("Balance:          {:.2}", session.balance);
        println!("Risk per trade:   {:.2}%", session.risk_percent);
        println!("Monetary risk:    {:.2}", session.monetary_risk());
        println!("Max open risk:    {:.2}%", session.max_open_risk);
        println!("Max exposure:     {:.2}%", session.max_exposure);
        Ok(())
    }
}
