//! Preview command implementation

use clap::Args;
use rust_decimal::Decimal;

use super::Context;
use crate::journal::{TradePreview, TradeRequest};
use crate::risk::{project, RRange, Sizing};

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Entry price
    #[arg(long)]
    pub entry: Decimal,

    /// Stop-loss price
    #[arg(long)]
    pub stop: Decimal,

    /// Capital allocation (% of balance)
    #[arg(long, default_value = "10")]
    pub allocation: Decimal,

    /// Take-profit target
    #[arg(long)]
    pub target: Option<Decimal>,

    /// Lowest R in the projection
    #[arg(long)]
    pub r_min: Option<Decimal>,

    /// Highest R in the projection
    #[arg(long)]
    pub r_max: Option<Decimal>,

    /// Step between projected R values
    #[arg(long)]
    pub r_step: Option<Decimal>,
}

impl PreviewArgs {
    pub fn execute(&self, ctx: &Context) -> anyhow::Result<()> {
        let session = ctx.session()?;
        let projection_config = &ctx.config.projection;
        let range = RRange::new(
            self.r_min.unwrap_or(projection_config.r_min),
            self.r_max.unwrap_or(projection_config.r_max),
            self.r_step.unwrap_or(projection_config.r_step),
        )?;

        let request = TradeRequest {
            entry: self.entry,
            stop: self.stop,
            contribution_pct: self.allocation,
            target_tp: self.target,
        };
        let preview = ctx.journal().preview(&session, &request)?;
        print_preview(&preview, session.balance);

        let projection = project(&preview.economics, session.balance, range);
        println!();
        println!("{:>8} {:>14} {:>12} {:>10}", "R", "TP", "Profit", "% Bal");
        for point in &projection {
            let pct = point
                .profit_pct
                .map(|p| format!("{:.2}%", p))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:>8} {:>14.4} {:>12.2} {:>10}",
                point.r.normalize(),
                point.take_profit,
                point.profit,
                pct
            );
        }

        Ok(())
    }
}

fn print_preview(preview: &TradePreview, balance: Decimal) {
    let economics = &preview.economics;
    let position = preview.sizing.position();
    let pct_of_balance = |value: Decimal| -> String {
        if balance.is_zero() {
            "-".to_string()
        } else {
            format!("{:.2}%", value / balance * Decimal::ONE_HUNDRED)
        }
    };

    println!("Direction:        {}", economics.direction);
    println!("Stop distance:    {}", economics.stop_distance);
    match preview.sizing {
        Sizing::Degenerate(reason) => println!("Risk sizing:      not computable ({})", reason),
        sizing => {
            println!(
                "Risk sizing:      {:.2} units, {:.2} used ({}), {:.2} at risk ({}){}",
                position.size,
                position.capital_used,
                pct_of_balance(position.capital_used),
                position.realized_risk,
                pct_of_balance(position.realized_risk),
                if sizing.is_capped() { " [capped]" } else { "" }
            );
        }
    }
    println!(
        "Allocation:       {:.2} -> {:.2} units, {:.2} used, {:.2} at risk",
        economics.capital_allocation,
        economics.position_size,
        economics.capital_used,
        economics.risk
    );
    match economics.r_multiple {
        Some(r) => println!("R-multiple:       {:.2}", r),
        None => println!("R-multiple:       -"),
    }
    println!("Conviction:       {}", preview.conviction);

    let exposure = &preview.exposure;
    println!(
        "Exposure:         {:.2} / {:.2}{}",
        exposure.projected_exposure,
        exposure.max_exposure,
        exposure
            .exposure_pct
            .map(|p| format!(" ({:.2}%)", p))
            .unwrap_or_default()
    );
    println!(
        "Open risk:        {:.2} / {:.2}",
        exposure.projected_open_risk, exposure.max_open_risk
    );

    if let Some(ref breach) = preview.limit_breach {
        println!("LIMIT: {}", breach);
    } else if preview.above_soft_allocation {
        println!("WARNING: allocation is above the soft conviction threshold");
    }
}
