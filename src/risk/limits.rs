//! Exposure and open-risk limits

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::RiskError;

/// Session-level risk limits, all in percent of balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Maximum capital committed across open trades
    pub max_exposure_pct: Decimal,
    /// Maximum money at risk across open trades
    pub max_open_risk_pct: Decimal,
    /// Allocation above which a trade is flagged as high conviction
    pub soft_allocation_pct: Decimal,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_exposure_pct: dec!(50),
            max_open_risk_pct: dec!(3),
            soft_allocation_pct: dec!(20),
        }
    }
}

/// Capital and risk already tied up in open trades
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenBook {
    /// Sum of capital used
    pub capital_used: Decimal,
    /// Sum of money at risk
    pub risk: Decimal,
    /// Number of open trades
    pub count: usize,
}

impl OpenBook {
    /// Add an open trade
    pub fn add(&mut self, capital_used: Decimal, risk: Decimal) {
        self.capital_used += capital_used;
        self.risk += risk;
        self.count += 1;
    }
}

/// Projected totals if a candidate trade were opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExposureSummary {
    /// Open capital plus the candidate's
    pub projected_exposure: Decimal,
    /// Exposure ceiling in money
    pub max_exposure: Decimal,
    /// Projected exposure as percent of balance
    pub exposure_pct: Option<Decimal>,
    /// Open risk plus the candidate's
    pub projected_open_risk: Decimal,
    /// Open-risk ceiling in money
    pub max_open_risk: Decimal,
}

impl RiskLimits {
    /// Totals for opening a trade using `capital_used` and risking `risk`
    pub fn summarize(
        &self,
        balance: Decimal,
        book: &OpenBook,
        capital_used: Decimal,
        risk: Decimal,
    ) -> ExposureSummary {
        let projected_exposure = book.capital_used + capital_used;
        let exposure_pct = if balance.is_zero() {
            None
        } else {
            Some(projected_exposure / balance * Decimal::ONE_HUNDRED)
        };

        ExposureSummary {
            projected_exposure,
            max_exposure: self.max_exposure_pct / Decimal::ONE_HUNDRED * balance,
            exposure_pct,
            projected_open_risk: book.risk + risk,
            max_open_risk: self.max_open_risk_pct / Decimal::ONE_HUNDRED * balance,
        }
    }

    /// Check a candidate trade against both ceilings
    pub fn check(
        &self,
        balance: Decimal,
        book: &OpenBook,
        capital_used: Decimal,
        risk: Decimal,
    ) -> Result<ExposureSummary, RiskError> {
        let summary = self.summarize(balance, book, capital_used, risk);

        if summary.projected_exposure > summary.max_exposure {
            return Err(RiskError::MaxExposureReached {
                projected: summary.projected_exposure,
                limit: summary.max_exposure,
            });
        }
        if summary.projected_open_risk > summary.max_open_risk {
            return Err(RiskError::MaxOpenRiskReached {
                projected: summary.projected_open_risk,
                limit: summary.max_open_risk,
            });
        }

        Ok(summary)
    }

    /// True when the allocation is above the soft conviction threshold
    pub fn above_soft_allocation(&self, contribution_pct: Decimal) -> bool {
        contribution_pct > self.soft_allocation_pct
    }
}

/// How much conviction a capital allocation expresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Conviction {
    /// Up to 5%
    Cautious,
    /// Up to 10%
    Low,
    /// Up to 15%
    Moderate,
    /// Up to 20%
    High,
    /// Above 20%
    Extreme,
}

impl Conviction {
    pub fn from_allocation(contribution_pct: Decimal) -> Self {
        if contribution_pct <= dec!(5) {
            Conviction::Cautious
        } else if contribution_pct <= dec!(10) {
            Conviction::Low
        } else if contribution_pct <= dec!(15) {
            Conviction::Moderate
        } else if contribution_pct <= dec!(20) {
            Conviction::High
        } else {
            Conviction::Extreme
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Conviction::Cautious => "Cautious - exploratory setup",
            Conviction::Low => "Low conviction - testing waters",
            Conviction::Moderate => "Moderate confidence - solid reasoning",
            Conviction::High => "High confidence - well-researched",
            Conviction::Extreme => "Extreme conviction - ensure tight risk!",
        }
    }
}

impl fmt::Display for Conviction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
