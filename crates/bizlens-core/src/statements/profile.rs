use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Ratio};

/// Competitive standing reported for the business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketPosition {
    Leader,
    Strong,
    #[default]
    Average,
    Weak,
}

/// Lifecycle stage reported for the business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    Startup,
    Growth,
    #[default]
    Mature,
    Decline,
}

/// Qualitative tags supplied alongside the figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualitativeFactors {
    #[serde(alias = "marketPosition")]
    pub market_position: Option<MarketPosition>,
    #[serde(alias = "growthStage")]
    pub growth_stage: Option<GrowthStage>,
    #[serde(alias = "riskFactors")]
    pub risk_factors: Vec<String>,
}

/// Raw business profile as captured by the intake form.
///
/// Every field is optional. Numeric fields that are absent are treated as
/// zero by the statement builder and skipped by the data-quality checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    pub name: Option<String>,
    #[serde(alias = "businessType")]
    pub business_type: Option<String>,
    pub industry: Option<String>,
    /// Benchmark category, e.g. `RESTAURANT` or `RETAIL`.
    pub category: Option<String>,
    #[serde(alias = "annualRevenue")]
    pub annual_revenue: Option<Money>,
    #[serde(alias = "monthlyRevenue")]
    pub monthly_revenue: Option<Money>,
    #[serde(alias = "monthlyProfit")]
    pub monthly_profit: Option<Money>,
    #[serde(alias = "annualProfit")]
    pub annual_profit: Option<Money>,
    pub ebitda: Option<Money>,
    #[serde(alias = "cashFlow")]
    pub cash_flow: Option<Money>,
    pub assets: Option<Money>,
    pub liabilities: Option<Money>,
    /// Year the business was founded.
    pub established: Option<i32>,
    pub employees: Option<u32>,
    /// Year-over-year revenue growth as a fraction (0.25 = 25%).
    #[serde(alias = "yearlyGrowth")]
    pub yearly_growth: Option<Ratio>,
    pub qualitative: QualitativeFactors,
}

impl BusinessProfile {
    pub fn revenue(&self) -> Money {
        self.annual_revenue.unwrap_or(Decimal::ZERO)
    }

    /// Annual profit: the reported annual figure, else monthly profit x 12.
    pub fn annual_profit_estimate(&self) -> Option<Money> {
        self.annual_profit
            .or_else(|| self.monthly_profit.map(|m| m * Decimal::from(12)))
    }

    pub fn is_service_business(&self) -> bool {
        self.business_type
            .as_deref()
            .map(|t| t.to_lowercase().contains("service"))
            .unwrap_or(false)
    }
}
