use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::arithmetic::safe_divide;
use crate::statements::BusinessProfile;

const MONTHLY_ANNUAL_TOLERANCE: Decimal = dec!(0.25);
const CASH_FLOW_DIVERGENCE: Decimal = dec!(2.0);
const MONTHS: Decimal = dec!(12);

/// Internal contradiction between two reported figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyFlag {
    ProfitExceedsRevenue,
    EbitdaBelowProfit,
    MonthlyAnnualMismatch,
    CashFlowProfitDivergence,
    NonPositiveAssets,
}

impl ConsistencyFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsistencyFlag::ProfitExceedsRevenue => "profit_exceeds_revenue",
            ConsistencyFlag::EbitdaBelowProfit => "ebitda_below_profit",
            ConsistencyFlag::MonthlyAnnualMismatch => "monthly_annual_mismatch",
            ConsistencyFlag::CashFlowProfitDivergence => "cash_flow_profit_divergence",
            ConsistencyFlag::NonPositiveAssets => "non_positive_assets",
        }
    }
}

impl fmt::Display for ConsistencyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative gap between a monthly figure scaled to a year and the annual one.
fn annualised_gap(monthly: Decimal, annual: Decimal) -> Decimal {
    safe_divide((monthly * MONTHS - annual).abs(), annual.abs())
}

/// Cross-check the profile's figures against each other.
///
/// Flags are advisory. A check runs only when every figure it needs is
/// present.
pub fn validate_data_consistency(profile: &BusinessProfile) -> Vec<ConsistencyFlag> {
    let mut flags = Vec::new();
    let profit = profile.annual_profit_estimate();

    if let (Some(p), Some(r)) = (profit, profile.annual_revenue) {
        if p > r {
            flags.push(ConsistencyFlag::ProfitExceedsRevenue);
        }
    }

    if let (Some(e), Some(p)) = (profile.ebitda, profit) {
        if e < p {
            flags.push(ConsistencyFlag::EbitdaBelowProfit);
        }
    }

    let revenue_mismatch = match (profile.monthly_revenue, profile.annual_revenue) {
        (Some(m), Some(a)) if !a.is_zero() => annualised_gap(m, a) > MONTHLY_ANNUAL_TOLERANCE,
        _ => false,
    };
    let profit_mismatch = match (profile.monthly_profit, profile.annual_profit) {
        (Some(m), Some(a)) if !a.is_zero() => annualised_gap(m, a) > MONTHLY_ANNUAL_TOLERANCE,
        _ => false,
    };
    if revenue_mismatch || profit_mismatch {
        flags.push(ConsistencyFlag::MonthlyAnnualMismatch);
    }

    if let (Some(cf), Some(p)) = (profile.cash_flow, profit) {
        if !p.is_zero() && safe_divide((cf - p).abs(), p.abs()) > CASH_FLOW_DIVERGENCE {
            flags.push(ConsistencyFlag::CashFlowProfitDivergence);
        }
    }

    if let Some(assets) = profile.assets {
        if assets <= Decimal::ZERO {
            flags.push(ConsistencyFlag::NonPositiveAssets);
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profit_exceeds_revenue() {
        let p = BusinessProfile {
            annual_revenue: Some(dec!(100_000)),
            annual_profit: Some(dec!(120_000)),
            ..Default::default()
        };
        assert_eq!(
            validate_data_consistency(&p),
            vec![ConsistencyFlag::ProfitExceedsRevenue]
        );
    }

    #[test]
    fn test_ebitda_below_profit() {
        let p = BusinessProfile {
            monthly_profit: Some(dec!(10_000)),
            ebitda: Some(dec!(100_000)),
            ..Default::default()
        };
        assert_eq!(
            validate_data_consistency(&p),
            vec![ConsistencyFlag::EbitdaBelowProfit]
        );
    }

    #[test]
    fn test_monthly_annual_mismatch() {
        let mut p = BusinessProfile {
            monthly_revenue: Some(dec!(10_000)),
            annual_revenue: Some(dec!(120_000)),
            ..Default::default()
        };
        assert!(validate_data_consistency(&p).is_empty());

        // 12 x 14k = 168k, 40% above the annual figure
        p.monthly_revenue = Some(dec!(14_000));
        assert_eq!(
            validate_data_consistency(&p),
            vec![ConsistencyFlag::MonthlyAnnualMismatch]
        );
    }

    #[test]
    fn test_monthly_profit_mismatch_flags_once() {
        let p = BusinessProfile {
            monthly_revenue: Some(dec!(20_000)),
            annual_revenue: Some(dec!(120_000)),
            monthly_profit: Some(dec!(5_000)),
            annual_profit: Some(dec!(20_000)),
            ..Default::default()
        };
        let flags = validate_data_consistency(&p);
        assert_eq!(
            flags
                .iter()
                .filter(|f| **f == ConsistencyFlag::MonthlyAnnualMismatch)
                .count(),
            1
        );
    }

    #[test]
    fn test_cash_flow_divergence() {
        let p = BusinessProfile {
            annual_profit: Some(dec!(10_000)),
            cash_flow: Some(dec!(40_000)),
            ..Default::default()
        };
        assert_eq!(
            validate_data_consistency(&p),
            vec![ConsistencyFlag::CashFlowProfitDivergence]
        );
    }

    #[test]
    fn test_non_positive_assets() {
        let p = BusinessProfile {
            assets: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert_eq!(
            validate_data_consistency(&p),
            vec![ConsistencyFlag::NonPositiveAssets]
        );
    }

    #[test]
    fn test_absent_inputs_skip_checks() {
        assert!(validate_data_consistency(&BusinessProfile::default()).is_empty());
    }
}
