use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::benchmarks::lookup_benchmark;
use crate::arithmetic::safe_divide;
use crate::statements::BusinessProfile;

const REVENUE_EFFICIENCY_MULTIPLE: Decimal = dec!(3.0);
const HIGH_MARGIN: Decimal = dec!(0.6);
const LOW_MARGIN: Decimal = dec!(-0.5);
const MAX_YEARLY_GROWTH: Decimal = dec!(3.0);

/// A figure that looks implausible for the business as described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierTag {
    RevenueUnusuallyHigh,
    ProfitMarginUnusuallyHigh,
    ProfitMarginUnusuallyLow,
    GrowthRateUnusual,
}

impl OutlierTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutlierTag::RevenueUnusuallyHigh => "revenue_unusually_high",
            OutlierTag::ProfitMarginUnusuallyHigh => "profit_margin_unusually_high",
            OutlierTag::ProfitMarginUnusuallyLow => "profit_margin_unusually_low",
            OutlierTag::GrowthRateUnusual => "growth_rate_unusual",
        }
    }
}

impl fmt::Display for OutlierTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flag figures that sit far outside what the category benchmark suggests.
///
/// Revenue is compared against the category's revenue per employee times
/// the head count (at least one), times three. Margin checks need both
/// revenue and a profit figure; the growth check needs `yearly_growth`.
pub fn detect_outliers(profile: &BusinessProfile) -> Vec<OutlierTag> {
    let mut tags = Vec::new();
    let benchmark = lookup_benchmark(profile.category.as_deref());

    if let Some(revenue) = profile.annual_revenue {
        let headcount = Decimal::from(profile.employees.unwrap_or(0).max(1));
        let ceiling = benchmark.employee_efficiency * headcount * REVENUE_EFFICIENCY_MULTIPLE;
        if revenue > ceiling {
            tags.push(OutlierTag::RevenueUnusuallyHigh);
        }

        if let Some(profit) = profile.annual_profit_estimate() {
            if !revenue.is_zero() {
                let margin = safe_divide(profit, revenue);
                if margin > HIGH_MARGIN {
                    tags.push(OutlierTag::ProfitMarginUnusuallyHigh);
                } else if margin < LOW_MARGIN {
                    tags.push(OutlierTag::ProfitMarginUnusuallyLow);
                }
            }
        }
    }

    if let Some(growth) = profile.yearly_growth {
        if growth.abs() > MAX_YEARLY_GROWTH {
            tags.push(OutlierTag::GrowthRateUnusual);
        }
    }

    tags
}
