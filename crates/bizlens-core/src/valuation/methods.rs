use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::engine::ValuationInput;
use crate::analysis::health::RiskLevel;
use crate::arithmetic::{clamp, safe_divide};
use crate::types::{Money, Multiple, Ratio, Score};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMethod {
    RevenueMultiple,
    EarningsMultiple,
    DiscountedCashFlow,
    Comparable,
    AssetBased,
}

impl ValuationMethod {
    pub fn label(&self) -> &'static str {
        match self {
            ValuationMethod::RevenueMultiple => "Revenue multiple",
            ValuationMethod::EarningsMultiple => "Earnings multiple",
            ValuationMethod::DiscountedCashFlow => "Discounted cash flow",
            ValuationMethod::Comparable => "Comparable",
            ValuationMethod::AssetBased => "Asset based",
        }
    }

    /// Weight before renormalising over the methods that apply.
    pub fn base_weight(&self) -> Ratio {
        match self {
            ValuationMethod::RevenueMultiple => dec!(0.30),
            ValuationMethod::EarningsMultiple => dec!(0.25),
            ValuationMethod::DiscountedCashFlow => dec!(0.25),
            ValuationMethod::Comparable => dec!(0.10),
            ValuationMethod::AssetBased => dec!(0.10),
        }
    }
}

/// One method's vote in the blended valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodEstimate {
    pub name: ValuationMethod,
    pub value: Money,
    pub weight: Ratio,
    pub confidence: Score,
}

impl MethodEstimate {
    fn new(name: ValuationMethod, value: Money, confidence: Score) -> Self {
        Self {
            name,
            value,
            weight: name.base_weight(),
            confidence,
        }
    }
}

// ---------------------------------------------------------------------------
// DCF parameters
// ---------------------------------------------------------------------------

pub const DCF_YEARS: u32 = 5;
pub const DCF_BASE_DISCOUNT_RATE: Ratio = dec!(0.15);
pub const DCF_TERMINAL_GROWTH: Ratio = dec!(0.025);
const DCF_MIN_GROWTH: Ratio = dec!(-0.10);
const DCF_MAX_GROWTH: Ratio = dec!(0.25);

const BASE_EARNINGS_MULTIPLE: Multiple = dec!(3.0);
const MIN_COMPARABLE_FACTOR: Multiple = dec!(0.5);
const MAX_COMPARABLE_FACTOR: Multiple = dec!(1.5);

pub fn risk_premium(risk: RiskLevel) -> Ratio {
    match risk {
        RiskLevel::Low => Decimal::ZERO,
        RiskLevel::Medium => dec!(0.03),
        RiskLevel::High => dec!(0.06),
        RiskLevel::Critical => dec!(0.10),
    }
}

/// Earnings multiple adjustment for the overall health score.
pub fn health_multiple_adjustment(overall_score: Score) -> Multiple {
    if overall_score >= dec!(80) {
        dec!(1.0)
    } else if overall_score >= dec!(60) {
        dec!(0.5)
    } else if overall_score < dec!(40) {
        dec!(-1.0)
    } else {
        Decimal::ZERO
    }
}

/// Present value of `free_cash_flow` grown for [`DCF_YEARS`] years plus a
/// Gordon terminal value on the final year.
/// Discount factors compound year by year.
pub fn discounted_cash_flow(free_cash_flow: Money, growth: Ratio, discount_rate: Ratio) -> Money {
    let mut fcf = free_cash_flow;
    let mut discount_factor = Decimal::ONE;
    let mut present_value = Decimal::ZERO;

    for _ in 0..DCF_YEARS {
        fcf *= Decimal::ONE + growth;
        discount_factor *= Decimal::ONE + discount_rate;
        present_value += fcf / discount_factor;
    }

    let terminal_value = safe_divide(
        fcf * (Decimal::ONE + DCF_TERMINAL_GROWTH),
        discount_rate - DCF_TERMINAL_GROWTH,
    );
    present_value + terminal_value / discount_factor
}

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

pub fn revenue_multiple(input: &ValuationInput) -> MethodEstimate {
    let completeness = input.data_quality.completeness.overall;
    MethodEstimate::new(
        ValuationMethod::RevenueMultiple,
        input.revenue * input.industry_multiple,
        dec!(60) + dec!(20) * completeness,
    )
}

pub fn earnings_multiple(input: &ValuationInput) -> MethodEstimate {
    let multiple =
        BASE_EARNINGS_MULTIPLE + health_multiple_adjustment(input.health.overall_score);
    MethodEstimate::new(
        ValuationMethod::EarningsMultiple,
        input.net_income * multiple,
        dec!(70),
    )
}

pub fn discounted_cash_flow_method(input: &ValuationInput) -> MethodEstimate {
    let growth = clamp(
        input.ratios.revenue_growth_rate / dec!(100),
        DCF_MIN_GROWTH,
        DCF_MAX_GROWTH,
    );
    let discount_rate = DCF_BASE_DISCOUNT_RATE + risk_premium(input.health.risk_level);
    MethodEstimate::new(
        ValuationMethod::DiscountedCashFlow,
        discounted_cash_flow(input.free_cash_flow, growth, discount_rate),
        dec!(50) + dec!(0.3) * input.health.overall_score,
    )
}

/// Revenue multiple scaled by how the gross margin compares with the
/// category benchmark.
pub fn comparable(input: &ValuationInput) -> MethodEstimate {
    let benchmark = &input.data_quality.benchmark;
    let margin = input.ratios.gross_profit_margin / dec!(100);
    let factor = clamp(
        safe_divide(margin, benchmark.gross_margin),
        MIN_COMPARABLE_FACTOR,
        MAX_COMPARABLE_FACTOR,
    );
    let confidence = if benchmark.is_fallback { dec!(50) } else { dec!(65) };
    MethodEstimate::new(
        ValuationMethod::Comparable,
        input.revenue * input.industry_multiple * factor,
        confidence,
    )
}

pub fn asset_based(input: &ValuationInput) -> MethodEstimate {
    MethodEstimate::new(
        ValuationMethod::AssetBased,
        input.total_assets - input.total_liabilities,
        dec!(60),
    )
}

/// Every method, in fixed order, with its base weight.
pub fn all_methods(input: &ValuationInput) -> [MethodEstimate; 5] {
    [
        revenue_multiple(input),
        earnings_multiple(input),
        discounted_cash_flow_method(input),
        comparable(input),
        asset_based(input),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
