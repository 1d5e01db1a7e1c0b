use std::collections::BTreeMap;
use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::adjustments::{adjustment_factors, combined_factor, AdjustmentDimension};
use super::industry::IndustryMultiples;
use super::methods::{all_methods, MethodEstimate};
use crate::analysis::health::{calculate_health_score, FinancialHealthScore, RiskLevel};
use crate::analysis::ratios::FinancialRatios;
use crate::arithmetic::{clamp, round_half_up, safe_divide, safe_percent};
use crate::data_quality::{assess_data_quality, DataQualityReport};
use crate::error::AnalysisError;
use crate::session::BusinessContext;
use crate::statements::{BusinessProfile, GrowthStage, MarketPosition, QualitativeFactors};
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Percent, Ratio, Score};
use crate::AnalysisResult;

const MIN_CONFIDENCE: Score = dec!(10);
const MAX_CONFIDENCE: Score = dec!(95);
const DISPERSION_PENALTY: Score = dec!(10);
const DISPERSION_RATIO: Multiple = dec!(3);
const MIN_SPREAD: Ratio = dec!(0.10);
const MAX_SPREAD: Ratio = dec!(0.40);

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Everything the valuation engine looks at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationInput {
    pub revenue: Money,
    pub net_income: Money,
    pub free_cash_flow: Money,
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub category: Option<String>,
    pub industry: Option<String>,
    /// Year the business was founded.
    pub established: Option<i32>,
    /// Year the valuation is made in.
    pub valuation_year: i32,
    pub ratios: FinancialRatios,
    pub health: FinancialHealthScore,
    pub data_quality: DataQualityReport,
    pub qualitative: QualitativeFactors,
    /// Revenue multiple for the business's industry.
    pub industry_multiple: Multiple,
}

impl ValuationInput {
    /// Assemble the input from the context's current statement and the
    /// profile it was imported from.
    pub fn from_context(
        context: &BusinessContext,
        profile: &BusinessProfile,
        industry: &dyn IndustryMultiples,
        valuation_year: i32,
    ) -> AnalysisResult<Self> {
        let statement = context.current().ok_or(AnalysisError::NoStatement)?;
        let ratios = context.calculate_financial_ratios(Some(statement))?;
        let health = calculate_health_score(&ratios);
        let cash_flow = context.analyze_cash_flow(Some(statement))?;

        Ok(Self {
            revenue: statement.revenue,
            net_income: statement.net_income,
            free_cash_flow: cash_flow.result.free_cash_flow,
            total_assets: statement.total_assets,
            total_liabilities: statement.total_liabilities,
            category: profile.category.clone(),
            industry: profile.industry.clone(),
            established: profile.established,
            valuation_year,
            ratios,
            health,
            data_quality: assess_data_quality(profile),
            qualitative: profile.qualitative.clone(),
            industry_multiple: industry.revenue_multiple(profile.industry.as_deref()),
        })
    }

    pub fn years_in_business(&self) -> Option<i32> {
        self.established.map(|year| self.valuation_year - year)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRange {
    pub low: Money,
    pub high: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationMetrics {
    pub revenue: Money,
    pub net_income: Money,
    pub profit_margin: Percent,
    pub industry_multiple: Multiple,
    /// Estimated value divided by revenue.
    pub implied_revenue_multiple: Multiple,
    pub health_score: Score,
    pub completeness: Ratio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub estimated_value: Money,
    pub range: ValuationRange,
    pub confidence_score: Score,
    /// Methods that contributed, with weights renormalised to sum to one.
    pub methods: Vec<MethodEstimate>,
    pub adjustment_factors: BTreeMap<AdjustmentDimension, Multiple>,
    pub key_metrics: ValuationMetrics,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Blend five valuation methods into one estimate with a confidence band.
///
/// Methods whose value is not positive are dropped and the remaining
/// weights renormalised. The blended value is scaled by the qualitative
/// adjustment factors and rounded to cents.
pub fn estimate_valuation(
    input: &ValuationInput,
) -> AnalysisResult<ComputationOutput<ValuationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let mut methods: Vec<MethodEstimate> = Vec::new();
    for estimate in all_methods(input) {
        if estimate.value > Decimal::ZERO {
            methods.push(estimate);
        } else {
            warnings.push(format!(
                "{} method skipped: value {} is not positive",
                estimate.name.label(),
                round_half_up(estimate.value, 2)
            ));
        }
    }
    if methods.is_empty() {
        warnings.push("No valuation method produced a positive value; estimate is zero".into());
    }

    let total_weight: Decimal = methods.iter().map(|m| m.weight).sum();
    for m in &mut methods {
        m.weight = safe_divide(m.weight, total_weight);
    }

    let base_value: Money = methods.iter().map(|m| m.value * m.weight).sum();
    let adjustment_factors = adjustment_factors(&input.qualitative, input.health.risk_level);
    let estimated_value = round_half_up(base_value * combined_factor(&adjustment_factors), 2);

    let completeness = input.data_quality.completeness.overall;
    let confidence_score = valuation_confidence(&methods, completeness);
    let spread = clamp(
        (dec!(100) - confidence_score) / dec!(200),
        MIN_SPREAD,
        MAX_SPREAD,
    );
    let range = ValuationRange {
        low: round_half_up(estimated_value * (Decimal::ONE - spread), 2),
        high: round_half_up(estimated_value * (Decimal::ONE + spread), 2),
    };

    let key_metrics = ValuationMetrics {
        revenue: input.revenue,
        net_income: input.net_income,
        profit_margin: safe_percent(input.net_income, input.revenue),
        industry_multiple: input.industry_multiple,
        implied_revenue_multiple: safe_divide(estimated_value, input.revenue),
        health_score: input.health.overall_score,
        completeness,
    };

    let recommendations = recommendations(input, confidence_score);
    let risk_factors = risk_factors(input);

    tracing::debug!(
        %estimated_value,
        %confidence_score,
        methods = methods.len(),
        "valuation estimated"
    );

    let output = ValuationResult {
        estimated_value,
        range,
        confidence_score,
        methods,
        adjustment_factors,
        key_metrics,
        recommendations,
        risk_factors,
    };

    let assumptions = serde_json::json!({
        "industry_multiple": input.industry_multiple,
        "valuation_year": input.valuation_year,
        "benchmark_category": input.data_quality.benchmark.category,
        "risk_level": input.health.risk_level.to_string(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Weighted multi-method valuation with qualitative adjustments",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// `0.7 x weighted method confidence + 30 x completeness`, less 10 when the
/// methods disagree by more than 3x, bounded to 10-95.
pub fn valuation_confidence(methods: &[MethodEstimate], completeness: Ratio) -> Score {
    let weighted: Score = methods.iter().map(|m| m.confidence * m.weight).sum();
    let highest = methods.iter().map(|m| m.value).max();
    let lowest = methods.iter().map(|m| m.value).min();
    let penalty = match (highest, lowest) {
        (Some(h), Some(l)) if h > l * DISPERSION_RATIO => DISPERSION_PENALTY,
        _ => Decimal::ZERO,
    };
    clamp(
        dec!(0.7) * weighted + dec!(30) * completeness - penalty,
        MIN_CONFIDENCE,
        MAX_CONFIDENCE,
    )
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &ValuationInput) -> AnalysisResult<()> {
    if input.industry_multiple < Decimal::ZERO {
        return Err(AnalysisError::InvalidInput {
            field: "industry_multiple".into(),
            reason: "Industry revenue multiple cannot be negative".into(),
        });
    }
    if let Some(established) = input.established {
        if established > input.valuation_year {
            return Err(AnalysisError::InvalidInput {
                field: "established".into(),
                reason: format!(
                    "Founding year {established} is after the valuation year {}",
                    input.valuation_year
                ),
            });
        }
    }
    Ok(())
}

fn recommendations(input: &ValuationInput, confidence: Score) -> Vec<String> {
    let mut recs = Vec::new();
    let r = &input.ratios;

    if input.data_quality.completeness.overall < dec!(0.7) {
        recs.push("Provide more complete financial information to narrow the valuation range".into());
    }
    if input.data_quality.has_flags() {
        recs.push("Resolve the flagged data-quality issues before relying on this estimate".into());
    }
    if input.health.overall_score < dec!(60) {
        recs.push("Strengthen financial health before a sale or capital raise".into());
    }
    if r.net_profit_margin < dec!(10) {
        recs.push("Improve profit margins to lift the earnings-based valuation".into());
    }
    if r.revenue_growth_rate < dec!(5) {
        recs.push("Build a credible growth plan; buyers pay higher multiples for growing revenue".into());
    }
    if r.debt_to_equity > dec!(2) {
        recs.push("Reduce debt to improve the equity value and lower perceived risk".into());
    }
    if confidence < dec!(50) {
        recs.push("Obtain a professional appraisal; the evidence behind this estimate is limited".into());
    }
    if recs.is_empty() {
        recs.push("Document the drivers of current performance to support the valuation in negotiations".into());
    }
    recs
}

fn risk_factors(input: &ValuationInput) -> Vec<String> {
    let mut risks = Vec::new();
    let r = &input.ratios;

    if let Some(years) = input.years_in_business() {
        if years < 3 {
            risks.push(format!("Limited operating history ({years} years)"));
        }
    }
    if input.net_income <= Decimal::ZERO {
        risks.push("Business is not currently profitable".into());
    }
    if r.revenue_growth_rate < Decimal::ZERO {
        risks.push("Revenue is declining".into());
    }
    if r.debt_to_equity > dec!(2) {
        risks.push("High leverage relative to equity".into());
    }
    if matches!(input.health.risk_level, RiskLevel::High | RiskLevel::Critical) {
        risks.push(format!(
            "Weak financial health ({} risk)",
            input.health.risk_level
        ));
    }
    if input.qualitative.market_position == Some(MarketPosition::Weak) {
        risks.push("Weak competitive position".into());
    }
    if input.qualitative.growth_stage == Some(GrowthStage::Decline) {
        risks.push("Business is in a declining stage".into());
    }
    for tag in &input.qualitative.risk_factors {
        risks.push(format!("Reported risk: {tag}"));
    }
    if input.data_quality.has_flags() {
        risks.push("Reported figures contain inconsistencies or outliers".into());
    }
    risks
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
