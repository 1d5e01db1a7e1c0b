use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::arithmetic::{coefficient_of_variation, safe_percent};
use crate::error::AnalysisError;
use crate::statements::{chronological, FinancialStatement, Metric};
use crate::types::{Money, Percent, Score};
use crate::AnalysisResult;

/// Changes smaller than this (in percent, either direction) count as stable.
const STABLE_BAND: Decimal = dec!(2);
const LOW_VOLATILITY_CV: Decimal = dec!(0.1);
const MEDIUM_VOLATILITY_CV: Decimal = dec!(0.3);
/// Points needed before volatility is measured rather than assumed medium.
const MIN_VOLATILITY_POINTS: usize = 3;

const BASE_CONFIDENCE: Score = dec!(50);
const MIN_CONFIDENCE: Score = dec!(20);
const MAX_CONFIDENCE: Score = dec!(95);

/// Metrics summarised in every full report.
pub const STANDARD_TREND_METRICS: [Metric; 4] = [
    Metric::Revenue,
    Metric::NetIncome,
    Metric::CashFlow,
    Metric::TotalAssets,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

/// Movement of one metric between the two most recent statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub metric: Metric,
    pub current_value: Money,
    pub previous_value: Money,
    pub change_amount: Money,
    pub change_percent: Percent,
    pub trend: TrendDirection,
    pub volatility: Volatility,
    /// Next-period value if the latest change repeats.
    pub projection: Money,
    pub confidence: Score,
}

/// Compare the two most recent statements for `metric`.
pub fn analyze_trend(
    history: &[FinancialStatement],
    metric: Metric,
) -> AnalysisResult<TrendAnalysis> {
    let sorted = chronological(history);
    if sorted.len() < 2 {
        return Err(AnalysisError::InsufficientHistory {
            required: 2,
            available: sorted.len(),
        });
    }

    let current_value = sorted[sorted.len() - 1].value(metric);
    let previous_value = sorted[sorted.len() - 2].value(metric);
    let change_amount = current_value.saturating_sub(previous_value);
    let change_percent = safe_percent(change_amount, previous_value);

    let trend = if change_percent.abs() < STABLE_BAND {
        TrendDirection::Stable
    } else if change_percent > Decimal::ZERO {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    let values: Vec<Money> = sorted.iter().map(|s| s.value(metric)).collect();
    let volatility = classify_volatility(&values);
    let projection = current_value.saturating_mul(Decimal::ONE + change_percent / dec!(100));

    let mut confidence = BASE_CONFIDENCE;
    if values.len() >= 4 {
        confidence += dec!(20);
    }
    match volatility {
        Volatility::Low => confidence += dec!(20),
        Volatility::High => confidence -= dec!(20),
        Volatility::Medium => {}
    }
    let confidence = confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);

    tracing::debug!(%metric, %change_percent, ?trend, ?volatility, "trend analysed");

    Ok(TrendAnalysis {
        metric,
        current_value,
        previous_value,
        change_amount,
        change_percent,
        trend,
        volatility,
        projection,
        confidence,
    })
}

/// Run [`analyze_trend`] for each of [`STANDARD_TREND_METRICS`].
pub fn analyze_standard_trends(
    history: &[FinancialStatement],
) -> AnalysisResult<Vec<TrendAnalysis>> {
    STANDARD_TREND_METRICS
        .iter()
        .map(|&m| analyze_trend(history, m))
        .collect()
}

/// Classify dispersion by coefficient of variation. Fewer than three points
/// is not enough to tell, so the answer is medium.
pub fn classify_volatility(values: &[Decimal]) -> Volatility {
    if values.len() < MIN_VOLATILITY_POINTS {
        return Volatility::Medium;
    }
    let cv = coefficient_of_variation(values);
    if cv < LOW_VOLATILITY_CV {
        Volatility::Low
    } else if cv < MEDIUM_VOLATILITY_CV {
        Volatility::Medium
    } else {
        Volatility::High
    }
}
