//! Full-pipeline report for one business.
//!
//! Forecast and valuation are advanced analyses: they run only when the
//! caller's [`FeatureGate`] allows it. Everything else always runs.

use std::time::Instant;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::cash_flow::CashFlowAnalysis;
use crate::analysis::health::{calculate_health_score, FinancialHealthScore};
use crate::analysis::ratios::FinancialRatios;
use crate::analysis::trend::{analyze_standard_trends, TrendAnalysis};
use crate::data_quality::{assess_data_quality, DataQualityReport};
use crate::error::AnalysisError;
use crate::forecast::FinancialForecast;
use crate::session::BusinessContext;
use crate::statements::{BusinessProfile, FinancialStatement};
use crate::types::{with_metadata, ComputationOutput};
use crate::valuation::{estimate_valuation, IndustryMultiples, ValuationInput, ValuationResult};
use crate::AnalysisResult;

/// Entitlement check for advanced analysis.
pub trait FeatureGate {
    fn allows_advanced_analysis(&self) -> bool;
}

impl FeatureGate for bool {
    fn allows_advanced_analysis(&self) -> bool {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Forecast horizon in months.
    pub months: u32,
    /// Year used for years-in-business. Defaults to the current statement's
    /// year.
    pub valuation_year: Option<i32>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            months: 12,
            valuation_year: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessReport {
    pub statement: FinancialStatement,
    pub ratios: FinancialRatios,
    pub health_score: FinancialHealthScore,
    pub cash_flow: CashFlowAnalysis,
    pub trends: Vec<TrendAnalysis>,
    pub data_quality: DataQualityReport,
    pub forecast: Option<FinancialForecast>,
    pub valuation: Option<ValuationResult>,
}

/// Run every analysis for the context's current statement.
///
/// `profile` is the raw input behind the current statement; it feeds the
/// data-quality checks and the valuation's qualitative adjustments.
pub fn generate_report(
    context: &BusinessContext,
    profile: &BusinessProfile,
    gate: &dyn FeatureGate,
    industry: &dyn IndustryMultiples,
    options: &ReportOptions,
) -> AnalysisResult<ComputationOutput<BusinessReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let statement = context.current().ok_or(AnalysisError::NoStatement)?;
    let ratios = context.calculate_financial_ratios(Some(statement))?;
    let health_score = calculate_health_score(&ratios);

    let cash_flow = context.analyze_cash_flow(Some(statement))?;
    warnings.extend(cash_flow.warnings.iter().map(|w| format!("[Cash flow] {w}")));

    let history = context.history();
    let trends = if history.len() >= 2 {
        analyze_standard_trends(history)?
    } else {
        warnings.push(format!(
            "Trend analysis needs at least 2 statements; {} available",
            history.len()
        ));
        Vec::new()
    };

    let data_quality = assess_data_quality(profile);
    warnings.extend(data_quality.flag_messages());

    // A failed advanced section is omitted with a warning; the rest of the
    // report stands.
    let (forecast, valuation) = if gate.allows_advanced_analysis() {
        let forecast = match context.generate_forecast(options.months) {
            Ok(f) => Some(f),
            Err(e) => {
                warn!(error = %e, "forecast omitted from report");
                warnings.push(format!("[Forecast] {e}"));
                None
            }
        };

        let valuation_year = options.valuation_year.unwrap_or(statement.date.year());
        let valuation = ValuationInput::from_context(context, profile, industry, valuation_year)
            .and_then(|input| estimate_valuation(&input));
        let valuation = match valuation {
            Ok(v) => {
                warnings.extend(v.warnings.iter().map(|w| format!("[Valuation] {w}")));
                Some(v.result)
            }
            Err(e) => {
                warn!(error = %e, "valuation omitted from report");
                warnings.push(format!("[Valuation] {e}"));
                None
            }
        };
        (forecast, valuation)
    } else {
        warnings.push("Advanced analysis not enabled: forecast and valuation omitted".into());
        (None, None)
    };

    tracing::debug!(
        history_len = history.len(),
        overall_score = %health_score.overall_score,
        advanced = forecast.is_some(),
        "report generated"
    );

    let report = BusinessReport {
        statement: statement.clone(),
        ratios,
        health_score,
        cash_flow: cash_flow.result,
        trends,
        data_quality,
        forecast,
        valuation,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Statement estimation, ratio analysis, health scoring, cash flow, trends, forecast and valuation",
        options,
        warnings,
        elapsed,
        report,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
