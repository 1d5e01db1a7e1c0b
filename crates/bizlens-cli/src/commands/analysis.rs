use clap::Args;
use serde_json::Value;

use bizlens_core::analysis::trend::analyze_standard_trends;
use bizlens_core::data_quality::assess_data_quality;
use bizlens_core::statements::Metric;
use bizlens_core::{AnalysisError, EstimationConstants};

use super::request::{AnalysisRequest, InputArgs};

/// Arguments for commands that only need the analysis request
#[derive(Args)]
pub struct RequestArgs {
    #[command(flatten)]
    pub source: InputArgs,
}

/// Arguments for trend analysis
#[derive(Args)]
pub struct TrendArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Metric to analyse, e.g. revenue or net_income (default: revenue,
    /// net income, cash flow and total assets)
    #[arg(long)]
    pub metric: Option<Metric>,
}

pub fn run_statement(
    args: RequestArgs,
    constants: EstimationConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (context, _) = AnalysisRequest::load(&args.source)?.into_context(constants);
    let statement = context.current().ok_or(AnalysisError::NoStatement)?;
    Ok(serde_json::to_value(statement)?)
}

pub fn run_ratios(
    args: RequestArgs,
    constants: EstimationConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (context, _) = AnalysisRequest::load(&args.source)?.into_context(constants);
    let ratios = context.calculate_financial_ratios(None)?;
    Ok(serde_json::to_value(ratios)?)
}

pub fn run_trend(
    args: TrendArgs,
    constants: EstimationConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (context, _) = AnalysisRequest::load(&args.source)?.into_context(constants);
    match args.metric {
        Some(metric) => Ok(serde_json::to_value(context.analyze_trend(metric)?)?),
        None => Ok(serde_json::to_value(analyze_standard_trends(
            context.history(),
        )?)?),
    }
}

pub fn run_health(
    args: RequestArgs,
    constants: EstimationConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (context, _) = AnalysisRequest::load(&args.source)?.into_context(constants);
    let health = context.calculate_health_score(None)?;
    Ok(serde_json::to_value(health)?)
}

pub fn run_cash_flow(
    args: RequestArgs,
    constants: EstimationConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (context, _) = AnalysisRequest::load(&args.source)?.into_context(constants);
    let output = context.analyze_cash_flow(None)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_quality(
    args: RequestArgs,
    constants: EstimationConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (_, profile) = AnalysisRequest::load(&args.source)?.into_context(constants);
    let profile = AnalysisRequest::require_profile(profile)?;
    Ok(serde_json::to_value(assess_data_quality(&profile))?)
}
