use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use bizlens_core::report::{generate_report, ReportOptions};
use bizlens_core::EstimationConstants;

use super::request::{AnalysisRequest, InputArgs};
use super::valuation::industry_table;

/// Arguments for the full report
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Skip forecast and valuation, as for a caller without advanced access
    #[arg(long)]
    pub basic: bool,

    /// Forecast horizon in months
    #[arg(long, default_value_t = 12)]
    pub months: u32,

    /// Revenue multiple to use instead of the industry table
    #[arg(long)]
    pub multiple: Option<Decimal>,
}

pub fn run_report(
    args: ReportArgs,
    constants: EstimationConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = AnalysisRequest::load(&args.source)?;
    let options = ReportOptions {
        months: args.months,
        valuation_year: request.valuation_year,
    };
    let (context, profile) = request.into_context(constants);
    let profile = AnalysisRequest::require_profile(profile)?;

    let advanced = !args.basic;
    let output = generate_report(
        &context,
        &profile,
        &advanced,
        &industry_table(args.multiple),
        &options,
    )?;
    Ok(serde_json::to_value(output)?)
}
