use clap::Args;
use serde_json::Value;

use bizlens_core::EstimationConstants;

use super::request::{AnalysisRequest, InputArgs};

/// Arguments for forecasting
#[derive(Args)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Forecast horizon in months
    #[arg(long, default_value_t = 12)]
    pub months: u32,
}

pub fn run_forecast(
    args: ForecastArgs,
    constants: EstimationConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let (context, _) = AnalysisRequest::load(&args.source)?.into_context(constants);
    let forecast = context.generate_forecast(args.months)?;
    Ok(serde_json::to_value(forecast)?)
}
