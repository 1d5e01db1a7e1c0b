use chrono::{Datelike, Utc};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use bizlens_core::valuation::{estimate_valuation, IndustryMultipleTable, ValuationInput};
use bizlens_core::EstimationConstants;

use super::request::{AnalysisRequest, InputArgs};

/// Arguments for business valuation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ValuationArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Revenue multiple to use instead of the industry table (e.g. 1.8)
    #[arg(long)]
    pub multiple: Option<Decimal>,
}

/// The bundled industry table, or a single multiple for every industry.
pub fn industry_table(multiple: Option<Decimal>) -> IndustryMultipleTable {
    match multiple {
        Some(m) => IndustryMultipleTable::new(Vec::new(), m),
        None => IndustryMultipleTable::default(),
    }
}

pub fn current_year() -> i32 {
    Utc::now().year()
}

pub fn run_valuation(
    args: ValuationArgs,
    constants: EstimationConstants,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = AnalysisRequest::load(&args.source)?;
    let valuation_year = request.valuation_year.unwrap_or_else(current_year);
    let (context, profile) = request.into_context(constants);
    let profile = AnalysisRequest::require_profile(profile)?;

    let table = industry_table(args.multiple);
    let input = ValuationInput::from_context(&context, &profile, &table, valuation_year)?;
    let output = estimate_valuation(&input)?;
    Ok(serde_json::to_value(output)?)
}
