use clap::Args;
use serde::Deserialize;

use bizlens_core::statements::{BusinessProfile, FinancialStatement};
use bizlens_core::{BusinessContext, EstimationConstants};

use crate::input;

/// What every subcommand reads: a profile, prior statements, or both.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    /// Imported last, so it becomes the current statement.
    pub profile: Option<BusinessProfile>,
    /// Earlier statements, oldest first.
    pub history: Vec<FinancialStatement>,
    #[serde(alias = "valuationYear")]
    pub valuation_year: Option<i32>,
}

/// Input source shared by every subcommand
#[derive(Args)]
pub struct InputArgs {
    /// Path to JSON analysis request (otherwise read from stdin)
    #[arg(long)]
    pub input: Option<String>,
}

impl AnalysisRequest {
    pub fn load(args: &InputArgs) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(ref path) = args.input {
            input::file::read_json(path)
        } else if let Some(request) = input::stdin::read_stdin()? {
            Ok(request)
        } else {
            Err("--input <file> or JSON on stdin is required".into())
        }
    }

    /// Context holding the history followed by the profile's statement.
    pub fn into_context(
        self,
        constants: EstimationConstants,
    ) -> (BusinessContext, Option<BusinessProfile>) {
        let mut context = BusinessContext::from_history(self.history, constants);
        if let Some(ref profile) = self.profile {
            context.import_profile(profile);
        }
        tracing::debug!(statements = context.history().len(), "analysis context ready");
        (context, self.profile)
    }

    pub fn require_profile(
        profile: Option<BusinessProfile>,
    ) -> Result<BusinessProfile, Box<dyn std::error::Error>> {
        profile.ok_or_else(|| "this command needs a \"profile\" in the request".into())
    }
}
