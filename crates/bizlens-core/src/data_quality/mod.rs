//! Plausibility checks on the raw business profile.
//!
//! Nothing here blocks an analysis. Outliers and consistency flags are
//! reported alongside the results so a reviewer can decide whether the
//! inputs need correcting.

pub mod benchmarks;
pub mod completeness;
pub mod consistency;
pub mod outliers;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use benchmarks::{lookup_benchmark, IndustryBenchmark, FALLBACK_CATEGORY};
pub use completeness::{calculate_data_completeness, DataCompleteness};
pub use consistency::{validate_data_consistency, ConsistencyFlag};
pub use outliers::{detect_outliers, OutlierTag};

use crate::statements::BusinessProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub completeness: DataCompleteness,
    pub outliers: Vec<OutlierTag>,
    pub consistency_flags: Vec<ConsistencyFlag>,
    pub benchmark: IndustryBenchmark,
}

impl DataQualityReport {
    pub fn has_flags(&self) -> bool {
        !self.outliers.is_empty() || !self.consistency_flags.is_empty()
    }

    /// Every outlier and consistency flag as a human-readable line.
    pub fn flag_messages(&self) -> Vec<String> {
        self.outliers
            .iter()
            .map(|t| format!("Outlier: {t}"))
            .chain(
                self.consistency_flags
                    .iter()
                    .map(|f| format!("Inconsistent data: {f}")),
            )
            .collect()
    }
}

pub fn assess_data_quality(profile: &BusinessProfile) -> DataQualityReport {
    let report = DataQualityReport {
        completeness: calculate_data_completeness(profile),
        outliers: detect_outliers(profile),
        consistency_flags: validate_data_consistency(profile),
        benchmark: lookup_benchmark(profile.category.as_deref()),
    };

    for tag in &report.outliers {
        warn!(outlier = %tag, category = %report.benchmark.category, "profile value looks unusual");
    }
    for flag in &report.consistency_flags {
        warn!(flag = %flag, "profile figures are inconsistent");
    }

    report
}
