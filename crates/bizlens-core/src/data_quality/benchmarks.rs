use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Ratio};

/// Category used when none is given or the given one is unknown.
pub const FALLBACK_CATEGORY: &str = "OTHER";

/// `(category, gross margin, revenue per employee)`.
const BENCHMARKS: &[(&str, Ratio, Money)] = &[
    ("RESTAURANT", dec!(0.65), dec!(75_000)),
    ("RETAIL", dec!(0.35), dec!(150_000)),
    ("SERVICE", dec!(0.50), dec!(100_000)),
    ("PROFESSIONAL_SERVICES", dec!(0.60), dec!(150_000)),
    ("TECHNOLOGY", dec!(0.70), dec!(200_000)),
    ("MANUFACTURING", dec!(0.30), dec!(180_000)),
    ("HEALTHCARE", dec!(0.55), dec!(120_000)),
    ("CONSTRUCTION", dec!(0.25), dec!(200_000)),
    ("ECOMMERCE", dec!(0.40), dec!(250_000)),
    (FALLBACK_CATEGORY, dec!(0.40), dec!(120_000)),
];

/// Typical figures for a business category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryBenchmark {
    pub category: String,
    /// Gross margin as a fraction of revenue.
    pub gross_margin: Ratio,
    /// Revenue per employee.
    pub employee_efficiency: Money,
    /// True when the requested category was unknown and OTHER was used.
    pub is_fallback: bool,
}

/// Look up the benchmark for `category`, falling back to OTHER.
///
/// Matching ignores case and word separators, so "Professional Services"
/// finds PROFESSIONAL_SERVICES and "e-commerce" finds ECOMMERCE.
pub fn lookup_benchmark(category: Option<&str>) -> IndustryBenchmark {
    let key = category.map(compact).unwrap_or_default();

    let found = BENCHMARKS.iter().find(|(name, _, _)| compact(name) == key);
    let (name, gross_margin, employee_efficiency) = found
        .or_else(|| BENCHMARKS.iter().find(|(name, _, _)| *name == FALLBACK_CATEGORY))
        .copied()
        .unwrap_or((FALLBACK_CATEGORY, dec!(0.40), dec!(120_000)));

    IndustryBenchmark {
        category: name.to_string(),
        gross_margin,
        employee_efficiency,
        is_fallback: name == FALLBACK_CATEGORY && key != FALLBACK_CATEGORY,
    }
}

/// Uppercase with spaces, hyphens and underscores removed.
fn compact(category: &str) -> String {
    category
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .to_uppercase()
}
