use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Multiple;

/// Revenue multiple used when no table entry matches the industry.
pub const DEFAULT_REVENUE_MULTIPLE: Multiple = dec!(2.5);

/// Source of industry revenue multiples for the valuation engine.
pub trait IndustryMultiples {
    fn revenue_multiple(&self, industry: Option<&str>) -> Multiple;
}

/// Ordered `(pattern, multiple)` table.
///
/// The first pattern contained in the industry name (ignoring case) wins,
/// so more specific patterns must come before general ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryMultipleTable {
    pub entries: Vec<(String, Multiple)>,
    pub fallback: Multiple,
}

impl IndustryMultipleTable {
    pub fn new(entries: Vec<(String, Multiple)>, fallback: Multiple) -> Self {
        Self { entries, fallback }
    }
}

impl Default for IndustryMultipleTable {
    fn default() -> Self {
        let entries = [
            ("software", dec!(5.0)),
            ("saas", dec!(5.0)),
            ("technology", dec!(4.0)),
            ("healthcare", dec!(3.0)),
            ("medical", dec!(3.0)),
            ("professional services", dec!(2.0)),
            ("consulting", dec!(2.0)),
            ("ecommerce", dec!(2.5)),
            ("e-commerce", dec!(2.5)),
            ("manufacturing", dec!(1.5)),
            ("construction", dec!(1.0)),
            ("retail", dec!(1.0)),
            ("restaurant", dec!(0.8)),
            ("food", dec!(0.8)),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(pattern, multiple)| (pattern.to_string(), multiple))
                .collect(),
            fallback: DEFAULT_REVENUE_MULTIPLE,
        }
    }
}

impl IndustryMultiples for IndustryMultipleTable {
    fn revenue_multiple(&self, industry: Option<&str>) -> Multiple {
        let Some(industry) = industry.map(str::to_lowercase) else {
            return self.fallback;
        };
        self.entries
            .iter()
            .find(|(pattern, _)| industry.contains(&pattern.to_lowercase()))
            .map(|(_, multiple)| *multiple)
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match_ignores_case() {
        let table = IndustryMultipleTable::default();
        assert_eq!(table.revenue_multiple(Some("B2B Software")), dec!(5.0));
        assert_eq!(table.revenue_multiple(Some("Fast Casual RESTAURANT")), dec!(0.8));
    }

    #[test]
    fn test_first_match_wins() {
        let table = IndustryMultipleTable::default();
        // "software" precedes "technology"
        assert_eq!(table.revenue_multiple(Some("technology / software")), dec!(5.0));
    }

    #[test]
    fn test_fallback() {
        let table = IndustryMultipleTable::default();
        assert_eq!(table.revenue_multiple(Some("Beekeeping")), DEFAULT_REVENUE_MULTIPLE);
        assert_eq!(table.revenue_multiple(None), DEFAULT_REVENUE_MULTIPLE);
    }

    #[test]
    fn test_custom_table() {
        let table = IndustryMultipleTable::new(vec![("bees".into(), dec!(1.2))], dec!(2));
        assert_eq!(table.revenue_multiple(Some("Bees and honey")), dec!(1.2));
        assert_eq!(table.revenue_multiple(Some("retail")), dec!(2));
    }
}
