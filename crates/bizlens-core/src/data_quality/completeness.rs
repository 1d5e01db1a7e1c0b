use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::arithmetic::safe_divide;
use crate::statements::BusinessProfile;
use crate::types::Ratio;

/// Share of populated profile fields, overall and per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCompleteness {
    pub overall: Ratio,
    pub financial: Ratio,
    pub operational: Ratio,
    pub market: Ratio,
    /// Names of the fields that were absent or blank.
    pub missing_fields: Vec<String>,
}

type FieldCheck = (&'static str, fn(&BusinessProfile) -> bool);

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

const FINANCIAL_FIELDS: &[FieldCheck] = &[
    ("annual_revenue", |p| p.annual_revenue.is_some()),
    ("monthly_revenue", |p| p.monthly_revenue.is_some()),
    ("monthly_profit", |p| p.monthly_profit.is_some()),
    ("annual_profit", |p| p.annual_profit.is_some()),
    ("ebitda", |p| p.ebitda.is_some()),
    ("cash_flow", |p| p.cash_flow.is_some()),
    ("assets", |p| p.assets.is_some()),
    ("liabilities", |p| p.liabilities.is_some()),
];

const OPERATIONAL_FIELDS: &[FieldCheck] = &[
    ("business_type", |p| has_text(&p.business_type)),
    ("employees", |p| p.employees.is_some()),
    ("established", |p| p.established.is_some()),
    ("yearly_growth", |p| p.yearly_growth.is_some()),
];

const MARKET_FIELDS: &[FieldCheck] = &[
    ("name", |p| has_text(&p.name)),
    ("industry", |p| has_text(&p.industry)),
    ("category", |p| has_text(&p.category)),
    ("market_position", |p| p.qualitative.market_position.is_some()),
    ("growth_stage", |p| p.qualitative.growth_stage.is_some()),
];

fn populated(profile: &BusinessProfile, fields: &[FieldCheck], missing: &mut Vec<String>) -> usize {
    fields
        .iter()
        .filter(|(name, check)| {
            let present = check(profile);
            if !present {
                missing.push((*name).to_string());
            }
            present
        })
        .count()
}

fn fraction(count: usize, total: usize) -> Ratio {
    safe_divide(Decimal::from(count as u64), Decimal::from(total as u64))
}

pub fn calculate_data_completeness(profile: &BusinessProfile) -> DataCompleteness {
    let mut missing_fields = Vec::new();
    let financial = populated(profile, FINANCIAL_FIELDS, &mut missing_fields);
    let operational = populated(profile, OPERATIONAL_FIELDS, &mut missing_fields);
    let market = populated(profile, MARKET_FIELDS, &mut missing_fields);

    let total = FINANCIAL_FIELDS.len() + OPERATIONAL_FIELDS.len() + MARKET_FIELDS.len();

    DataCompleteness {
        overall: fraction(financial + operational + market, total),
        financial: fraction(financial, FINANCIAL_FIELDS.len()),
        operational: fraction(operational, OPERATIONAL_FIELDS.len()),
        market: fraction(market, MARKET_FIELDS.len()),
        missing_fields,
    }
}
