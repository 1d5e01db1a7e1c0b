use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::health::RiskLevel;
use crate::statements::{GrowthStage, MarketPosition, QualitativeFactors};
use crate::types::Multiple;

const RISK_FACTOR_PENALTY: Decimal = dec!(0.03);
const RISK_FACTOR_FLOOR: Multiple = dec!(0.70);

/// Qualitative dimension that scales the base valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDimension {
    MarketPosition,
    GrowthStage,
    RiskFactors,
    FinancialHealth,
}

pub fn market_position_factor(position: MarketPosition) -> Multiple {
    match position {
        MarketPosition::Leader => dec!(1.15),
        MarketPosition::Strong => dec!(1.05),
        MarketPosition::Average => dec!(1.00),
        MarketPosition::Weak => dec!(0.90),
    }
}

pub fn growth_stage_factor(stage: GrowthStage) -> Multiple {
    match stage {
        GrowthStage::Startup => dec!(0.85),
        GrowthStage::Growth => dec!(1.10),
        GrowthStage::Mature => dec!(1.00),
        GrowthStage::Decline => dec!(0.80),
    }
}

/// 3% off per reported risk, never below 0.70.
pub fn risk_tags_factor(risk_count: usize) -> Multiple {
    let penalty = RISK_FACTOR_PENALTY * Decimal::from(risk_count as u64);
    (Decimal::ONE - penalty).max(RISK_FACTOR_FLOOR)
}

pub fn financial_health_factor(risk: RiskLevel) -> Multiple {
    match risk {
        RiskLevel::Low => dec!(1.05),
        RiskLevel::Medium => dec!(1.00),
        RiskLevel::High => dec!(0.90),
        RiskLevel::Critical => dec!(0.75),
    }
}

/// All four factors. Missing qualitative answers count as the neutral
/// choice (average position, mature stage).
pub fn adjustment_factors(
    qualitative: &QualitativeFactors,
    risk: RiskLevel,
) -> BTreeMap<AdjustmentDimension, Multiple> {
    BTreeMap::from([
        (
            AdjustmentDimension::MarketPosition,
            market_position_factor(qualitative.market_position.unwrap_or_default()),
        ),
        (
            AdjustmentDimension::GrowthStage,
            growth_stage_factor(qualitative.growth_stage.unwrap_or_default()),
        ),
        (
            AdjustmentDimension::RiskFactors,
            risk_tags_factor(qualitative.risk_factors.len()),
        ),
        (
            AdjustmentDimension::FinancialHealth,
            financial_health_factor(risk),
        ),
    ])
}

/// Product of every factor.
pub fn combined_factor(factors: &BTreeMap<AdjustmentDimension, Multiple>) -> Multiple {
    factors.values().copied().product()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_profile() {
        let factors = adjustment_factors(&QualitativeFactors::default(), RiskLevel::Medium);
        assert_eq!(factors.len(), 4);
        assert_eq!(combined_factor(&factors), Decimal::ONE);
    }

    #[test]
    fn test_risk_factor_floor() {
        assert_eq!(risk_tags_factor(0), Decimal::ONE);
        assert_eq!(risk_tags_factor(2), dec!(0.94));
        assert_eq!(risk_tags_factor(10), RISK_FACTOR_FLOOR);
        assert_eq!(risk_tags_factor(50), RISK_FACTOR_FLOOR);
    }

    #[test]
    fn test_combined_factor() {
        let qualitative = QualitativeFactors {
            market_position: Some(MarketPosition::Leader),
            growth_stage: Some(GrowthStage::Growth),
            risk_factors: vec!["key person".into()],
        };
        let factors = adjustment_factors(&qualitative, RiskLevel::Low);
        // 1.15 x 1.10 x 0.97 x 1.05
        assert_eq!(combined_factor(&factors), dec!(1.15) * dec!(1.10) * dec!(0.97) * dec!(1.05));
        assert_eq!(factors[&AdjustmentDimension::RiskFactors], dec!(0.97));
    }
}
