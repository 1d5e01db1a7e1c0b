use bizlens_core::statements::{BusinessProfile, GrowthStage, MarketPosition, QualitativeFactors};
use bizlens_core::valuation::{
    estimate_valuation, AdjustmentDimension, IndustryMultipleTable, IndustryMultiples,
    ValuationInput, ValuationMethod, ValuationResult, DEFAULT_REVENUE_MULTIPLE,
};
use bizlens_core::{AnalysisError, BusinessContext};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn cafe() -> BusinessProfile {
    BusinessProfile {
        name: Some("Harbour Cafe".into()),
        category: Some("RESTAURANT".into()),
        industry: Some("Restaurant".into()),
        annual_revenue: Some(dec!(600_000)),
        monthly_profit: Some(dec!(6_000)),
        employees: Some(9),
        established: Some(2016),
        ..Default::default()
    }
}

fn context_for(profiles: &[(i32, BusinessProfile)]) -> BusinessContext {
    let mut ctx = BusinessContext::new();
    for (year, profile) in profiles {
        let date = Utc.with_ymd_and_hms(*year, 12, 31, 0, 0, 0).unwrap();
        ctx.import_profile_at(profile, date);
    }
    ctx
}

fn value(profile: &BusinessProfile) -> ValuationResult {
    let ctx = context_for(&[(2024, profile.clone())]);
    let input =
        ValuationInput::from_context(&ctx, profile, &IndustryMultipleTable::default(), 2025)
            .unwrap();
    estimate_valuation(&input).unwrap().result
}

#[test]
fn test_input_from_context() {
    let ctx = context_for(&[(2024, cafe())]);
    let input =
        ValuationInput::from_context(&ctx, &cafe(), &IndustryMultipleTable::default(), 2025)
            .unwrap();
    assert_eq!(input.revenue, dec!(600_000));
    assert_eq!(input.net_income, dec!(72_000));
    // 72k x 1.2 operating cash flow, 85% free
    assert_eq!(input.free_cash_flow, dec!(73_440));
    assert_eq!(input.industry_multiple, dec!(0.8));
    assert_eq!(input.years_in_business(), Some(9));
    assert_eq!(input.data_quality.benchmark.category, "RESTAURANT");
}

#[test]
fn test_empty_context_has_no_input() {
    let err = ValuationInput::from_context(
        &BusinessContext::new(),
        &cafe(),
        &IndustryMultipleTable::default(),
        2025,
    )
    .unwrap_err();
    assert!(matches!(err, AnalysisError::NoStatement));
}

#[test]
fn test_all_methods_contribute() {
    let v = value(&cafe());
    let names: Vec<ValuationMethod> = v.methods.iter().map(|m| m.name).collect();
    assert_eq!(
        names,
        vec![
            ValuationMethod::RevenueMultiple,
            ValuationMethod::EarningsMultiple,
            ValuationMethod::DiscountedCashFlow,
            ValuationMethod::Comparable,
            ValuationMethod::AssetBased,
        ]
    );
    assert_eq!(v.methods[0].value, dec!(480_000));
    assert_eq!(v.methods[4].value, dec!(360_000));
    assert!(v.estimated_value > Decimal::ZERO);
    assert_eq!(v.estimated_value, v.estimated_value.round_dp(2));
}

#[test]
fn test_qualitative_factors_scale_value() {
    let base = value(&cafe());

    let mut leader = cafe();
    leader.qualitative = QualitativeFactors {
        market_position: Some(MarketPosition::Leader),
        growth_stage: Some(GrowthStage::Growth),
        risk_factors: Vec::new(),
    };
    let boosted = value(&leader);

    let mut risky = cafe();
    risky.qualitative = QualitativeFactors {
        market_position: Some(MarketPosition::Weak),
        growth_stage: Some(GrowthStage::Decline),
        risk_factors: vec!["lease expiring".into(), "key chef".into()],
    };
    let discounted = value(&risky);

    assert!(boosted.estimated_value > base.estimated_value);
    assert!(discounted.estimated_value < base.estimated_value);
    assert_eq!(
        boosted.adjustment_factors[&AdjustmentDimension::MarketPosition],
        dec!(1.15)
    );
    assert_eq!(
        discounted.adjustment_factors[&AdjustmentDimension::RiskFactors],
        dec!(0.94)
    );
    assert!(discounted
        .risk_factors
        .contains(&"Reported risk: key chef".to_string()));
}

#[test]
fn test_young_business_flagged() {
    let mut young = cafe();
    young.established = Some(2024);
    let v = value(&young);
    assert!(v.risk_factors.iter().any(|r| r.starts_with("Limited operating history")));
}

#[test]
fn test_range_and_confidence_bounds() {
    for profile in [cafe(), BusinessProfile::default()] {
        let v = value(&profile);
        assert!(v.confidence_score >= dec!(10) && v.confidence_score <= dec!(95));
        assert!(v.range.low <= v.estimated_value);
        assert!(v.range.high >= v.estimated_value);
        assert!(!v.recommendations.is_empty());
    }
}

#[test]
fn test_valuation_is_deterministic() {
    assert_eq!(value(&cafe()), value(&cafe()));
}

#[test]
fn test_result_json_round_trip() {
    let v = value(&cafe());
    let json = serde_json::to_string(&v).unwrap();
    assert!(json.contains("\"market_position\""));
    let back: ValuationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(v, back);
}

struct FlatMultiple;

impl IndustryMultiples for FlatMultiple {
    fn revenue_multiple(&self, _industry: Option<&str>) -> Decimal {
        dec!(1)
    }
}

#[test]
fn test_custom_industry_source() {
    let ctx = context_for(&[(2024, cafe())]);
    let input = ValuationInput::from_context(&ctx, &cafe(), &FlatMultiple, 2025).unwrap();
    assert_eq!(input.industry_multiple, Decimal::ONE);
    assert_ne!(input.industry_multiple, DEFAULT_REVENUE_MULTIPLE);
}
