use bizlens_core::analysis::health::{
    calculate_health_score, classify_risk, score_categories, RiskLevel, HEALTH_RULES,
};
use bizlens_core::analysis::ratios::FinancialRatios;
use bizlens_core::statements::{build_statement, BusinessProfile};
use bizlens_core::{BusinessContext, EstimationConstants};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn strong_ratios() -> FinancialRatios {
    FinancialRatios {
        gross_profit_margin: dec!(55),
        operating_margin: dec!(25),
        net_profit_margin: dec!(20),
        return_on_assets: dec!(12),
        return_on_equity: dec!(22),
        current_ratio: dec!(2.5),
        quick_ratio: dec!(1.8),
        cash_ratio: dec!(0.6),
        asset_turnover: dec!(2.2),
        inventory_turnover: dec!(12),
        receivables_turnover: dec!(14),
        debt_to_equity: dec!(0.3),
        debt_to_assets: dec!(20),
        interest_coverage: dec!(15),
        revenue_growth_rate: dec!(25),
        profit_growth_rate: dec!(18),
        asset_growth_rate: dec!(12),
    }
}

fn distressed_ratios() -> FinancialRatios {
    FinancialRatios {
        net_profit_margin: dec!(-8),
        current_ratio: dec!(0.6),
        debt_to_equity: dec!(3.5),
        debt_to_assets: dec!(78),
        interest_coverage: dec!(0.5),
        revenue_growth_rate: dec!(-12),
        profit_growth_rate: dec!(-30),
        asset_growth_rate: dec!(-4),
        ..Default::default()
    }
}

// ===========================================================================
// Score bounds and risk classification
// ===========================================================================

#[test]
fn test_strong_business_scores_high() {
    let h = calculate_health_score(&strong_ratios());
    assert_eq!(h.overall_score, dec!(100));
    assert_eq!(h.risk_level, RiskLevel::Low);
    assert!(h.weaknesses.is_empty());
    assert!(h.strengths.contains(&"Rapid revenue growth".to_string()));
}

#[test]
fn test_distressed_business_scores_critical() {
    let h = calculate_health_score(&distressed_ratios());
    assert_eq!(h.risk_level, RiskLevel::Critical);
    assert_eq!(h.category_scores.leverage, Decimal::ZERO);
    assert!(h
        .weaknesses
        .contains(&"Business is operating at a loss".to_string()));
    assert!(h.recommendations.len() >= 5);
}

#[test]
fn test_scores_stay_within_bounds() {
    let extremes = [
        strong_ratios(),
        distressed_ratios(),
        FinancialRatios::default(),
        FinancialRatios {
            gross_profit_margin: dec!(1_000_000),
            current_ratio: dec!(1_000_000),
            inventory_turnover: dec!(1_000_000),
            revenue_growth_rate: dec!(1_000_000),
            debt_to_equity: dec!(-1_000_000),
            ..Default::default()
        },
    ];
    for ratios in &extremes {
        let h = calculate_health_score(ratios);
        assert!(h.overall_score >= Decimal::ZERO && h.overall_score <= dec!(100));
        for score in score_categories(ratios).as_array() {
            assert!(score >= Decimal::ZERO && score <= dec!(100), "score {score}");
        }
    }
}

#[test]
fn test_risk_level_monotonic() {
    let mut previous = RiskLevel::Critical;
    for score in 0..=100 {
        let level = classify_risk(Decimal::from(score));
        assert!(level <= previous, "risk rose at score {score}");
        previous = level;
    }
    assert_eq!(classify_risk(dec!(80)), RiskLevel::Low);
    assert_eq!(classify_risk(dec!(79)), RiskLevel::Medium);
    assert_eq!(classify_risk(dec!(60)), RiskLevel::Medium);
    assert_eq!(classify_risk(dec!(59)), RiskLevel::High);
    assert_eq!(classify_risk(dec!(40)), RiskLevel::High);
    assert_eq!(classify_risk(dec!(39)), RiskLevel::Critical);
}

// ===========================================================================
// Narrative rules
// ===========================================================================

#[test]
fn test_rule_names_are_unique() {
    let mut names: Vec<&str> = HEALTH_RULES.iter().map(|r| r.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), HEALTH_RULES.len());
}

#[test]
fn test_narrative_is_deterministic() {
    let first = calculate_health_score(&distressed_ratios());
    let second = calculate_health_score(&distressed_ratios());
    assert_eq!(first, second);
}

#[test]
fn test_estimated_statement_scores() {
    let profile = BusinessProfile {
        annual_revenue: Some(dec!(500_000)),
        monthly_profit: Some(dec!(4_000)),
        ..Default::default()
    };
    let constants = EstimationConstants::default();
    let statement = build_statement(&profile, &constants);

    let mut ctx = BusinessContext::with_constants(constants);
    ctx.import_statement(statement.clone());

    let from_context = ctx.calculate_health_score(None).unwrap();
    let explicit = ctx.calculate_health_score(Some(&statement)).unwrap();
    assert_eq!(from_context, explicit);
    assert!(!from_context.recommendations.is_empty());
}
