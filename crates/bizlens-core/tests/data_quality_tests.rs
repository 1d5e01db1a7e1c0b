use bizlens_core::data_quality::{
    assess_data_quality, calculate_data_completeness, detect_outliers, lookup_benchmark,
    validate_data_consistency, ConsistencyFlag, DataQualityReport, OutlierTag,
};
use bizlens_core::statements::BusinessProfile;
use bizlens_core::BusinessContext;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_restaurant_revenue_outlier() {
    let profile = BusinessProfile {
        category: Some("RESTAURANT".into()),
        annual_revenue: Some(dec!(5_000_000)),
        employees: Some(4),
        ..Default::default()
    };
    let tags = detect_outliers(&profile);
    assert!(tags.contains(&OutlierTag::RevenueUnusuallyHigh));
}

#[test]
fn test_same_revenue_is_normal_for_larger_team() {
    let profile = BusinessProfile {
        category: Some("RESTAURANT".into()),
        annual_revenue: Some(dec!(5_000_000)),
        employees: Some(40),
        ..Default::default()
    };
    assert!(detect_outliers(&profile).is_empty());
}

#[test]
fn test_profit_exceeds_revenue_is_non_blocking() {
    let profile = BusinessProfile {
        annual_revenue: Some(dec!(100_000)),
        annual_profit: Some(dec!(120_000)),
        monthly_profit: Some(dec!(10_000)),
        ..Default::default()
    };
    let flags = validate_data_consistency(&profile);
    assert!(flags.contains(&ConsistencyFlag::ProfitExceedsRevenue));

    // Analysis still runs on the same profile.
    let mut ctx = BusinessContext::new();
    ctx.import_profile(&profile);
    let health = ctx.calculate_health_score(None).unwrap();
    assert!(health.overall_score <= dec!(100));
}

#[test]
fn test_benchmark_lookup_is_case_insensitive() {
    assert_eq!(lookup_benchmark(Some("Technology")).gross_margin, dec!(0.70));
    assert_eq!(lookup_benchmark(Some("healthcare")).employee_efficiency, dec!(120_000));
    assert_eq!(lookup_benchmark(Some("unknown")).category, "OTHER");
}

#[test]
fn test_completeness_full_profile() {
    let profile: BusinessProfile = serde_json::from_str(
        r#"{
            "name": "Acme Tools",
            "businessType": "Manufacturing",
            "industry": "Manufacturing",
            "category": "MANUFACTURING",
            "annualRevenue": "2000000",
            "monthlyRevenue": "166666",
            "monthlyProfit": "15000",
            "annualProfit": "180000",
            "ebitda": "260000",
            "cashFlow": "200000",
            "assets": "1500000",
            "liabilities": "600000",
            "established": 2004,
            "employees": 14,
            "yearlyGrowth": "0.08",
            "qualitative": { "marketPosition": "Strong", "growthStage": "Mature" }
        }"#,
    )
    .unwrap();
    let c = calculate_data_completeness(&profile);
    assert_eq!(c.overall, Decimal::ONE);
    assert!(c.missing_fields.is_empty());

    let report = assess_data_quality(&profile);
    assert!(!report.has_flags(), "unexpected flags: {:?}", report.flag_messages());
}

#[test]
fn test_report_json_round_trip() {
    let profile = BusinessProfile {
        category: Some("retail".into()),
        annual_revenue: Some(dec!(9_000_000)),
        employees: Some(3),
        yearly_growth: Some(dec!(4.5)),
        assets: Some(dec!(-1)),
        ..Default::default()
    };
    let report = assess_data_quality(&profile);
    assert_eq!(
        report.outliers,
        vec![OutlierTag::RevenueUnusuallyHigh, OutlierTag::GrowthRateUnusual]
    );
    assert_eq!(report.consistency_flags, vec![ConsistencyFlag::NonPositiveAssets]);

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"revenue_unusually_high\""));
    let back: DataQualityReport = serde_json::from_str(&json).unwrap();
    assert_eq!(report, back);
}
