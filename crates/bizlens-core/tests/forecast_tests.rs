use bizlens_core::forecast::FinancialForecast;
use bizlens_core::statements::FinancialStatement;
use bizlens_core::{AnalysisError, BusinessContext, EstimationConstants};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn statement(year: i32, revenue: Decimal, net_income: Decimal) -> FinancialStatement {
    FinancialStatement {
        revenue,
        net_income,
        date: Utc.with_ymd_and_hms(year, 6, 30, 0, 0, 0).unwrap(),
        ..Default::default()
    }
}

fn growing_context(constants: EstimationConstants) -> BusinessContext {
    let mut ctx = BusinessContext::with_constants(constants);
    ctx.import_statement(statement(2023, dec!(200_000), dec!(20_000)));
    ctx.import_statement(statement(2024, dec!(250_000), dec!(25_000)));
    ctx
}

#[test]
fn test_forecast_from_context() {
    let ctx = growing_context(EstimationConstants::default());
    let f = ctx.generate_forecast(12).unwrap();

    // 25% growth on 250k, 10% margin, 1.2x cash conversion
    assert_eq!(f.projected_revenue, dec!(312_500));
    assert_eq!(f.projected_profit, dec!(31_250));
    assert_eq!(f.projected_cash_flow, dec!(37_500));
}

#[test]
fn test_scenarios_bracket_realistic_case() {
    let ctx = growing_context(EstimationConstants::default());
    let s = ctx.generate_forecast(24).unwrap().scenario_analysis;

    assert!(s.optimistic.revenue > s.realistic.revenue);
    assert!(s.realistic.revenue > s.pessimistic.revenue);
    assert!(s.optimistic.profit > s.realistic.profit);
    assert!(s.realistic.profit > s.pessimistic.profit);
}

#[test]
fn test_overridden_forecast_constants() {
    let constants: EstimationConstants = serde_json::from_str(
        r#"{ "forecast": { "cash_flow_to_profit": "1.0", "optimistic_revenue": "1.5" } }"#,
    )
    .unwrap();
    // untouched sections keep their defaults
    assert_eq!(constants.proxies, EstimationConstants::default().proxies);

    let ctx = growing_context(constants);
    let f = ctx.generate_forecast(12).unwrap();
    assert_eq!(f.projected_cash_flow, f.projected_profit);
    assert_eq!(f.scenario_analysis.optimistic.revenue, dec!(468_750));
    assert_eq!(f.scenario_analysis.pessimistic.revenue, dec!(250_000));
}

#[test]
fn test_forecast_errors() {
    let empty = BusinessContext::new();
    assert!(matches!(
        empty.generate_forecast(12),
        Err(AnalysisError::NoCurrentStatement)
    ));

    let ctx = growing_context(EstimationConstants::default());
    assert!(matches!(
        ctx.generate_forecast(0),
        Err(AnalysisError::InvalidInput { .. })
    ));
}

#[test]
fn test_forecast_json_round_trip() {
    let ctx = growing_context(EstimationConstants::default());
    let f = ctx.generate_forecast(18).unwrap();
    let json = serde_json::to_string(&f).unwrap();
    let back: FinancialForecast = serde_json::from_str(&json).unwrap();
    assert_eq!(f, back);
}
