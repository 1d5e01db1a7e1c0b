use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::ratios::calculate_financial_ratios;
use crate::analysis::trend::{classify_volatility, Volatility};
use crate::arithmetic::round_half_up;
use crate::constants::EstimationConstants;
use crate::error::AnalysisError;
use crate::statements::{chronological, FinancialStatement, Metric};
use crate::types::{Money, Score};
use crate::AnalysisResult;

const RICH_HISTORY_QUALITY: Score = dec!(80);
const THIN_HISTORY_QUALITY: Score = dec!(60);
const RICH_HISTORY_STATEMENTS: usize = 3;

const CONSISTENT_TREND: Score = dec!(85);
const DEFAULT_TREND_CONSISTENCY: Score = dec!(70);

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub revenue: Money,
    pub profit: Money,
    pub cash_flow: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    pub optimistic: ScenarioProjection,
    pub realistic: ScenarioProjection,
    pub pessimistic: ScenarioProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialForecast {
    /// Horizon in months.
    pub period: u32,
    pub projected_revenue: Money,
    pub projected_profit: Money,
    pub projected_cash_flow: Money,
    pub confidence: Score,
    pub assumptions: Vec<String>,
    pub scenario_analysis: ScenarioAnalysis,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project revenue, profit and cash flow `months` ahead of `current`.
///
/// Revenue grows linearly at the latest year-over-year rate; profit keeps
/// the current net margin. Scenario bands scale the realistic case.
pub fn generate_forecast(
    current: Option<&FinancialStatement>,
    history: &[FinancialStatement],
    months: u32,
    constants: &EstimationConstants,
) -> AnalysisResult<FinancialForecast> {
    let current = current.ok_or(AnalysisError::NoCurrentStatement)?;
    if months == 0 {
        return Err(AnalysisError::InvalidInput {
            field: "months".into(),
            reason: "Forecast horizon must be at least one month".into(),
        });
    }

    let h = &constants.forecast;
    let ratios = calculate_financial_ratios(current, history, &constants.proxies);
    let growth_rate = ratios.revenue_growth_rate / dec!(100);
    let horizon_years = Decimal::from(months) / dec!(12);

    // Extreme growth rates saturate rather than overflow.
    let growth_factor = Decimal::ONE.saturating_add(growth_rate.saturating_mul(horizon_years));
    let projected_revenue = current.revenue.saturating_mul(growth_factor);
    let projected_profit = projected_revenue.saturating_mul(ratios.net_profit_margin / dec!(100));
    let projected_cash_flow = projected_profit.saturating_mul(h.cash_flow_to_profit);

    let scenario = |revenue_factor: Decimal, profit_factor: Decimal| {
        let profit = projected_profit.saturating_mul(profit_factor);
        ScenarioProjection {
            revenue: projected_revenue.saturating_mul(revenue_factor),
            profit,
            cash_flow: profit.saturating_mul(h.cash_flow_to_profit),
        }
    };
    let scenario_analysis = ScenarioAnalysis {
        optimistic: scenario(h.optimistic_revenue, h.optimistic_profit),
        realistic: scenario(Decimal::ONE, Decimal::ONE),
        pessimistic: scenario(h.pessimistic_revenue, h.pessimistic_profit),
    };

    let confidence = forecast_confidence(history);

    let assumptions = vec![
        format!(
            "Revenue grows at {}% per year, the latest year-over-year rate",
            round_half_up(ratios.revenue_growth_rate, 2)
        ),
        format!(
            "Net profit margin holds at {}%",
            round_half_up(ratios.net_profit_margin, 2)
        ),
        format!(
            "Cash flow runs at {}x profit",
            h.cash_flow_to_profit.normalize()
        ),
        format!("Horizon of {months} month(s) from the current statement"),
        format!("Based on {} historical statement(s)", history.len()),
    ];

    tracing::debug!(months, %projected_revenue, %confidence, "forecast generated");

    Ok(FinancialForecast {
        period: months,
        projected_revenue,
        projected_profit,
        projected_cash_flow,
        confidence,
        assumptions,
        scenario_analysis,
    })
}

/// Mean of a data-depth score and a revenue-consistency score.
fn forecast_confidence(history: &[FinancialStatement]) -> Score {
    let data_quality = if history.len() >= RICH_HISTORY_STATEMENTS {
        RICH_HISTORY_QUALITY
    } else {
        THIN_HISTORY_QUALITY
    };

    let trend_consistency = if history.len() < 2 {
        DEFAULT_TREND_CONSISTENCY
    } else {
        let revenues: Vec<Money> = chronological(history)
            .iter()
            .map(|s| s.value(Metric::Revenue))
            .collect();
        if classify_volatility(&revenues) == Volatility::Low {
            CONSISTENT_TREND
        } else {
            DEFAULT_TREND_CONSISTENCY
        }
    };

    (data_quality + trend_consistency) / dec!(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn statement(year: i32, revenue: Decimal, net_income: Decimal) -> FinancialStatement {
        FinancialStatement {
            revenue,
            net_income,
            date: Utc.with_ymd_and_hms(year, 12, 31, 0, 0, 0).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_requires_current_statement() {
        let err = generate_forecast(None, &[], 12, &EstimationConstants::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::NoCurrentStatement));
    }

    #[test]
    fn test_zero_months_rejected() {
        let s = statement(2023, dec!(100_000), dec!(10_000));
        let err = generate_forecast(Some(&s), &[s.clone()], 0, &EstimationConstants::default())
            .unwrap_err();
        match err {
            AnalysisError::InvalidInput { field, .. } => assert_eq!(field, "months"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_twelve_month_projection() {
        let history = vec![
            statement(2022, dec!(100_000), dec!(10_000)),
            statement(2023, dec!(120_000), dec!(18_000)),
        ];
        let f = generate_forecast(
            Some(&history[1]),
            &history,
            12,
            &EstimationConstants::default(),
        )
        .unwrap();
        // growth 20%, margin 15%
        assert_eq!(f.projected_revenue, dec!(144_000));
        assert_eq!(f.projected_profit, dec!(21_600));
        assert_eq!(f.projected_cash_flow, dec!(25_920));
        assert_eq!(f.scenario_analysis.realistic.revenue, f.projected_revenue);
        assert_eq!(f.scenario_analysis.optimistic.revenue, dec!(172_800));
        assert_eq!(f.scenario_analysis.optimistic.profit, dec!(28_080));
        assert_eq!(f.scenario_analysis.pessimistic.revenue, dec!(115_200));
        assert_eq!(f.scenario_analysis.pessimistic.profit, dec!(12_960));
        assert_eq!(f.scenario_analysis.pessimistic.cash_flow, dec!(15_552));
        // data quality 60 (2 statements), consistency 70 (volatility medium)
        assert_eq!(f.confidence, dec!(65));
        assert_eq!(f.period, 12);
        assert_eq!(f.assumptions.len(), 5);
    }

    #[test]
    fn test_six_month_projection_scales_growth() {
        let history = vec![
            statement(2022, dec!(100_000), dec!(10_000)),
            statement(2023, dec!(120_000), dec!(12_000)),
        ];
        let f = generate_forecast(Some(&history[1]), &history, 6, &EstimationConstants::default())
            .unwrap();
        assert_eq!(f.projected_revenue, dec!(132_000));
        assert_eq!(f.projected_profit, dec!(13_200));
    }

    #[test]
    fn test_single_statement_confidence() {
        let s = statement(2023, dec!(100_000), dec!(10_000));
        let f = generate_forecast(Some(&s), &[s.clone()], 12, &EstimationConstants::default())
            .unwrap();
        // no growth history => flat revenue
        assert_eq!(f.projected_revenue, dec!(100_000));
        assert_eq!(f.confidence, dec!(65));
    }

    #[test]
    fn test_stable_long_history_confidence() {
        let history = vec![
            statement(2020, dec!(100_000), dec!(10_000)),
            statement(2021, dec!(102_000), dec!(10_000)),
            statement(2022, dec!(104_000), dec!(10_000)),
        ];
        let f = generate_forecast(Some(&history[2]), &history, 12, &EstimationConstants::default())
            .unwrap();
        // (80 + 85) / 2
        assert_eq!(f.confidence, dec!(82.5));
    }
}
