//! Per-business analysis context.
//!
//! A [`BusinessContext`] owns one business's statement history and the
//! estimation constants used to analyse it. Imports need `&mut self`;
//! every analysis borrows the context immutably and is a pure function of
//! the history at call time.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::analysis::cash_flow::{analyze_cash_flow, CashFlowAnalysis};
use crate::analysis::health::{calculate_health_score, FinancialHealthScore};
use crate::analysis::ratios::{calculate_financial_ratios, latest_growth, FinancialRatios};
use crate::analysis::trend::{analyze_trend, TrendAnalysis};
use crate::constants::EstimationConstants;
use crate::error::AnalysisError;
use crate::statements::{
    build_statement, build_statement_at, chronological, BusinessProfile, FinancialStatement,
    Metric,
};
use crate::types::{ComputationOutput, Percent};
use crate::AnalysisResult;

#[cfg(feature = "forecast")]
use crate::forecast::{generate_forecast, FinancialForecast};

#[derive(Debug, Clone, Default)]
pub struct BusinessContext {
    history: Vec<FinancialStatement>,
    current_index: Option<usize>,
    constants: EstimationConstants,
}

impl BusinessContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constants(constants: EstimationConstants) -> Self {
        Self {
            constants,
            ..Self::default()
        }
    }

    /// Seed a context with an existing history. The last statement becomes
    /// current.
    pub fn from_history(history: Vec<FinancialStatement>, constants: EstimationConstants) -> Self {
        let current_index = history.len().checked_sub(1);
        Self {
            history,
            current_index,
            constants,
        }
    }

    pub fn constants(&self) -> &EstimationConstants {
        &self.constants
    }

    /// Build a statement from `profile`, dated now, and make it current.
    pub fn import_profile(&mut self, profile: &BusinessProfile) -> &FinancialStatement {
        let statement = build_statement(profile, &self.constants);
        self.import_statement(statement)
    }

    /// Build a statement from `profile` with an explicit date and make it
    /// current.
    pub fn import_profile_at(
        &mut self,
        profile: &BusinessProfile,
        date: DateTime<Utc>,
    ) -> &FinancialStatement {
        let statement = build_statement_at(profile, &self.constants, date);
        self.import_statement(statement)
    }

    /// Append a statement to the history and make it current.
    pub fn import_statement(&mut self, statement: FinancialStatement) -> &FinancialStatement {
        debug!(
            date = %statement.date,
            revenue = %statement.revenue,
            history_len = self.history.len() + 1,
            "statement imported"
        );
        self.history.push(statement);
        let index = self.history.len() - 1;
        self.current_index = Some(index);
        &self.history[index]
    }

    /// The most recently imported statement.
    pub fn current(&self) -> Option<&FinancialStatement> {
        self.current_index.and_then(|i| self.history.get(i))
    }

    /// History in insertion order.
    pub fn history(&self) -> &[FinancialStatement] {
        &self.history
    }

    /// History ordered by date, ties kept in insertion order.
    pub fn sorted_history(&self) -> Vec<&FinancialStatement> {
        chronological(&self.history)
    }

    fn resolve<'a>(
        &'a self,
        statement: Option<&'a FinancialStatement>,
    ) -> AnalysisResult<&'a FinancialStatement> {
        statement.or_else(|| self.current()).ok_or(AnalysisError::NoStatement)
    }

    /// Ratios for `statement`, or for the current statement when `None`.
    pub fn calculate_financial_ratios(
        &self,
        statement: Option<&FinancialStatement>,
    ) -> AnalysisResult<FinancialRatios> {
        let statement = self.resolve(statement)?;
        Ok(calculate_financial_ratios(
            statement,
            &self.history,
            &self.constants.proxies,
        ))
    }

    pub fn analyze_trend(&self, metric: Metric) -> AnalysisResult<TrendAnalysis> {
        analyze_trend(&self.history, metric)
    }

    pub fn calculate_health_score(
        &self,
        statement: Option<&FinancialStatement>,
    ) -> AnalysisResult<FinancialHealthScore> {
        let ratios = self.calculate_financial_ratios(statement)?;
        Ok(calculate_health_score(&ratios))
    }

    pub fn analyze_cash_flow(
        &self,
        statement: Option<&FinancialStatement>,
    ) -> AnalysisResult<ComputationOutput<CashFlowAnalysis>> {
        let statement = self.resolve(statement)?;
        let ratios = calculate_financial_ratios(statement, &self.history, &self.constants.proxies);
        Ok(analyze_cash_flow(
            statement,
            &self.history,
            &ratios,
            &self.constants.cash_flow,
        ))
    }

    #[cfg(feature = "forecast")]
    pub fn generate_forecast(&self, months: u32) -> AnalysisResult<FinancialForecast> {
        generate_forecast(self.current(), &self.history, months, &self.constants)
    }

    /// Percent change of `metric` between the two latest statements by date.
    pub fn growth_rate(&self, metric: Metric) -> AnalysisResult<Percent> {
        latest_growth(&self.history, metric).ok_or(AnalysisError::InsufficientHistory {
            required: 2,
            available: self.history.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn at(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 12, 31, 0, 0, 0).unwrap()
    }

    fn profile(revenue: Decimal) -> BusinessProfile {
        BusinessProfile {
            annual_revenue: Some(revenue),
            monthly_profit: Some(dec!(5_000)),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_context_errors() {
        let ctx = BusinessContext::new();
        assert!(ctx.current().is_none());
        assert!(matches!(
            ctx.calculate_financial_ratios(None),
            Err(AnalysisError::NoStatement)
        ));
        assert!(matches!(
            ctx.calculate_health_score(None),
            Err(AnalysisError::NoStatement)
        ));
        assert!(matches!(
            ctx.analyze_cash_flow(None),
            Err(AnalysisError::NoStatement)
        ));
        assert!(matches!(
            ctx.growth_rate(Metric::Revenue),
            Err(AnalysisError::InsufficientHistory { required: 2, available: 0 })
        ));
    }

    #[test]
    fn test_import_updates_current() {
        let mut ctx = BusinessContext::new();
        ctx.import_profile_at(&profile(dec!(100_000)), at(2023));
        ctx.import_profile_at(&profile(dec!(120_000)), at(2024));
        assert_eq!(ctx.history().len(), 2);
        assert_eq!(ctx.current().map(|s| s.revenue), Some(dec!(120_000)));
    }

    #[test]
    fn test_current_is_last_import_not_latest_date() {
        let mut ctx = BusinessContext::new();
        ctx.import_profile_at(&profile(dec!(120_000)), at(2024));
        ctx.import_profile_at(&profile(dec!(100_000)), at(2023));
        assert_eq!(ctx.current().map(|s| s.revenue), Some(dec!(100_000)));

        let sorted = ctx.sorted_history();
        assert_eq!(sorted[0].revenue, dec!(100_000));
        assert_eq!(sorted[1].revenue, dec!(120_000));

        // Growth still compares by date.
        assert_eq!(ctx.growth_rate(Metric::Revenue).unwrap(), dec!(20));
    }

    #[test]
    fn test_explicit_statement_overrides_current() {
        let mut ctx = BusinessContext::new();
        ctx.import_profile_at(&profile(dec!(100_000)), at(2024));
        let other = build_statement_at(&profile(Decimal::ZERO), ctx.constants(), at(2024));
        let ratios = ctx.calculate_financial_ratios(Some(&other)).unwrap();
        assert_eq!(ratios.gross_profit_margin, Decimal::ZERO);
    }

    #[test]
    fn test_from_history_sets_current() {
        let constants = EstimationConstants::default();
        let history = vec![
            build_statement_at(&profile(dec!(1)), &constants, at(2022)),
            build_statement_at(&profile(dec!(2)), &constants, at(2023)),
        ];
        let ctx = BusinessContext::from_history(history, constants);
        assert_eq!(ctx.current().map(|s| s.revenue), Some(dec!(2)));
        assert!(BusinessContext::from_history(Vec::new(), EstimationConstants::default())
            .current()
            .is_none());
    }

    #[cfg(feature = "forecast")]
    #[test]
    fn test_forecast_requires_current() {
        let ctx = BusinessContext::new();
        assert!(matches!(
            ctx.generate_forecast(12),
            Err(AnalysisError::NoCurrentStatement)
        ));
    }

    #[test]
    fn test_context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BusinessContext>();
    }
}
