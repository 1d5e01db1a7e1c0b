//! Estimation coefficients used across the statement builder, ratio
//! calculator, cash-flow analyzer and forecast engine.
//!
//! The defaults are the reference heuristics and must stay exactly as they
//! are for results to remain comparable between releases. Every section is
//! `#[serde(default)]`, so a configuration file only needs to name the
//! coefficients it overrides.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Multiple, Ratio};

/// All estimation heuristics, grouped by the component that consumes them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConstants {
    pub statement: StatementHeuristics,
    pub proxies: BalanceSheetProxies,
    pub cash_flow: CashFlowHeuristics,
    pub forecast: ForecastHeuristics,
}

/// Coefficients for turning a raw business profile into a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementHeuristics {
    /// Gross profit as a share of revenue when the business type mentions
    /// "service".
    pub service_gross_profit_ratio: Ratio,
    /// Gross profit as a share of revenue for every other business type.
    pub default_gross_profit_ratio: Ratio,
    /// Operating expenses as a share of revenue.
    pub operating_expense_ratio: Ratio,
    /// Months per year used to annualise monthly profit.
    pub months_per_year: Multiple,
    /// Total assets as a multiple of revenue.
    pub asset_to_revenue: Multiple,
    /// Total liabilities as a share of total assets. Equity is the remainder,
    /// so equity is a coarse approximation of book value.
    pub liability_to_asset: Ratio,
    /// Cash flow as a multiple of net income.
    pub cash_flow_to_net_income: Multiple,
}

impl Default for StatementHeuristics {
    fn default() -> Self {
        Self {
            service_gross_profit_ratio: dec!(0.4),
            default_gross_profit_ratio: dec!(0.3),
            operating_expense_ratio: dec!(0.3),
            months_per_year: dec!(12),
            asset_to_revenue: dec!(1.0),
            liability_to_asset: dec!(0.4),
            cash_flow_to_net_income: dec!(1.2),
        }
    }
}

/// Balance-sheet line items the statement does not carry, estimated from
/// the totals it does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSheetProxies {
    pub current_assets_to_assets: Ratio,
    pub current_liabilities_to_liabilities: Ratio,
    pub quick_assets_to_assets: Ratio,
    pub cash_on_hand_to_cash_flow: Ratio,
    pub inventory_to_assets: Ratio,
    pub receivables_to_assets: Ratio,
    pub interest_expense_to_liabilities: Ratio,
}

impl Default for BalanceSheetProxies {
    fn default() -> Self {
        Self {
            current_assets_to_assets: dec!(0.6),
            current_liabilities_to_liabilities: dec!(0.7),
            quick_assets_to_assets: dec!(0.4),
            cash_on_hand_to_cash_flow: dec!(0.2),
            inventory_to_assets: dec!(0.2),
            receivables_to_assets: dec!(0.15),
            interest_expense_to_liabilities: dec!(0.05),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowHeuristics {
    /// Free cash flow as a share of operating cash flow.
    pub free_cash_flow_ratio: Ratio,
    /// Investing cash flow as a (negative) share of revenue.
    pub investing_to_revenue: Ratio,
    /// Financing cash flow as a share of total liabilities.
    pub financing_to_liabilities: Ratio,
    pub days_per_year: Multiple,
    /// Payables days assumed in the cash conversion cycle.
    pub payables_days: Multiple,
}

impl Default for CashFlowHeuristics {
    fn default() -> Self {
        Self {
            free_cash_flow_ratio: dec!(0.85),
            investing_to_revenue: dec!(-0.05),
            financing_to_liabilities: dec!(0.1),
            days_per_year: dec!(365),
            payables_days: dec!(30),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastHeuristics {
    pub cash_flow_to_profit: Multiple,
    pub optimistic_revenue: Multiple,
    pub optimistic_profit: Multiple,
    pub pessimistic_revenue: Multiple,
    pub pessimistic_profit: Multiple,
}

impl Default for ForecastHeuristics {
    fn default() -> Self {
        Self {
            cash_flow_to_profit: dec!(1.2),
            optimistic_revenue: dec!(1.2),
            optimistic_profit: dec!(1.3),
            pessimistic_revenue: dec!(0.8),
            pessimistic_profit: dec!(0.6),
        }
    }
}
