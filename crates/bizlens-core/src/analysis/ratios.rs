use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::arithmetic::{safe_divide, safe_percent};
use crate::constants::BalanceSheetProxies;
use crate::statements::{chronological, FinancialStatement, Metric};
use crate::types::{Multiple, Percent};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Ratio set derived from a single statement (plus history for growth).
///
/// Margins, returns, debt-to-assets and growth rates are in percentage
/// points; everything else is a plain multiple.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    // Profitability
    pub gross_profit_margin: Percent,
    pub operating_margin: Percent,
    pub net_profit_margin: Percent,
    pub return_on_assets: Percent,
    pub return_on_equity: Percent,
    // Liquidity
    pub current_ratio: Multiple,
    pub quick_ratio: Multiple,
    pub cash_ratio: Multiple,
    // Efficiency
    pub asset_turnover: Multiple,
    pub inventory_turnover: Multiple,
    pub receivables_turnover: Multiple,
    // Leverage
    pub debt_to_equity: Multiple,
    pub debt_to_assets: Percent,
    pub interest_coverage: Multiple,
    // Growth
    pub revenue_growth_rate: Percent,
    pub profit_growth_rate: Percent,
    pub asset_growth_rate: Percent,
}

/// Balance-sheet items estimated from statement totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyBalances {
    pub current_assets: Decimal,
    pub current_liabilities: Decimal,
    pub quick_assets: Decimal,
    pub cash_on_hand: Decimal,
    pub inventory: Decimal,
    pub receivables: Decimal,
    pub interest_expense: Decimal,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Estimate the balance-sheet detail a statement does not carry.
pub fn proxy_balances(
    statement: &FinancialStatement,
    proxies: &BalanceSheetProxies,
) -> ProxyBalances {
    ProxyBalances {
        current_assets: statement.total_assets * proxies.current_assets_to_assets,
        current_liabilities: statement.total_liabilities
            * proxies.current_liabilities_to_liabilities,
        quick_assets: statement.total_assets * proxies.quick_assets_to_assets,
        cash_on_hand: statement.cash_flow * proxies.cash_on_hand_to_cash_flow,
        inventory: statement.total_assets * proxies.inventory_to_assets,
        receivables: statement.total_assets * proxies.receivables_to_assets,
        interest_expense: statement.total_liabilities * proxies.interest_expense_to_liabilities,
    }
}

/// Compute the full ratio set for `statement`.
///
/// Growth ratios compare the two most recent statements of `history` by
/// date and are zero with fewer than two. Every division is zero-safe, so
/// the result never contains an undefined value.
pub fn calculate_financial_ratios(
    statement: &FinancialStatement,
    history: &[FinancialStatement],
    proxies: &BalanceSheetProxies,
) -> FinancialRatios {
    let s = statement;
    let p = proxy_balances(s, proxies);

    FinancialRatios {
        gross_profit_margin: safe_percent(s.gross_profit, s.revenue),
        operating_margin: safe_percent(s.operating_income, s.revenue),
        net_profit_margin: safe_percent(s.net_income, s.revenue),
        return_on_assets: safe_percent(s.net_income, s.total_assets),
        return_on_equity: safe_percent(s.net_income, s.equity),

        current_ratio: safe_divide(p.current_assets, p.current_liabilities),
        quick_ratio: safe_divide(p.quick_assets, p.current_liabilities),
        cash_ratio: safe_divide(p.cash_on_hand, p.current_liabilities),

        asset_turnover: safe_divide(s.revenue, s.total_assets),
        inventory_turnover: safe_divide(s.cost_of_goods_sold, p.inventory),
        receivables_turnover: safe_divide(s.revenue, p.receivables),

        debt_to_equity: safe_divide(s.total_liabilities, s.equity),
        debt_to_assets: safe_percent(s.total_liabilities, s.total_assets),
        interest_coverage: safe_divide(s.operating_income, p.interest_expense),

        revenue_growth_rate: latest_growth(history, Metric::Revenue).unwrap_or(Decimal::ZERO),
        profit_growth_rate: latest_growth(history, Metric::NetIncome).unwrap_or(Decimal::ZERO),
        asset_growth_rate: latest_growth(history, Metric::TotalAssets).unwrap_or(Decimal::ZERO),
    }
}

/// Percent change of `metric` between the two most recent statements, or
/// `None` when history holds fewer than two.
pub fn latest_growth(history: &[FinancialStatement], metric: Metric) -> Option<Percent> {
    let sorted = chronological(history);
    if sorted.len() < 2 {
        return None;
    }
    let latest = sorted[sorted.len() - 1].value(metric);
    let previous = sorted[sorted.len() - 2].value(metric);
    Some(safe_percent(latest.saturating_sub(previous), previous))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
