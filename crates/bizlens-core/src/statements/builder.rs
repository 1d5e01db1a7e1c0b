use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::constants::EstimationConstants;
use crate::statements::profile::BusinessProfile;
use crate::statements::statement::{FinancialStatement, ReportingPeriod};

/// Build a complete annual statement from a raw profile, dated now.
pub fn build_statement(
    profile: &BusinessProfile,
    constants: &EstimationConstants,
) -> FinancialStatement {
    build_statement_at(profile, constants, Utc::now())
}

/// Build a complete annual statement from a raw profile.
///
/// Missing line items are estimated from revenue and monthly profit using
/// the statement heuristics. Absent numeric inputs count as zero, so this
/// never fails.
pub fn build_statement_at(
    profile: &BusinessProfile,
    constants: &EstimationConstants,
    date: DateTime<Utc>,
) -> FinancialStatement {
    let h = &constants.statement;
    let revenue = profile.revenue();

    let gross_profit_ratio = if profile.is_service_business() {
        h.service_gross_profit_ratio
    } else {
        h.default_gross_profit_ratio
    };
    let gross_profit = revenue * gross_profit_ratio;
    let operating_expenses = revenue * h.operating_expense_ratio;
    let operating_income = gross_profit - operating_expenses;

    let net_income = profile
        .monthly_profit
        .map(|m| m * h.months_per_year)
        .unwrap_or(Decimal::ZERO);

    let total_assets = revenue * h.asset_to_revenue;
    let total_liabilities = total_assets * h.liability_to_asset;
    let equity = total_assets - total_liabilities;
    let cash_flow = net_income * h.cash_flow_to_net_income;
    let cost_of_goods_sold = revenue - gross_profit;

    FinancialStatement {
        revenue,
        gross_profit,
        operating_income,
        net_income,
        total_assets,
        total_liabilities,
        equity,
        cash_flow,
        operating_expenses,
        cost_of_goods_sold,
        date,
        period: ReportingPeriod::Annual,
    }
}
