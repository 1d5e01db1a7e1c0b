use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::analysis::ratios::FinancialRatios;
use crate::arithmetic::{coefficient_of_variation, safe_divide, safe_percent};
use crate::constants::CashFlowHeuristics;
use crate::statements::{chronological, FinancialStatement};
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Percent};

const STABLE_CV: Decimal = dec!(0.15);
const VARIABLE_CV: Decimal = dec!(0.35);
const MIN_PREDICTABILITY_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predictability {
    Stable,
    Variable,
    Volatile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowAnalysis {
    pub operating_cash_flow: Money,
    pub investing_cash_flow: Money,
    pub financing_cash_flow: Money,
    pub free_cash_flow: Money,
    pub cash_flow_margin: Percent,
    /// Days between paying suppliers and collecting from customers.
    pub cash_conversion_cycle: Multiple,
    pub predictability: Predictability,
}

/// Estimate the cash-flow picture for `statement`.
///
/// A zero inventory or receivables turnover contributes zero days to the
/// cash conversion cycle; the envelope carries a warning when that happens.
pub fn analyze_cash_flow(
    statement: &FinancialStatement,
    history: &[FinancialStatement],
    ratios: &FinancialRatios,
    heuristics: &CashFlowHeuristics,
) -> ComputationOutput<CashFlowAnalysis> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let operating_cash_flow = statement.cash_flow;
    let free_cash_flow = operating_cash_flow * heuristics.free_cash_flow_ratio;
    let investing_cash_flow = statement.revenue * heuristics.investing_to_revenue;
    let financing_cash_flow = statement.total_liabilities * heuristics.financing_to_liabilities;
    let cash_flow_margin = safe_percent(operating_cash_flow, statement.revenue);

    if ratios.inventory_turnover.is_zero() {
        warnings.push("Inventory turnover is zero; inventory days excluded from the cash conversion cycle.".into());
    }
    if ratios.receivables_turnover.is_zero() {
        warnings.push("Receivables turnover is zero; receivable days excluded from the cash conversion cycle.".into());
    }
    let inventory_days = safe_divide(heuristics.days_per_year, ratios.inventory_turnover);
    let receivable_days = safe_divide(heuristics.days_per_year, ratios.receivables_turnover);
    let cash_conversion_cycle = inventory_days + receivable_days - heuristics.payables_days;

    let cash_flows: Vec<Money> = chronological(history).iter().map(|s| s.cash_flow).collect();
    let predictability = classify_predictability(&cash_flows);
    if cash_flows.len() < MIN_PREDICTABILITY_POINTS {
        warnings.push(format!(
            "Only {} statement(s) in history; predictability assumed Variable.",
            cash_flows.len()
        ));
    }

    let output = CashFlowAnalysis {
        operating_cash_flow,
        investing_cash_flow,
        financing_cash_flow,
        free_cash_flow,
        cash_flow_margin,
        cash_conversion_cycle,
        predictability,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "operating_cash_flow": "statement cash flow",
        "free_cash_flow_ratio": heuristics.free_cash_flow_ratio,
        "investing_to_revenue": heuristics.investing_to_revenue,
        "financing_to_liabilities": heuristics.financing_to_liabilities,
        "payables_days": heuristics.payables_days,
    });

    with_metadata(
        "Cash flow estimation from statement proxies",
        &assumptions,
        warnings,
        elapsed,
        output,
    )
}

/// Classify historical cash flows by coefficient of variation. Fewer than
/// three points defaults to Variable.
pub fn classify_predictability(cash_flows: &[Money]) -> Predictability {
    if cash_flows.len() < MIN_PREDICTABILITY_POINTS {
        return Predictability::Variable;
    }
    let cv = coefficient_of_variation(cash_flows);
    if cv < STABLE_CV {
        Predictability::Stable
    } else if cv < VARIABLE_CV {
        Predictability::Variable
    } else {
        Predictability::Volatile
    }
}
