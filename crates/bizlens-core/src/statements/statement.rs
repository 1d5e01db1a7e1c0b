use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::Money;

/// Reporting period covered by a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportingPeriod {
    Q1,
    Q2,
    Q3,
    Q4,
    #[default]
    Annual,
}

/// Normalised income-statement and balance-sheet snapshot for one period.
///
/// `equity` is expected to equal `total_assets - total_liabilities` and
/// `net_income` to stay below `revenue`; neither is enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialStatement {
    pub revenue: Money,
    pub gross_profit: Money,
    pub operating_income: Money,
    pub net_income: Money,
    pub total_assets: Money,
    pub total_liabilities: Money,
    pub equity: Money,
    pub cash_flow: Money,
    pub operating_expenses: Money,
    pub cost_of_goods_sold: Money,
    pub date: DateTime<Utc>,
    pub period: ReportingPeriod,
}

impl FinancialStatement {
    /// Value of a single line item.
    pub fn value(&self, metric: Metric) -> Money {
        match metric {
            Metric::Revenue => self.revenue,
            Metric::GrossProfit => self.gross_profit,
            Metric::OperatingIncome => self.operating_income,
            Metric::NetIncome => self.net_income,
            Metric::TotalAssets => self.total_assets,
            Metric::TotalLiabilities => self.total_liabilities,
            Metric::Equity => self.equity,
            Metric::CashFlow => self.cash_flow,
            Metric::OperatingExpenses => self.operating_expenses,
            Metric::CostOfGoodsSold => self.cost_of_goods_sold,
        }
    }

    /// Book equity implied by the balance-sheet totals.
    pub fn implied_equity(&self) -> Money {
        self.total_assets - self.total_liabilities
    }
}

/// Statements ordered oldest first. The sort is stable, so statements sharing
/// a date keep their import order.
pub fn chronological(history: &[FinancialStatement]) -> Vec<&FinancialStatement> {
    let mut sorted: Vec<&FinancialStatement> = history.iter().collect();
    sorted.sort_by_key(|s| s.date);
    sorted
}

/// Statement line items that can be tracked over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Revenue,
    GrossProfit,
    OperatingIncome,
    NetIncome,
    TotalAssets,
    TotalLiabilities,
    Equity,
    CashFlow,
    OperatingExpenses,
    CostOfGoodsSold,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::Revenue,
        Metric::GrossProfit,
        Metric::OperatingIncome,
        Metric::NetIncome,
        Metric::TotalAssets,
        Metric::TotalLiabilities,
        Metric::Equity,
        Metric::CashFlow,
        Metric::OperatingExpenses,
        Metric::CostOfGoodsSold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::GrossProfit => "gross_profit",
            Metric::OperatingIncome => "operating_income",
            Metric::NetIncome => "net_income",
            Metric::TotalAssets => "total_assets",
            Metric::TotalLiabilities => "total_liabilities",
            Metric::Equity => "equity",
            Metric::CashFlow => "cash_flow",
            Metric::OperatingExpenses => "operating_expenses",
            Metric::CostOfGoodsSold => "cost_of_goods_sold",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Metric {
    type Err = AnalysisError;

    /// Accepts snake_case, camelCase and kebab-case names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().replace('_', "") == normalised)
            .ok_or_else(|| AnalysisError::InvalidInput {
                field: "metric".into(),
                reason: format!("unknown metric '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_metric_parsing() {
        assert_eq!("revenue".parse::<Metric>().unwrap(), Metric::Revenue);
        assert_eq!("netIncome".parse::<Metric>().unwrap(), Metric::NetIncome);
        assert_eq!("cash-flow".parse::<Metric>().unwrap(), Metric::CashFlow);
        assert_eq!(
            "cost_of_goods_sold".parse::<Metric>().unwrap(),
            Metric::CostOfGoodsSold
        );
        assert!("ebitda".parse::<Metric>().is_err());
    }

    #[test]
    fn test_value_lookup() {
        let s = FinancialStatement {
            revenue: dec!(100),
            net_income: dec!(10),
            total_assets: dec!(50),
            total_liabilities: dec!(20),
            ..Default::default()
        };
        assert_eq!(s.value(Metric::Revenue), dec!(100));
        assert_eq!(s.value(Metric::NetIncome), dec!(10));
        assert_eq!(s.implied_equity(), dec!(30));
    }

    #[test]
    fn test_chronological_is_stable() {
        use chrono::TimeZone;
        let early = Utc.with_ymd_and_hms(2022, 12, 31, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2023, 12, 31, 0, 0, 0).unwrap();
        let history = vec![
            FinancialStatement { revenue: dec!(3), date: late, ..Default::default() },
            FinancialStatement { revenue: dec!(1), date: early, ..Default::default() },
            FinancialStatement { revenue: dec!(4), date: late, ..Default::default() },
        ];
        let revenues: Vec<_> = chronological(&history).iter().map(|s| s.revenue).collect();
        assert_eq!(revenues, vec![dec!(1), dec!(3), dec!(4)]);
    }

    #[test]
    fn test_metric_serializes_snake_case() {
        let json = serde_json::to_string(&Metric::CostOfGoodsSold).unwrap();
        assert_eq!(json, "\"cost_of_goods_sold\"");
    }
}
