pub mod cash_flow;
pub mod health;
pub mod ratios;
pub mod trend;

pub use cash_flow::{analyze_cash_flow, CashFlowAnalysis, Predictability};
pub use health::{calculate_health_score, CategoryScores, FinancialHealthScore, RiskLevel};
pub use ratios::{calculate_financial_ratios, FinancialRatios};
pub use trend::{analyze_trend, TrendAnalysis, TrendDirection, Volatility};
