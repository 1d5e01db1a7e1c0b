//! Composite financial health scoring.
//!
//! Each of the five categories is scored from a fixed step table over the
//! ratio set and capped to 0-100. The overall score is the rounded mean of
//! the categories. Narrative findings come from [`HEALTH_RULES`], an ordered
//! list of predicate/effect pairs evaluated top to bottom, so the same
//! ratios always yield the same lists in the same order.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::ratios::FinancialRatios;
use crate::arithmetic::round_half_up;
use crate::types::Score;

const MAX_SCORE: Score = dec!(100);

const LOW_RISK_FLOOR: Score = dec!(80);
const MEDIUM_RISK_FLOOR: Score = dec!(60);
const HIGH_RISK_FLOOR: Score = dec!(40);

const STRENGTH_SCORE: Score = dec!(75);
const WEAKNESS_SCORE: Score = dec!(40);

const FALLBACK_RECOMMENDATION: &str =
    "Maintain current financial practices and review key ratios quarterly";

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub profitability: Score,
    pub liquidity: Score,
    pub efficiency: Score,
    pub leverage: Score,
    pub growth: Score,
}

impl CategoryScores {
    pub fn as_array(&self) -> [Score; 5] {
        [
            self.profitability,
            self.liquidity,
            self.efficiency,
            self.leverage,
            self.growth,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealthScore {
    pub overall_score: Score,
    pub category_scores: CategoryScores,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_level: RiskLevel,
}

// ---------------------------------------------------------------------------
// Step tables
// ---------------------------------------------------------------------------

/// `(threshold, points)` pairs, most demanding threshold first.
type StepTable = [(Decimal, Decimal)];

const GROSS_MARGIN_STEPS: &StepTable = &[(dec!(40), dec!(25)), (dec!(20), dec!(15)), (dec!(10), dec!(5))];
const NET_MARGIN_STEPS: &StepTable = &[(dec!(15), dec!(25)), (dec!(8), dec!(15)), (dec!(3), dec!(5))];
const ROA_STEPS: &StepTable = &[(dec!(10), dec!(25)), (dec!(5), dec!(15)), (dec!(2), dec!(5))];
const ROE_STEPS: &StepTable = &[(dec!(15), dec!(25)), (dec!(10), dec!(15)), (dec!(5), dec!(5))];

const CURRENT_RATIO_STEPS: &StepTable = &[(dec!(2), dec!(40)), (dec!(1.5), dec!(30)), (dec!(1), dec!(15))];
const QUICK_RATIO_STEPS: &StepTable = &[(dec!(1.5), dec!(30)), (dec!(1), dec!(20)), (dec!(0.5), dec!(10))];
const CASH_RATIO_STEPS: &StepTable = &[(dec!(0.5), dec!(30)), (dec!(0.2), dec!(20)), (dec!(0.1), dec!(10))];

const ASSET_TURNOVER_STEPS: &StepTable = &[(dec!(2), dec!(35)), (dec!(1.5), dec!(25)), (dec!(1), dec!(15))];
const INVENTORY_TURNOVER_STEPS: &StepTable = &[(dec!(10), dec!(35)), (dec!(6), dec!(25)), (dec!(3), dec!(15))];
const RECEIVABLES_TURNOVER_STEPS: &StepTable = &[(dec!(12), dec!(30)), (dec!(8), dec!(20)), (dec!(4), dec!(10))];

/// Leverage penalties: value above threshold deducts points.
const DEBT_TO_EQUITY_PENALTIES: &StepTable = &[(dec!(2), dec!(40)), (dec!(1.5), dec!(25)), (dec!(1), dec!(10))];
const DEBT_TO_ASSETS_PENALTIES: &StepTable = &[(dec!(60), dec!(30)), (dec!(40), dec!(15)), (dec!(30), dec!(5))];
/// Interest coverage penalties: value below threshold deducts points, least
/// demanding threshold first.
const INTEREST_COVERAGE_PENALTIES: &StepTable = &[(dec!(2), dec!(30)), (dec!(5), dec!(15)), (dec!(10), dec!(5))];

const REVENUE_GROWTH_STEPS: &StepTable = &[
    (dec!(20), dec!(40)),
    (dec!(10), dec!(30)),
    (dec!(5), dec!(20)),
    (dec!(0), dec!(10)),
];
const PROFIT_GROWTH_STEPS: &StepTable = &[(dec!(15), dec!(30)), (dec!(8), dec!(20)), (dec!(0), dec!(10))];
const ASSET_GROWTH_STEPS: &StepTable = &[(dec!(10), dec!(30)), (dec!(5), dec!(20)), (dec!(0), dec!(10))];

/// Points for the first threshold `value` strictly exceeds.
fn points_above(value: Decimal, table: &StepTable) -> Decimal {
    table
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(Decimal::ZERO)
}

/// Points for the first threshold `value` is strictly below.
fn points_below(value: Decimal, table: &StepTable) -> Decimal {
    table
        .iter()
        .find(|(threshold, _)| value < *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(Decimal::ZERO)
}

fn cap(score: Decimal) -> Score {
    score.clamp(Decimal::ZERO, MAX_SCORE)
}

// ---------------------------------------------------------------------------
// Category scorers
// ---------------------------------------------------------------------------

pub fn score_profitability(r: &FinancialRatios) -> Score {
    cap(points_above(r.gross_profit_margin, GROSS_MARGIN_STEPS)
        + points_above(r.net_profit_margin, NET_MARGIN_STEPS)
        + points_above(r.return_on_assets, ROA_STEPS)
        + points_above(r.return_on_equity, ROE_STEPS))
}

pub fn score_liquidity(r: &FinancialRatios) -> Score {
    cap(points_above(r.current_ratio, CURRENT_RATIO_STEPS)
        + points_above(r.quick_ratio, QUICK_RATIO_STEPS)
        + points_above(r.cash_ratio, CASH_RATIO_STEPS))
}

pub fn score_efficiency(r: &FinancialRatios) -> Score {
    cap(points_above(r.asset_turnover, ASSET_TURNOVER_STEPS)
        + points_above(r.inventory_turnover, INVENTORY_TURNOVER_STEPS)
        + points_above(r.receivables_turnover, RECEIVABLES_TURNOVER_STEPS))
}

/// Starts from a perfect score and deducts for each leverage signal.
pub fn score_leverage(r: &FinancialRatios) -> Score {
    cap(MAX_SCORE
        - points_above(r.debt_to_equity, DEBT_TO_EQUITY_PENALTIES)
        - points_above(r.debt_to_assets, DEBT_TO_ASSETS_PENALTIES)
        - points_below(r.interest_coverage, INTEREST_COVERAGE_PENALTIES))
}

pub fn score_growth(r: &FinancialRatios) -> Score {
    cap(points_above(r.revenue_growth_rate, REVENUE_GROWTH_STEPS)
        + points_above(r.profit_growth_rate, PROFIT_GROWTH_STEPS)
        + points_above(r.asset_growth_rate, ASSET_GROWTH_STEPS))
}

pub fn score_categories(r: &FinancialRatios) -> CategoryScores {
    CategoryScores {
        profitability: score_profitability(r),
        liquidity: score_liquidity(r),
        efficiency: score_efficiency(r),
        leverage: score_leverage(r),
        growth: score_growth(r),
    }
}

pub fn classify_risk(overall_score: Score) -> RiskLevel {
    if overall_score >= LOW_RISK_FLOOR {
        RiskLevel::Low
    } else if overall_score >= MEDIUM_RISK_FLOOR {
        RiskLevel::Medium
    } else if overall_score >= HIGH_RISK_FLOOR {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

// ---------------------------------------------------------------------------
// Narrative rules
// ---------------------------------------------------------------------------

/// One entry of the narrative rule list. Every effect that is `Some` is
/// appended to its list when the predicate holds.
pub struct HealthRule {
    pub name: &'static str,
    pub applies: fn(&FinancialRatios, &CategoryScores) -> bool,
    pub strength: Option<&'static str>,
    pub weakness: Option<&'static str>,
    pub recommendation: Option<&'static str>,
}

pub static HEALTH_RULES: &[HealthRule] = &[
    // Category strengths
    HealthRule {
        name: "strong_profitability",
        applies: |_, s| s.profitability > STRENGTH_SCORE,
        strength: Some("Strong profitability across margins and returns"),
        weakness: None,
        recommendation: None,
    },
    HealthRule {
        name: "strong_liquidity",
        applies: |_, s| s.liquidity > STRENGTH_SCORE,
        strength: Some("Healthy liquidity position"),
        weakness: None,
        recommendation: None,
    },
    HealthRule {
        name: "strong_efficiency",
        applies: |_, s| s.efficiency > STRENGTH_SCORE,
        strength: Some("Efficient use of assets"),
        weakness: None,
        recommendation: None,
    },
    HealthRule {
        name: "strong_leverage",
        applies: |_, s| s.leverage > STRENGTH_SCORE,
        strength: Some("Conservative use of debt"),
        weakness: None,
        recommendation: None,
    },
    HealthRule {
        name: "strong_growth",
        applies: |_, s| s.growth > STRENGTH_SCORE,
        strength: Some("Strong growth momentum"),
        weakness: None,
        recommendation: None,
    },
    // Category weaknesses
    HealthRule {
        name: "weak_profitability",
        applies: |_, s| s.profitability < WEAKNESS_SCORE,
        strength: None,
        weakness: Some("Weak profitability"),
        recommendation: Some("Review pricing and cost structure to lift margins"),
    },
    HealthRule {
        name: "weak_liquidity",
        applies: |_, s| s.liquidity < WEAKNESS_SCORE,
        strength: None,
        weakness: Some("Limited liquidity"),
        recommendation: Some("Build cash reserves and tighten working-capital management"),
    },
    HealthRule {
        name: "weak_efficiency",
        applies: |_, s| s.efficiency < WEAKNESS_SCORE,
        strength: None,
        weakness: Some("Low asset efficiency"),
        recommendation: Some("Speed up inventory turnover and customer collections"),
    },
    HealthRule {
        name: "weak_leverage",
        applies: |_, s| s.leverage < WEAKNESS_SCORE,
        strength: None,
        weakness: Some("High financial leverage"),
        recommendation: Some("Prioritise debt reduction before taking on new obligations"),
    },
    HealthRule {
        name: "weak_growth",
        applies: |_, s| s.growth < WEAKNESS_SCORE,
        strength: None,
        weakness: Some("Limited growth"),
        recommendation: Some("Invest in sales and marketing to expand revenue"),
    },
    // Ratio-specific findings
    HealthRule {
        name: "high_gross_margin",
        applies: |r, _| r.gross_profit_margin > dec!(40),
        strength: Some("Excellent gross profit margin"),
        weakness: None,
        recommendation: None,
    },
    HealthRule {
        name: "high_net_margin",
        applies: |r, _| r.net_profit_margin > dec!(15),
        strength: Some("High net profit margin"),
        weakness: None,
        recommendation: None,
    },
    HealthRule {
        name: "high_current_ratio",
        applies: |r, _| r.current_ratio > dec!(2),
        strength: Some("Strong short-term liquidity"),
        weakness: None,
        recommendation: None,
    },
    HealthRule {
        name: "rapid_revenue_growth",
        applies: |r, _| r.revenue_growth_rate > dec!(20),
        strength: Some("Rapid revenue growth"),
        weakness: None,
        recommendation: None,
    },
    HealthRule {
        name: "high_debt_to_equity",
        applies: |r, _| r.debt_to_equity > dec!(2),
        strength: None,
        weakness: Some("High debt-to-equity ratio"),
        recommendation: Some("Reduce debt or raise equity to bring debt-to-equity below 2x"),
    },
    HealthRule {
        name: "current_ratio_below_one",
        applies: |r, _| r.current_ratio < Decimal::ONE,
        strength: None,
        weakness: Some("Current liabilities exceed current assets"),
        recommendation: Some("Improve working capital by extending payables or accelerating receivables"),
    },
    HealthRule {
        name: "operating_at_loss",
        applies: |r, _| r.net_profit_margin < Decimal::ZERO,
        strength: None,
        weakness: Some("Business is operating at a loss"),
        recommendation: Some("Cut costs or raise prices to return to profitability"),
    },
    HealthRule {
        name: "declining_revenue",
        applies: |r, _| r.revenue_growth_rate < Decimal::ZERO,
        strength: None,
        weakness: Some("Declining revenue"),
        recommendation: Some("Investigate customer churn and market share losses"),
    },
    HealthRule {
        name: "thin_interest_coverage",
        applies: |r, _| r.debt_to_assets > Decimal::ZERO && r.interest_coverage < dec!(2),
        strength: None,
        weakness: Some("Operating income barely covers interest"),
        recommendation: Some("Refinance or pay down debt to lower interest costs"),
    },
];

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Score a ratio set.
pub fn calculate_health_score(ratios: &FinancialRatios) -> FinancialHealthScore {
    let category_scores = score_categories(ratios);
    let total: Decimal = category_scores.as_array().iter().copied().sum();
    let overall_score = round_half_up(total / dec!(5), 0);
    let risk_level = classify_risk(overall_score);

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut recommendations = Vec::new();

    for rule in HEALTH_RULES {
        if !(rule.applies)(ratios, &category_scores) {
            continue;
        }
        tracing::trace!(rule = rule.name, "health rule matched");
        if let Some(s) = rule.strength {
            strengths.push(s.to_string());
        }
        if let Some(w) = rule.weakness {
            weaknesses.push(w.to_string());
        }
        if let Some(rec) = rule.recommendation {
            recommendations.push(rec.to_string());
        }
    }

    if recommendations.is_empty() {
        recommendations.push(FALLBACK_RECOMMENDATION.to_string());
    }

    FinancialHealthScore {
        overall_score,
        category_scores,
        strengths,
        weaknesses,
        recommendations,
        risk_level,
    }
}
