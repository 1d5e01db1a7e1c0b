//! Shared arithmetic primitives for the analysis modules.
//!
//! Every division in the crate goes through [`safe_divide`]: a zero
//! denominator yields zero rather than an error. Statement figures are
//! frequently estimated or missing, and a zero-revenue business must still
//! produce a full (if uninformative) ratio set.
//!
//! A quotient too large for `Decimal` is treated the same way and yields
//! zero. Sums and squares in the dispersion statistics saturate at
//! `Decimal::MAX` instead.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

/// `numerator / denominator`, or zero when the denominator is zero or the
/// quotient overflows.
pub fn safe_divide(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// `numerator / denominator * 100`, or zero when the denominator is zero or
/// the result overflows.
pub fn safe_percent(numerator: Decimal, denominator: Decimal) -> Decimal {
    safe_divide(numerator, denominator)
        .checked_mul(dec!(100))
        .unwrap_or(Decimal::ZERO)
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    saturating_sum(values.iter().copied()) / Decimal::from(values.len() as u64)
}

/// Population standard deviation; zero for an empty slice.
pub fn population_std_dev(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let mu = mean(values);
    let squares = values.iter().map(|&v| {
        let d = v.saturating_sub(mu);
        d.saturating_mul(d)
    });
    let variance = saturating_sum(squares) / Decimal::from(values.len() as u64);
    variance.sqrt().unwrap_or(Decimal::ZERO)
}

/// Coefficient of variation, σ / |μ|.
///
/// Values are scaled by |μ| before the deviation is taken so large monetary
/// series cannot overflow when squared. Zero when the mean is zero.
pub fn coefficient_of_variation(values: &[Decimal]) -> Decimal {
    let mu = mean(values).abs();
    if mu.is_zero() {
        return Decimal::ZERO;
    }
    let scaled: Vec<Decimal> = values.iter().map(|&v| safe_divide(v, mu)).collect();
    population_std_dev(&scaled)
}

/// Bound `value` to `[min, max]`.
pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    value.max(min).min(max)
}

/// Round half away from zero to `dp` decimal places.
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
