//! Retirement readiness scoring.
//!
//! Five independent piecewise-linear sub-scores, each clamped to [0, 100],
//! combined into a weighted overall score. Pure functions of the input
//! metrics — no I/O, nothing cached, recomputed on every call.

use serde::{Deserialize, Serialize};

/// Baseline age from which asset accumulation progress is measured.
const BASELINE_START_AGE: f64 = 25.0;

/// Fixed sub-score weights. These are policy, not configuration.
const WEIGHT_ASSET: f64 = 0.35;
const WEIGHT_INCOME: f64 = 0.20;
const WEIGHT_EXPENSE: f64 = 0.15;
const WEIGHT_DEBT: f64 = 0.15;
const WEIGHT_PENSION: f64 = 0.15;

/// Metrics the scorer consumes: summary figures from a projection plus
/// independent monthly flow figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreInput {
    pub monthly_income: f64,
    pub monthly_expense: f64,
    /// Expected monthly pension income in retirement.
    pub monthly_pension_income: f64,
    pub net_worth: f64,
    pub total_assets: f64,
    pub total_debts: f64,
    /// Asset level considered "done" (e.g. the FI target).
    pub target_net_worth: f64,
    pub age: f64,
    pub retirement_age: f64,
}

/// The five sub-scores and their weighted overall, all in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub overall: f64,
    pub income: f64,
    pub expense: f64,
    pub asset: f64,
    pub debt: f64,
    pub pension: f64,
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) }
}

/// Savings-rate score: 100 at a rate of 30% or better, linearly down to 0
/// at a non-positive rate.
fn income_score(input: &ScoreInput) -> f64 {
    if input.monthly_income <= 0.0 {
        return 0.0;
    }
    let savings_rate = (input.monthly_income - input.monthly_expense) / input.monthly_income;
    clamp_score(savings_rate / 0.30 * 100.0)
}

/// Expense-to-income score: 100 at a ratio of 70% or less, 50 at parity,
/// reaching 0 at 150%.
fn expense_score(input: &ScoreInput) -> f64 {
    if input.monthly_income <= 0.0 {
        return 0.0;
    }
    let ratio = input.monthly_expense / input.monthly_income;
    let score = if ratio <= 0.70 {
        100.0
    } else if ratio <= 1.0 {
        100.0 - (ratio - 0.70) / 0.30 * 50.0
    } else {
        50.0 - (ratio - 1.0) / 0.50 * 50.0
    };
    clamp_score(score)
}

/// Net-worth progress against the age-implied expectation, assuming linear
/// accumulation from age 25 to the retirement age. Meeting or beating the
/// expected fraction of the target scores 100.
fn asset_score(input: &ScoreInput) -> f64 {
    if input.target_net_worth <= 0.0 {
        return 0.0;
    }
    let accumulation_span = input.retirement_age - BASELINE_START_AGE;
    if accumulation_span <= 0.0 {
        return clamp_score(input.net_worth / input.target_net_worth * 100.0);
    }
    let expected_fraction =
        ((input.age - BASELINE_START_AGE) / accumulation_span).clamp(0.0, 1.0);
    if expected_fraction == 0.0 {
        // Nothing is expected of you yet.
        return 100.0;
    }
    let progress = (input.net_worth / input.target_net_worth).max(0.0);
    clamp_score(progress / expected_fraction * 100.0)
}

/// Debt-to-asset score: 100 at 20% or less, linearly down to 0 at 100%.
fn debt_score(input: &ScoreInput) -> f64 {
    if input.total_debts <= 0.0 {
        return 100.0;
    }
    if input.total_assets <= 0.0 {
        return 0.0;
    }
    let ratio = input.total_debts / input.total_assets;
    if ratio <= 0.20 {
        return 100.0;
    }
    clamp_score((1.0 - (ratio - 0.20) / 0.80) * 100.0)
}

/// Pension-coverage score: 100 when projected pension income covers at
/// least half of monthly expenses.
fn pension_score(input: &ScoreInput) -> f64 {
    if input.monthly_expense <= 0.0 {
        return if input.monthly_pension_income > 0.0 { 100.0 } else { 0.0 };
    }
    let coverage = input.monthly_pension_income / input.monthly_expense;
    clamp_score(coverage / 0.50 * 100.0)
}

/// Compute all readiness scores for a metric set.
pub fn readiness_scores(input: &ScoreInput) -> Scores {
    let income = income_score(input);
    let expense = expense_score(input);
    let asset = asset_score(input);
    let debt = debt_score(input);
    let pension = pension_score(input);

    let overall = clamp_score(
        WEIGHT_ASSET * asset
            + WEIGHT_INCOME * income
            + WEIGHT_EXPENSE * expense
            + WEIGHT_DEBT * debt
            + WEIGHT_PENSION * pension,
    );

    Scores {
        overall,
        income,
        expense,
        asset,
        debt,
        pension,
    }
}
