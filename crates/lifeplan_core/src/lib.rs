//! Deterministic retirement projection library
//!
//! This crate turns a household's financial items — incomes, expenses,
//! savings and investment accounts, debts, pensions, real estate — plus
//! global economic assumptions into a year-by-year trajectory of net worth,
//! cash flow, and retirement-readiness scores over a multi-decade horizon.
//! It supports:
//! - Exact monthly compounding of annually-quoted rates, so partial-year
//!   activity windows are correct to the month
//! - Loan amortization under bullet, level-payment, and equal-principal
//!   repayment policies with exact interest/principal decomposition
//! - Synthesized age-curve expenses (education, medical) that are injected
//!   per run and never persisted
//! - Accumulation/decumulation phase transitions with pension drawdown and
//!   shortfall withdrawals, plus depletion and FI detection
//! - A multi-factor readiness score derived from the resulting trajectory
//!
//! The engine is a pure, single-threaded function: no I/O, no clock reads,
//! no shared mutable state. Identical inputs yield identical results.
//!
//! ```ignore
//! use lifeplan_core::engine::simulate;
//! use lifeplan_core::model::{GlobalSettings, SimulationProfile};
//!
//! let profile = SimulationProfile {
//!     birth_year: 1990,
//!     spouse_birth_year: None,
//!     retirement_age: 60,
//!     life_expectancy: 90,
//!     spouse_life_expectancy: None,
//!     start_year: 2026,
//! };
//! let result = simulate(&items, &profile, &GlobalSettings::default(), 40);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod engine;
pub mod loan;
pub mod rate_math;
pub mod score;
pub mod virtual_expense;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use engine::simulate;
pub use score::{ScoreInput, Scores, readiness_scores};
pub use virtual_expense::{Child, CostTier, VirtualExpenseConfig, synthesize_virtual_expenses};
