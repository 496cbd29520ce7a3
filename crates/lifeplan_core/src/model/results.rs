//! Projection results
//!
//! Output types for a single engine run: the ordered year-by-year snapshot
//! sequence, the derived summary, and the normalization warnings collected
//! while preparing malformed inputs. A result is produced fresh on every
//! invocation and never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::ids::ItemId;

/// One `(title, amount)` line of a snapshot's per-category breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub title: String,
    pub amount: f64,
}

impl BreakdownEntry {
    pub fn new(title: impl Into<String>, amount: f64) -> Self {
        Self {
            title: title.into(),
            amount,
        }
    }
}

/// A notable event attached to a snapshot year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeEventKind {
    Retirement,
    OneTimeExpense,
    OneTimeIncome,
    LoanMaturity,
    Depletion,
    FinancialIndependence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub kind: LifeEventKind,
    pub label: String,
}

/// Aggregated state of the plan at the end of one simulated year.
///
/// Consecutive snapshots cover contiguous years. Net worth is always
/// recomputed from the stored components via [`YearlySnapshot::net_worth`],
/// never stored independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySnapshot {
    pub year: i16,
    /// Primary holder's age during `year`.
    pub age: i16,

    pub financial_assets: f64,
    pub real_estate_value: f64,
    pub pension_assets: f64,
    pub physical_asset_value: f64,
    pub total_debts: f64,

    pub total_income: f64,
    pub total_expense: f64,

    pub incomes: Vec<BreakdownEntry>,
    pub expenses: Vec<BreakdownEntry>,
    pub savings: Vec<BreakdownEntry>,
    pub debts: Vec<BreakdownEntry>,
    pub pensions: Vec<BreakdownEntry>,
    pub real_estates: Vec<BreakdownEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub life_events: Vec<LifeEvent>,
}

impl YearlySnapshot {
    /// Total assets minus total debts, recomputed from components.
    pub fn net_worth(&self) -> f64 {
        self.financial_assets + self.real_estate_value + self.pension_assets
            + self.physical_asset_value
            - self.total_debts
    }

    pub fn net_cash_flow(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

/// Why an input item was normalized to zero contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Missing or non-positive amount on a flow item.
    NonPositiveAmount,
    /// `end` precedes `start`.
    InvertedWindow,
    /// Debt without a maturity date; the schedule cannot be built.
    MissingMaturity,
}

/// A normalization note for one input item. The engine never fails on bad
/// input; it records the defect and projects the item as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationWarning {
    pub item: ItemId,
    pub kind: WarningKind,
}

/// Headline metrics derived from the snapshot sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Net worth at the end of the first simulated year.
    pub current_net_worth: f64,
    /// Net worth at the end of the retirement year (last year's when
    /// retirement falls outside the horizon).
    pub retirement_net_worth: f64,
    pub peak_net_worth: f64,
    pub peak_net_worth_year: i16,
    /// First decumulation year in which liquid assets were depleted while
    /// an income shortfall remained uncovered.
    pub bankruptcy_year: Option<i16>,
    /// Years from the start until liquid plus pension assets first reach
    /// the FI target, if ever.
    pub years_to_fi: Option<u16>,
    /// The asset level considered financially independent.
    pub fi_target: f64,
}

/// Complete, immutable output of one engine invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub start_year: i16,
    pub end_year: i16,
    pub retirement_year: i16,
    pub snapshots: Vec<YearlySnapshot>,
    pub summary: SimulationSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SimulationWarning>,
}

impl SimulationResult {
    pub fn snapshot_for(&self, year: i16) -> Option<&YearlySnapshot> {
        let offset = year.checked_sub(self.start_year)?;
        if offset < 0 {
            return None;
        }
        self.snapshots.get(offset as usize)
    }
}
