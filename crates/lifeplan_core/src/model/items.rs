//! Financial item definitions
//!
//! Every plan input — incomes, expenses, savings, debts, pensions, real
//! estate, physical assets — is a `FinancialItem` whose category-specific
//! payload lives in the `ItemKind` sum type, so aggregation code matches
//! exhaustively instead of dispatching on category strings.

use serde::{Deserialize, Serialize};

use crate::loan::RepaymentType;
use crate::rate_math::MonthWindow;

use super::ids::ItemId;

/// Who an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    /// The primary plan holder.
    #[serde(rename = "self")]
    Primary,
    Spouse,
    Joint,
    Common,
}

/// How often an item's amount applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Monthly,
    Yearly,
    Once,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeKind {
    Salary,
    Business,
    Rental,
    Annuity,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseKind {
    Living,
    Housing,
    Education,
    Medical,
    Leisure,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsKind {
    Deposit,
    Installment,
    Investment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PensionKind {
    National,
    Occupational,
    Personal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RealEstateKind {
    Residence,
    Investment,
}

/// Debt terms beyond the shared item fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebtDetail {
    /// The amount owed (stored positive).
    pub principal: f64,
    pub interest_rate: f64,
    pub repayment_type: RepaymentType,
}

/// Category tag plus category-specific payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ItemKind {
    Income { kind: IncomeKind },
    Expense { kind: ExpenseKind },
    Savings { kind: SavingsKind },
    Pension { kind: PensionKind },
    RealEstate { kind: RealEstateKind },
    PhysicalAsset,
    Debt { detail: DebtDetail },
}

impl ItemKind {
    /// Whether this category carries a balance forward between years
    /// (as opposed to pure cash flows).
    pub fn carries_balance(&self) -> bool {
        matches!(
            self,
            ItemKind::Savings { .. }
                | ItemKind::Pension { .. }
                | ItemKind::RealEstate { .. }
                | ItemKind::PhysicalAsset
        )
    }
}

/// A single financial item as submitted by the persistence layer (or
/// synthesized by the virtual-expense tables).
///
/// Invariant: `window.start ≤ window.end` when the end is set. Items that
/// violate it, or that have no active months inside the simulated horizon,
/// contribute zero rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialItem {
    pub id: ItemId,
    pub title: String,
    pub owner: Owner,
    pub kind: ItemKind,
    /// Base monetary amount, interpreted per `frequency`: the monthly flow
    /// or contribution for `Monthly`, an annual amount for `Yearly`, a lump
    /// sum at the start month for `Once`.
    pub amount: f64,
    pub frequency: Frequency,
    pub window: MonthWindow,
    /// Annual rate with category-specific meaning: appreciation for assets,
    /// interest/return for savings and pensions, inflation-linked
    /// escalation for incomes and expenses. `None` falls back to the
    /// matching `GlobalSettings` rate.
    #[serde(default)]
    pub growth_rate: Option<f64>,
    /// When set, the item's end tracks the owner's retirement instead of a
    /// literal date.
    #[serde(default)]
    pub fixed_to_retirement: bool,
}

impl FinancialItem {
    /// Monthly base flow implied by `amount` and `frequency`. `Once` items
    /// are handled at their start month by the engine, not here.
    pub fn monthly_base(&self) -> f64 {
        match self.frequency {
            Frequency::Monthly => self.amount,
            Frequency::Yearly => self.amount / 12.0,
            Frequency::Once => 0.0,
        }
    }
}
