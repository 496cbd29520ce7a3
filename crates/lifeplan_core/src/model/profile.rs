//! Simulation profile and global rate assumptions
//!
//! Everything the engine needs about the household and the economy arrives
//! through these two structs. The engine performs no environment lookups:
//! the first simulated year is an explicit field, not a clock read.

use serde::{Deserialize, Serialize};

use super::items::ItemKind;

/// The household being projected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationProfile {
    pub birth_year: i16,
    #[serde(default)]
    pub spouse_birth_year: Option<i16>,
    /// Age at which the primary holder retires.
    pub retirement_age: u8,
    pub life_expectancy: u8,
    #[serde(default)]
    pub spouse_life_expectancy: Option<u8>,
    /// First simulated year, supplied by the caller.
    pub start_year: i16,
}

impl SimulationProfile {
    /// First year of the decumulation phase.
    pub fn retirement_year(&self) -> i16 {
        self.birth_year + self.retirement_age as i16
    }

    /// Last year covered when no explicit horizon is requested: the later
    /// partner's birth year plus the greater life expectancy.
    pub fn default_end_year(&self) -> i16 {
        let latest_birth = self.spouse_birth_year.map_or(self.birth_year, |spouse| {
            self.birth_year.max(spouse)
        });
        let longest_life = self
            .spouse_life_expectancy
            .map_or(self.life_expectancy, |spouse| {
                self.life_expectancy.max(spouse)
            });
        latest_birth + longest_life as i16
    }

    /// Horizon length in years implied by [`Self::default_end_year`],
    /// never less than one year.
    pub fn default_horizon_years(&self) -> u16 {
        (self.default_end_year() - self.start_year + 1).max(1) as u16
    }

    /// Primary holder's age during `year`.
    pub fn age_in(&self, year: i16) -> i16 {
        year - self.birth_year
    }
}

/// Named annual rate assumptions, used as category defaults for items that
/// omit their own growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub inflation_rate: f64,
    pub income_growth_rate: f64,
    pub savings_interest_rate: f64,
    pub investment_return_rate: f64,
    pub pension_return_rate: f64,
    pub real_estate_growth_rate: f64,
    /// FI target as a multiple of sustainable annual expense.
    pub fi_expense_multiple: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            inflation_rate: 0.025,
            income_growth_rate: 0.03,
            savings_interest_rate: 0.03,
            investment_return_rate: 0.055,
            pension_return_rate: 0.04,
            real_estate_growth_rate: 0.025,
            fi_expense_multiple: 25.0,
        }
    }
}

impl GlobalSettings {
    /// Default annual growth rate for an item category.
    pub fn default_growth_for(&self, kind: &ItemKind) -> f64 {
        use super::items::SavingsKind;
        match kind {
            ItemKind::Income { .. } => self.income_growth_rate,
            ItemKind::Expense { .. } => self.inflation_rate,
            ItemKind::Savings { kind: SavingsKind::Investment } => self.investment_return_rate,
            ItemKind::Savings { .. } => self.savings_interest_rate,
            ItemKind::Pension { .. } => self.pension_return_rate,
            ItemKind::RealEstate { .. } => self.real_estate_growth_rate,
            // Physical assets hold nominal value unless the item overrides.
            ItemKind::PhysicalAsset => 0.0,
            // Debt cost comes from the loan's own interest rate.
            ItemKind::Debt { .. } => 0.0,
        }
    }
}
