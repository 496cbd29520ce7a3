//! Scenario documents
//!
//! A scenario is the JSON shape submitted by callers: the household
//! profile, global rate assumptions, the persisted financial items, and an
//! optional virtual-expense configuration. The engine proper never touches
//! files or clocks; resolving the start year from the wall clock happens
//! here, before the engine is invoked.

use std::fs;
use std::path::Path;

use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};

use lifeplan_core::model::{FinancialItem, GlobalSettings, SimulationProfile};
use lifeplan_core::virtual_expense::{VirtualExpenseConfig, synthesize_virtual_expenses};

/// Household profile as written in a scenario file. `start_year` may be
/// omitted, in which case the current calendar year is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioProfile {
    pub birth_year: i16,
    #[serde(default)]
    pub spouse_birth_year: Option<i16>,
    pub retirement_age: u8,
    pub life_expectancy: u8,
    #[serde(default)]
    pub spouse_life_expectancy: Option<u8>,
    #[serde(default)]
    pub start_year: Option<i16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub profile: ScenarioProfile,
    #[serde(default)]
    pub settings: GlobalSettings,
    #[serde(default)]
    pub items: Vec<FinancialItem>,
    #[serde(default)]
    pub virtual_expenses: Option<VirtualExpenseConfig>,
    /// Horizon override in years; defaults to the life-expectancy horizon.
    #[serde(default)]
    pub horizon_years: Option<u16>,
}

impl Scenario {
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read scenario {}", path.display()))?;
        let scenario: Scenario = serde_json::from_str(&text)
            .wrap_err_with(|| format!("failed to parse scenario {}", path.display()))?;
        Ok(scenario)
    }

    /// Bind the profile to a concrete first simulated year.
    pub fn resolve_profile(&self, fallback_start_year: i16) -> SimulationProfile {
        SimulationProfile {
            birth_year: self.profile.birth_year,
            spouse_birth_year: self.profile.spouse_birth_year,
            retirement_age: self.profile.retirement_age,
            life_expectancy: self.profile.life_expectancy,
            spouse_life_expectancy: self.profile.spouse_life_expectancy,
            start_year: self.profile.start_year.unwrap_or(fallback_start_year),
        }
    }

    /// Persisted items plus the synthesized virtual expenses, ready for a
    /// single engine run.
    pub fn all_items(&self, profile: &SimulationProfile) -> Vec<FinancialItem> {
        let mut items = self.items.clone();
        if let Some(config) = &self.virtual_expenses {
            items.extend(synthesize_virtual_expenses(profile, config));
        }
        items
    }
}
