mod ids;
mod items;
mod profile;
mod results;

pub use ids::{ItemId, VIRTUAL_PREFIX};
pub use items::{
    DebtDetail, ExpenseKind, FinancialItem, Frequency, IncomeKind, ItemKind, Owner, PensionKind,
    RealEstateKind, SavingsKind,
};
pub use profile::{GlobalSettings, SimulationProfile};
pub use results::{
    BreakdownEntry, LifeEvent, LifeEventKind, SimulationResult, SimulationSummary,
    SimulationWarning, WarningKind, YearlySnapshot,
};
