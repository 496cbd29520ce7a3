//! The year-by-year projection engine.
//!
//! One invocation is a pure function from `(items, profile, settings,
//! horizon)` to a [`SimulationResult`]. The engine walks the horizon a year
//! at a time with an internal month loop for balance-carrying items,
//! classifies each year as accumulation or decumulation relative to the
//! retirement year, and aggregates every item into a [`YearlySnapshot`].
//! Malformed inputs are normalized to zero contribution and reported as
//! warnings; the engine itself has no failure path and always returns the
//! full contiguous snapshot sequence.

use rustc_hash::FxHashMap;

use crate::loan::Loan;
use crate::model::{
    BreakdownEntry, FinancialItem, Frequency, GlobalSettings, ItemKind, LifeEvent, LifeEventKind,
    SimulationProfile, SimulationResult, SimulationSummary, SimulationWarning, WarningKind,
    YearlySnapshot,
};
use crate::rate_math::{MonthWindow, YearMonth, monthly_rate, yearly_amount};

/// Tolerance below which a remaining shortfall is treated as covered.
const DEPLETION_EPSILON: f64 = 1e-6;

/// An input item after normalization: resolved growth rate, retirement-
/// clamped window, derived loan terms, and the zero-contribution flag for
/// defective inputs.
struct PreparedItem<'a> {
    item: &'a FinancialItem,
    window: MonthWindow,
    growth: f64,
    loan: Option<Loan>,
    zeroed: bool,
}

impl PreparedItem<'_> {
    /// Cash flow the item produces in `year`. One-time amounts land in the
    /// start year undiscounted; recurring flows are prorated with growth
    /// anchored to the item's own start.
    fn flow_amount(&self, year: i16) -> f64 {
        match self.item.frequency {
            Frequency::Once => {
                if self.window.start.year == year && !self.window.is_inverted() {
                    self.item.amount
                } else {
                    0.0
                }
            }
            _ => yearly_amount(self.item.monthly_base(), self.growth, &self.window, year),
        }
    }

    /// Advance a carried balance across the twelve months of `year`:
    /// deposits and contributions at the beginning of their month, then the
    /// month's compounding. Growth continues after the contribution window
    /// closes — the balance remains invested.
    fn advance_balance(&self, mut balance: f64, year: i16) -> f64 {
        let rate = monthly_rate(self.growth);
        for month in 1..=12 {
            let at = YearMonth::new(year, month);
            if at < self.window.start {
                continue;
            }
            match self.item.frequency {
                Frequency::Once => {
                    if at == self.window.start {
                        balance += self.item.amount;
                    }
                }
                _ => {
                    let in_window = self.window.end.is_none_or(|end| at <= end);
                    if in_window {
                        balance += self.item.monthly_base();
                    }
                }
            }
            balance *= 1.0 + rate;
        }
        balance
    }
}

/// Run a single deterministic projection.
///
/// Never fails: defective items contribute zero and are listed in the
/// result's warnings. Identical inputs produce identical results.
pub fn simulate(
    items: &[FinancialItem],
    profile: &SimulationProfile,
    settings: &GlobalSettings,
    horizon_years: u16,
) -> SimulationResult {
    let horizon_years = horizon_years.max(1);
    let start_year = profile.start_year;
    let end_year = start_year + horizon_years as i16 - 1;
    let retirement_year = profile.retirement_year();

    let mut warnings = Vec::new();
    let prepared = prepare_items(items, settings, retirement_year, &mut warnings);
    let mut scheduled_events = schedule_life_events(&prepared, start_year, end_year, retirement_year);

    // Carried balances, parallel to `prepared`. Only balance-carrying
    // categories ever move away from zero.
    let mut balances: Vec<f64> = vec![0.0; prepared.len()];

    let mut snapshots: Vec<YearlySnapshot> = Vec::with_capacity(horizon_years as usize);
    let mut peak_net_worth = f64::NEG_INFINITY;
    let mut peak_net_worth_year = start_year;
    let mut bankruptcy_year: Option<i16> = None;
    let mut years_to_fi: Option<u16> = None;
    let mut fi_target = 0.0;

    for year in start_year..=end_year {
        let decumulation = year >= retirement_year;

        let mut incomes: Vec<BreakdownEntry> = Vec::new();
        let mut expenses: Vec<BreakdownEntry> = Vec::new();
        let mut savings: Vec<BreakdownEntry> = Vec::new();
        let mut debts: Vec<BreakdownEntry> = Vec::new();
        let mut pensions: Vec<BreakdownEntry> = Vec::new();
        let mut real_estates: Vec<BreakdownEntry> = Vec::new();
        let mut life_events = scheduled_events.remove(&year).unwrap_or_default();

        let mut total_income = 0.0;
        let mut total_expense = 0.0;
        let mut recurring_expense = 0.0;
        let mut total_debts = 0.0;

        // Pass 1: cash flows, debt schedules, and balance growth.
        for (index, p) in prepared.iter().enumerate() {
            if p.zeroed {
                continue;
            }
            match &p.item.kind {
                ItemKind::Income { .. } => {
                    let amount = p.flow_amount(year);
                    if amount != 0.0 {
                        total_income += amount;
                        incomes.push(BreakdownEntry::new(&p.item.title, amount));
                    }
                }
                ItemKind::Expense { .. } => {
                    let amount = p.flow_amount(year);
                    if amount != 0.0 {
                        total_expense += amount;
                        if p.item.frequency != Frequency::Once {
                            recurring_expense += amount;
                        }
                        expenses.push(BreakdownEntry::new(&p.item.title, amount));
                    }
                }
                ItemKind::Debt { detail } => {
                    let Some(loan) = &p.loan else { continue };
                    let flow = loan.year_flows(detail.repayment_type, year);
                    let service = flow.interest + flow.principal;
                    if service != 0.0 {
                        total_expense += service;
                        expenses.push(BreakdownEntry::new(&p.item.title, service));
                    }
                    let balance = loan.balance_at_year_end(detail.repayment_type, year);
                    if balance != 0.0 {
                        total_debts += balance;
                        debts.push(BreakdownEntry::new(&p.item.title, balance));
                    }
                }
                _ => {
                    balances[index] = p.advance_balance(balances[index], year);
                }
            }
        }

        // Pass 2 (decumulation only): draw pension assets over the
        // remaining horizon, then cover any income shortfall from liquid
        // financial assets — depleted, never driven negative.
        if decumulation {
            let pension_total: f64 = prepared
                .iter()
                .zip(&balances)
                .filter(|(p, _)| matches!(p.item.kind, ItemKind::Pension { .. }))
                .map(|(_, balance)| *balance)
                .sum();
            if pension_total > 0.0 {
                let remaining_years = (end_year - year + 1) as f64;
                let draw = pension_total / remaining_years;
                for (index, p) in prepared.iter().enumerate() {
                    if !matches!(p.item.kind, ItemKind::Pension { .. }) || balances[index] <= 0.0 {
                        continue;
                    }
                    let share = draw * balances[index] / pension_total;
                    balances[index] -= share;
                    total_income += share;
                    incomes.push(BreakdownEntry::new(&p.item.title, share));
                }
            }

            let shortfall = total_expense - total_income;
            if shortfall > 0.0 {
                let liquid: f64 = prepared
                    .iter()
                    .zip(&balances)
                    .filter(|(p, _)| matches!(p.item.kind, ItemKind::Savings { .. }))
                    .map(|(_, balance)| *balance)
                    .sum();
                let covered = shortfall.min(liquid);
                if liquid > 0.0 && covered > 0.0 {
                    for (index, p) in prepared.iter().enumerate() {
                        if matches!(p.item.kind, ItemKind::Savings { .. }) {
                            balances[index] -= covered * balances[index] / liquid;
                        }
                    }
                }
                if covered + DEPLETION_EPSILON < shortfall && bankruptcy_year.is_none() {
                    bankruptcy_year = Some(year);
                    life_events.push(LifeEvent {
                        kind: LifeEventKind::Depletion,
                        label: "Liquid assets depleted".to_string(),
                    });
                }
            }
        }

        // Pass 3: aggregate carried balances into the balance sheet.
        let mut financial_assets = 0.0;
        let mut pension_assets = 0.0;
        let mut real_estate_value = 0.0;
        let mut physical_asset_value = 0.0;
        for (index, p) in prepared.iter().enumerate() {
            if p.zeroed || balances[index] == 0.0 {
                continue;
            }
            let balance = balances[index];
            match &p.item.kind {
                ItemKind::Savings { .. } => {
                    financial_assets += balance;
                    savings.push(BreakdownEntry::new(&p.item.title, balance));
                }
                ItemKind::Pension { .. } => {
                    pension_assets += balance;
                    pensions.push(BreakdownEntry::new(&p.item.title, balance));
                }
                ItemKind::RealEstate { .. } => {
                    real_estate_value += balance;
                    real_estates.push(BreakdownEntry::new(&p.item.title, balance));
                }
                ItemKind::PhysicalAsset => {
                    physical_asset_value += balance;
                }
                _ => {}
            }
        }

        // The FI target is anchored to the first year's recurring expense
        // level (debt service and one-off lumps excluded).
        if year == start_year {
            fi_target = settings.fi_expense_multiple * recurring_expense;
        }
        if years_to_fi.is_none()
            && fi_target > 0.0
            && financial_assets + pension_assets >= fi_target
        {
            years_to_fi = Some((year - start_year) as u16);
            life_events.push(LifeEvent {
                kind: LifeEventKind::FinancialIndependence,
                label: "Financial independence reached".to_string(),
            });
        }

        let snapshot = YearlySnapshot {
            year,
            age: profile.age_in(year),
            financial_assets,
            real_estate_value,
            pension_assets,
            physical_asset_value,
            total_debts,
            total_income,
            total_expense,
            incomes,
            expenses,
            savings,
            debts,
            pensions,
            real_estates,
            life_events,
        };

        let net_worth = snapshot.net_worth();
        if net_worth > peak_net_worth {
            peak_net_worth = net_worth;
            peak_net_worth_year = year;
        }
        snapshots.push(snapshot);
    }

    let current_net_worth = snapshots.first().map_or(0.0, YearlySnapshot::net_worth);
    let retirement_net_worth = snapshots
        .iter()
        .find(|s| s.year == retirement_year)
        .or_else(|| snapshots.last())
        .map_or(0.0, YearlySnapshot::net_worth);

    SimulationResult {
        start_year,
        end_year,
        retirement_year,
        snapshots,
        summary: SimulationSummary {
            current_net_worth,
            retirement_net_worth,
            peak_net_worth,
            peak_net_worth_year,
            bankruptcy_year,
            years_to_fi,
            fi_target,
        },
        warnings,
    }
}

/// Normalize raw items: resolve default growth rates, clamp
/// retirement-tracking windows, derive loan terms, and zero out defects.
fn prepare_items<'a>(
    items: &'a [FinancialItem],
    settings: &GlobalSettings,
    retirement_year: i16,
    warnings: &mut Vec<SimulationWarning>,
) -> Vec<PreparedItem<'a>> {
    items
        .iter()
        .map(|item| {
            let mut warn = |kind| {
                warnings.push(SimulationWarning {
                    item: item.id.clone(),
                    kind,
                })
            };

            let mut zeroed = false;
            if item.window.is_inverted() {
                warn(WarningKind::InvertedWindow);
                zeroed = true;
            }

            let mut window = item.window;
            let mut loan = None;
            match &item.kind {
                ItemKind::Debt { detail } => {
                    if detail.principal.is_nan() || detail.principal <= 0.0 {
                        warn(WarningKind::NonPositiveAmount);
                        zeroed = true;
                    }
                    match window.end {
                        Some(maturity) if !zeroed => {
                            loan = Some(Loan {
                                principal: detail.principal,
                                annual_rate: detail.interest_rate,
                                start: window.start,
                                maturity,
                            });
                        }
                        Some(_) => {}
                        None => {
                            warn(WarningKind::MissingMaturity);
                            zeroed = true;
                        }
                    }
                }
                _ => {
                    if item.amount.is_nan() || item.amount < 0.0 {
                        warn(WarningKind::NonPositiveAmount);
                        zeroed = true;
                    }
                    if item.fixed_to_retirement {
                        // The window tracks the owner's retirement: active
                        // through the last pre-retirement year. A clamp that
                        // empties the window simply deactivates the item.
                        let retirement_end = YearMonth::new(retirement_year - 1, 12);
                        window.end =
                            Some(window.end.map_or(retirement_end, |end| end.min(retirement_end)));
                        if window.is_inverted() {
                            zeroed = true;
                        }
                    }
                }
            }

            let growth = item
                .growth_rate
                .unwrap_or_else(|| settings.default_growth_for(&item.kind));

            PreparedItem {
                item,
                window,
                growth,
                loan,
                zeroed,
            }
        })
        .collect()
}

/// Pre-compute the statically known life-event markers per year: the
/// retirement transition, one-time flows, and loan maturities. Depletion
/// and FI markers are appended dynamically as they are detected.
fn schedule_life_events(
    prepared: &[PreparedItem<'_>],
    start_year: i16,
    end_year: i16,
    retirement_year: i16,
) -> FxHashMap<i16, Vec<LifeEvent>> {
    let mut events: FxHashMap<i16, Vec<LifeEvent>> = FxHashMap::default();
    let in_range = |year: i16| (start_year..=end_year).contains(&year);

    if in_range(retirement_year) {
        events.entry(retirement_year).or_default().push(LifeEvent {
            kind: LifeEventKind::Retirement,
            label: "Retirement".to_string(),
        });
    }

    for p in prepared {
        if p.zeroed {
            continue;
        }
        match &p.item.kind {
            ItemKind::Debt { .. } => {
                if let Some(loan) = &p.loan
                    && in_range(loan.maturity.year)
                {
                    events.entry(loan.maturity.year).or_default().push(LifeEvent {
                        kind: LifeEventKind::LoanMaturity,
                        label: p.item.title.clone(),
                    });
                }
            }
            ItemKind::Income { .. } | ItemKind::Expense { .. }
                if p.item.frequency == Frequency::Once && in_range(p.window.start.year) =>
            {
                let kind = if matches!(p.item.kind, ItemKind::Income { .. }) {
                    LifeEventKind::OneTimeIncome
                } else {
                    LifeEventKind::OneTimeExpense
                };
                events.entry(p.window.start.year).or_default().push(LifeEvent {
                    kind,
                    label: p.item.title.clone(),
                });
            }
            _ => {}
        }
    }

    events
}
