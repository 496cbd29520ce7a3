//! Report export
//!
//! Maps a `SimulationResult` into the flat JSON documents downstream
//! consumers expect: one labelled row per snapshot year with category
//! breakdowns and life events, the summary block, and optional readiness
//! scores derived from the same run.

use serde_json::{Value, json};

use lifeplan_core::model::{BreakdownEntry, SimulationProfile, SimulationResult, YearlySnapshot};
use lifeplan_core::score::{ScoreInput, Scores};

fn breakdown_json(entries: &[BreakdownEntry]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|e| json!({ "title": e.title, "amount": e.amount.round() }))
            .collect(),
    )
}

fn snapshot_row(snapshot: &YearlySnapshot) -> Value {
    json!({
        "Year": snapshot.year,
        "Age": snapshot.age,
        "Financial Assets": snapshot.financial_assets.round(),
        "Real Estate": snapshot.real_estate_value.round(),
        "Pension Assets": snapshot.pension_assets.round(),
        "Physical Assets": snapshot.physical_asset_value.round(),
        "Total Debts": snapshot.total_debts.round(),
        "Net Worth": snapshot.net_worth().round(),
        "Total Income": snapshot.total_income.round(),
        "Total Expense": snapshot.total_expense.round(),
        "Net Cash Flow": snapshot.net_cash_flow().round(),
        "Income Breakdown": breakdown_json(&snapshot.incomes),
        "Expense Breakdown": breakdown_json(&snapshot.expenses),
        "Savings Breakdown": breakdown_json(&snapshot.savings),
        "Debt Breakdown": breakdown_json(&snapshot.debts),
        "Pension Breakdown": breakdown_json(&snapshot.pensions),
        "Real Estate Breakdown": breakdown_json(&snapshot.real_estates),
        "Life Events": snapshot.life_events.iter().map(|e| e.label.clone()).collect::<Vec<_>>(),
    })
}

/// Score inputs derived from a finished projection: first-year flows,
/// opening balance sheet, and the annuitized pension draw at retirement.
pub fn score_input_from(result: &SimulationResult, profile: &SimulationProfile) -> ScoreInput {
    let first = result.snapshots.first();
    let at_retirement = result
        .snapshot_for(result.retirement_year)
        .or_else(|| result.snapshots.last());

    let (monthly_income, monthly_expense, total_assets, total_debts, net_worth) =
        first.map_or((0.0, 0.0, 0.0, 0.0, 0.0), |s| {
            (
                s.total_income / 12.0,
                s.total_expense / 12.0,
                s.financial_assets
                    + s.real_estate_value
                    + s.pension_assets
                    + s.physical_asset_value,
                s.total_debts,
                s.net_worth(),
            )
        });

    let remaining_years = (result.end_year - result.retirement_year + 1).max(1) as f64;
    let monthly_pension_income = at_retirement
        .map_or(0.0, |s| s.pension_assets / remaining_years / 12.0);

    ScoreInput {
        monthly_income,
        monthly_expense,
        monthly_pension_income,
        net_worth,
        total_assets,
        total_debts,
        target_net_worth: result.summary.fi_target,
        age: profile.age_in(result.start_year) as f64,
        retirement_age: profile.retirement_age as f64,
    }
}

/// Build the complete report document.
pub fn build_report(result: &SimulationResult, scores: Option<&Scores>) -> Value {
    let mut report = json!({
        "start_year": result.start_year,
        "end_year": result.end_year,
        "retirement_year": result.retirement_year,
        "summary": {
            "Current Net Worth": result.summary.current_net_worth.round(),
            "Net Worth at Retirement": result.summary.retirement_net_worth.round(),
            "Peak Net Worth": result.summary.peak_net_worth.round(),
            "Peak Net Worth Year": result.summary.peak_net_worth_year,
            "Bankruptcy Year": result.summary.bankruptcy_year,
            "Years to Financial Independence": result.summary.years_to_fi,
            "FI Target": result.summary.fi_target.round(),
        },
        "years": result.snapshots.iter().map(snapshot_row).collect::<Vec<_>>(),
        "warnings": result.warnings.iter().map(|w| json!({
            "item": w.item.to_string(),
            "kind": w.kind,
        })).collect::<Vec<_>>(),
    });

    if let Some(scores) = scores {
        report["scores"] = json!({
            "Overall": scores.overall.round(),
            "Income": scores.income.round(),
            "Expense": scores.expense.round(),
            "Asset": scores.asset.round(),
            "Debt": scores.debt.round(),
            "Pension": scores.pension.round(),
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeplan_core::engine::simulate;
    use lifeplan_core::model::{
        FinancialItem, Frequency, GlobalSettings, ItemId, ItemKind, Owner, SavingsKind,
    };
    use lifeplan_core::rate_math::{MonthWindow, YearMonth};
    use lifeplan_core::score::readiness_scores;

    fn profile() -> SimulationProfile {
        SimulationProfile {
            birth_year: 1990,
            spouse_birth_year: None,
            retirement_age: 60,
            life_expectancy: 90,
            spouse_life_expectancy: None,
            start_year: 2026,
        }
    }

    fn seed_items() -> Vec<FinancialItem> {
        vec![FinancialItem {
            id: ItemId::new("seed"),
            title: "Seed deposit".to_string(),
            owner: Owner::Primary,
            kind: ItemKind::Savings {
                kind: SavingsKind::Deposit,
            },
            amount: 1_000_000.0,
            frequency: Frequency::Once,
            window: MonthWindow::single(YearMonth::new(2026, 1)),
            growth_rate: Some(0.05),
            fixed_to_retirement: false,
        }]
    }

    #[test]
    fn test_report_has_one_row_per_year() {
        let profile = profile();
        let result = simulate(&seed_items(), &profile, &GlobalSettings::default(), 10);
        let report = build_report(&result, None);

        let years = report["years"].as_array().unwrap();
        assert_eq!(years.len(), 10);
        assert_eq!(years[0]["Year"], 2026);
        assert_eq!(years[0]["Age"], 36);
        assert!(report.get("scores").is_none());
    }

    #[test]
    fn test_report_includes_scores_when_requested() {
        let profile = profile();
        let result = simulate(&seed_items(), &profile, &GlobalSettings::default(), 10);
        let scores = readiness_scores(&score_input_from(&result, &profile));
        let report = build_report(&result, Some(&scores));

        let block = report["scores"].as_object().unwrap();
        for key in ["Overall", "Income", "Expense", "Asset", "Debt", "Pension"] {
            let value = block[key].as_f64().unwrap();
            assert!((0.0..=100.0).contains(&value), "{key} = {value}");
        }
    }

    #[test]
    fn test_net_worth_column_matches_components() {
        let profile = profile();
        let result = simulate(&seed_items(), &profile, &GlobalSettings::default(), 5);
        let report = build_report(&result, None);
        for row in report["years"].as_array().unwrap() {
            let assets = row["Financial Assets"].as_f64().unwrap()
                + row["Real Estate"].as_f64().unwrap()
                + row["Pension Assets"].as_f64().unwrap()
                + row["Physical Assets"].as_f64().unwrap();
            let debts = row["Total Debts"].as_f64().unwrap();
            let net = row["Net Worth"].as_f64().unwrap();
            assert!((net - (assets - debts)).abs() <= 1.0);
        }
    }
}
