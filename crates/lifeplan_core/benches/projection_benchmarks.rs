//! Criterion benchmarks for lifeplan_core projections
//!
//! Run with: cargo bench -p lifeplan_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lifeplan_core::engine::simulate;
use lifeplan_core::loan::RepaymentType;
use lifeplan_core::model::{
    DebtDetail, ExpenseKind, FinancialItem, Frequency, GlobalSettings, IncomeKind, ItemId,
    ItemKind, Owner, PensionKind, SavingsKind, SimulationProfile,
};
use lifeplan_core::rate_math::{MonthWindow, YearMonth};

fn profile() -> SimulationProfile {
    SimulationProfile {
        birth_year: 1985,
        spouse_birth_year: Some(1987),
        retirement_age: 62,
        life_expectancy: 92,
        spouse_life_expectancy: Some(94),
        start_year: 2026,
    }
}

fn item(
    id: &str,
    kind: ItemKind,
    amount: f64,
    frequency: Frequency,
    window: MonthWindow,
) -> FinancialItem {
    FinancialItem {
        id: ItemId::new(id),
        title: id.to_string(),
        owner: Owner::Primary,
        kind,
        amount,
        frequency,
        window,
        growth_rate: None,
        fixed_to_retirement: false,
    }
}

fn household_items(extra_savings: usize) -> Vec<FinancialItem> {
    let start = YearMonth::new(2026, 1);
    let mut items = vec![
        item(
            "salary",
            ItemKind::Income {
                kind: IncomeKind::Salary,
            },
            4_000_000.0,
            Frequency::Monthly,
            MonthWindow::open(start),
        ),
        item(
            "living",
            ItemKind::Expense {
                kind: ExpenseKind::Living,
            },
            2_500_000.0,
            Frequency::Monthly,
            MonthWindow::open(start),
        ),
        item(
            "pension-fund",
            ItemKind::Pension {
                kind: PensionKind::Personal,
            },
            400_000.0,
            Frequency::Monthly,
            MonthWindow::closed(start, YearMonth::new(2046, 12)),
        ),
        item(
            "mortgage",
            ItemKind::Debt {
                detail: DebtDetail {
                    principal: 250_000_000.0,
                    interest_rate: 0.045,
                    repayment_type: RepaymentType::LevelPayment,
                },
            },
            0.0,
            Frequency::Monthly,
            MonthWindow::closed(start, YearMonth::new(2055, 12)),
        ),
    ];
    for i in 0..extra_savings {
        items.push(item(
            &format!("deposit-{i}"),
            ItemKind::Savings {
                kind: SavingsKind::Deposit,
            },
            500_000.0,
            Frequency::Monthly,
            MonthWindow::open(start),
        ));
    }
    items
}

fn bench_horizon_lengths(c: &mut Criterion) {
    let profile = profile();
    let settings = GlobalSettings::default();
    let items = household_items(4);

    let mut group = c.benchmark_group("simulate_horizon");
    for years in [10u16, 30, 60] {
        group.bench_with_input(BenchmarkId::from_parameter(years), &years, |b, &years| {
            b.iter(|| simulate(black_box(&items), &profile, &settings, years));
        });
    }
    group.finish();
}

fn bench_item_counts(c: &mut Criterion) {
    let profile = profile();
    let settings = GlobalSettings::default();

    let mut group = c.benchmark_group("simulate_items");
    for extra in [4usize, 32, 128] {
        let items = household_items(extra);
        group.bench_with_input(BenchmarkId::from_parameter(extra), &items, |b, items| {
            b.iter(|| simulate(black_box(items), &profile, &settings, 40));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_horizon_lengths, bench_item_counts);
criterion_main!(benches);
