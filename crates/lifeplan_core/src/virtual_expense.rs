//! Age-curve driven virtual expenses (education and medical cost bands).
//!
//! These items are synthesized from read-only lookup tables immediately
//! before an engine run and never persisted. They carry a `virtual:` id
//! prefix; the engine otherwise treats them like any other expense item.

use serde::{Deserialize, Serialize};

use crate::model::{ExpenseKind, FinancialItem, Frequency, ItemId, ItemKind, Owner,
    SimulationProfile};
use crate::rate_math::{MonthWindow, YearMonth};

/// Cost tier selecting the column of the band tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTier {
    #[default]
    Normal,
    Premium,
}

/// A child in the household, for the education curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub birth_year: i16,
}

/// Synthesizer inputs beyond the simulation profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualExpenseConfig {
    pub tier: CostTier,
    pub include_education: bool,
    pub include_medical: bool,
    pub children: Vec<Child>,
}

/// One education life stage. `end_age: None` marks a one-time lump sum at
/// `start_age` instead of a monthly band.
struct EducationBand {
    slug: &'static str,
    label: &'static str,
    start_age: i16,
    end_age: Option<i16>,
    normal: f64,
    premium: f64,
}

/// Monthly education cost bands per child (amounts in the smallest currency
/// unit; the marriage gift is a one-time lump sum).
const EDUCATION_BANDS: &[EducationBand] = &[
    EducationBand {
        slug: "childcare",
        label: "Childcare",
        start_age: 0,
        end_age: Some(6),
        normal: 400_000.0,
        premium: 800_000.0,
    },
    EducationBand {
        slug: "primary",
        label: "Primary school",
        start_age: 7,
        end_age: Some(12),
        normal: 300_000.0,
        premium: 700_000.0,
    },
    EducationBand {
        slug: "secondary",
        label: "Secondary school",
        start_age: 13,
        end_age: Some(18),
        normal: 500_000.0,
        premium: 1_000_000.0,
    },
    EducationBand {
        slug: "higher-ed",
        label: "Higher education",
        start_age: 19,
        end_age: Some(22),
        normal: 800_000.0,
        premium: 1_500_000.0,
    },
    EducationBand {
        slug: "marriage",
        label: "Marriage gift",
        start_age: 30,
        end_age: None,
        normal: 50_000_000.0,
        premium: 100_000_000.0,
    },
];

struct MedicalBand {
    start_age: i16,
    normal: f64,
    premium: f64,
}

/// Monthly medical cost bands per adult, keyed by starting age. Each band
/// runs until the next band's start; the last until life expectancy.
const MEDICAL_BANDS: &[MedicalBand] = &[
    MedicalBand {
        start_age: 40,
        normal: 100_000.0,
        premium: 150_000.0,
    },
    MedicalBand {
        start_age: 50,
        normal: 200_000.0,
        premium: 300_000.0,
    },
    MedicalBand {
        start_age: 60,
        normal: 300_000.0,
        premium: 450_000.0,
    },
    MedicalBand {
        start_age: 70,
        normal: 500_000.0,
        premium: 750_000.0,
    },
];

impl CostTier {
    fn pick(self, normal: f64, premium: f64) -> f64 {
        match self {
            CostTier::Normal => normal,
            CostTier::Premium => premium,
        }
    }
}

/// Generate the non-persisted expense items for the household.
///
/// Bands that end before `profile.start_year` are skipped entirely;
/// partially elapsed bands keep their original window (the engine ignores
/// pre-horizon months anyway).
pub fn synthesize_virtual_expenses(
    profile: &SimulationProfile,
    config: &VirtualExpenseConfig,
) -> Vec<FinancialItem> {
    let mut items = Vec::new();

    if config.include_education {
        for (index, child) in config.children.iter().enumerate() {
            education_items_for_child(profile, config.tier, index, child, &mut items);
        }
    }

    if config.include_medical {
        medical_items_for_person(
            profile.start_year,
            config.tier,
            "self",
            Owner::Primary,
            profile.birth_year,
            profile.life_expectancy,
            &mut items,
        );
        if let Some(spouse_birth_year) = profile.spouse_birth_year {
            // Spouse falls back to the self life expectancy when not given.
            let life_expectancy = profile
                .spouse_life_expectancy
                .unwrap_or(profile.life_expectancy);
            medical_items_for_person(
                profile.start_year,
                config.tier,
                "spouse",
                Owner::Spouse,
                spouse_birth_year,
                life_expectancy,
                &mut items,
            );
        }
    }

    items
}

fn education_items_for_child(
    profile: &SimulationProfile,
    tier: CostTier,
    index: usize,
    child: &Child,
    items: &mut Vec<FinancialItem>,
) {
    let child_tag = format!("child{index}");
    for band in EDUCATION_BANDS {
        let amount = tier.pick(band.normal, band.premium);
        let (window, frequency) = match band.end_age {
            Some(end_age) => {
                let window = MonthWindow::closed(
                    YearMonth::new(child.birth_year + band.start_age, 1),
                    YearMonth::new(child.birth_year + end_age, 12),
                );
                (window, Frequency::Monthly)
            }
            None => {
                let at = YearMonth::new(child.birth_year + band.start_age, 1);
                (MonthWindow::single(at), Frequency::Once)
            }
        };

        // Bands fully behind the simulation start contribute nothing.
        if let Some(end) = window.end
            && end.year < profile.start_year
        {
            continue;
        }

        items.push(FinancialItem {
            id: ItemId::synthetic(&["education", &child_tag, band.slug]),
            title: format!("{} (child {})", band.label, index + 1),
            owner: Owner::Common,
            kind: ItemKind::Expense {
                kind: ExpenseKind::Education,
            },
            amount,
            frequency,
            window,
            growth_rate: None,
            fixed_to_retirement: false,
        });
    }
}

fn medical_items_for_person(
    start_year: i16,
    tier: CostTier,
    person_tag: &str,
    owner: Owner,
    birth_year: i16,
    life_expectancy: u8,
    items: &mut Vec<FinancialItem>,
) {
    let last_year = birth_year + life_expectancy as i16 - 1;

    for (index, band) in MEDICAL_BANDS.iter().enumerate() {
        let band_start = birth_year + band.start_age;
        let band_end = match MEDICAL_BANDS.get(index + 1) {
            Some(next) => last_year.min(birth_year + next.start_age - 1),
            None => last_year,
        };
        if band_end < band_start || band_end < start_year {
            continue;
        }

        items.push(FinancialItem {
            id: ItemId::synthetic(&["medical", person_tag, &format!("age{}", band.start_age)]),
            title: format!("Medical costs {person_tag} {}+", band.start_age),
            owner,
            kind: ItemKind::Expense {
                kind: ExpenseKind::Medical,
            },
            amount: tier.pick(band.normal, band.premium),
            frequency: Frequency::Monthly,
            window: MonthWindow::closed(
                YearMonth::new(band_start, 1),
                YearMonth::new(band_end, 12),
            ),
            growth_rate: None,
            fixed_to_retirement: false,
        });
    }
}
