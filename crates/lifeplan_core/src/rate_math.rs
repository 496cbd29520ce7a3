//! Month-granular time and rate arithmetic for the projection loop.
//!
//! All items in a plan are quoted with annual growth/interest rates and
//! year-month activity windows. The helpers here convert annual rates into
//! exact monthly compounding rates and prorate an item's contribution over
//! the months of a single target year, anchored to the item's own start so
//! that items beginning mid-simulation never gain retroactive growth.

use serde::{Deserialize, Serialize};

/// A calendar month, the engine's smallest time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i16,
    pub month: i8,
}

impl YearMonth {
    pub fn new(year: i16, month: i8) -> Self {
        Self { year, month }
    }

    /// Linear month index (months since year 0, January).
    #[inline]
    pub fn index(self) -> i32 {
        self.year as i32 * 12 + (self.month as i32 - 1)
    }

    /// Months between `self` and `other` (`other - self`).
    #[inline]
    pub fn months_until(self, other: YearMonth) -> i32 {
        other.index() - self.index()
    }
}

/// An item's activity window. An open end is treated as +∞.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub start: YearMonth,
    #[serde(default)]
    pub end: Option<YearMonth>,
}

impl MonthWindow {
    pub fn new(start: YearMonth, end: Option<YearMonth>) -> Self {
        Self { start, end }
    }

    pub fn open(start: YearMonth) -> Self {
        Self { start, end: None }
    }

    pub fn closed(start: YearMonth, end: YearMonth) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// A single-month window, used for one-time items.
    pub fn single(at: YearMonth) -> Self {
        Self::closed(at, at)
    }

    /// Whether the window is inverted (`end < start`). Inverted windows are
    /// normalized to zero contribution by every consumer, never an error.
    pub fn is_inverted(&self) -> bool {
        matches!(self.end, Some(end) if end < self.start)
    }

    /// First and last active month of `year`, or `None` when the window does
    /// not touch `year` at all.
    ///
    /// The first month is `start.month` only in the start year (else 1); the
    /// last month is `end.month` only in the end year (else 12).
    pub fn active_bounds(&self, year: i16) -> Option<(i8, i8)> {
        if year < self.start.year || self.is_inverted() {
            return None;
        }
        if let Some(end) = self.end
            && year > end.year
        {
            return None;
        }

        let first = if year == self.start.year {
            self.start.month
        } else {
            1
        };
        let last = match self.end {
            Some(end) if year == end.year => end.month,
            _ => 12,
        };

        (first <= last).then_some((first, last))
    }

    /// Number of active months of this window within `year`. Degenerate
    /// windows yield 0.
    pub fn active_months(&self, year: i16) -> i32 {
        self.active_bounds(year)
            .map_or(0, |(first, last)| (last - first + 1) as i32)
    }
}

/// Convert an annually-quoted rate to its exact monthly compounding rate.
///
/// Compounding the result 12 times reproduces the annual rate:
/// `(1 + monthly_rate(r))^12 == 1 + r` to floating-point precision.
#[inline]
pub fn monthly_rate(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}

/// Prorated contribution of an item for a single target year.
///
/// Sums `monthly_base × (1 + monthly_rate)^(months elapsed since the window
/// start)` over every active month of `year`. Growth is anchored to the
/// item's own start month, not to the simulation start.
pub fn yearly_amount(
    monthly_base: f64,
    annual_growth: f64,
    window: &MonthWindow,
    year: i16,
) -> f64 {
    let Some((first, last)) = window.active_bounds(year) else {
        return 0.0;
    };

    let rate = monthly_rate(annual_growth);
    let mut total = 0.0;
    for month in first..=last {
        let elapsed = window.start.months_until(YearMonth::new(year, month));
        total += monthly_base * (1.0 + rate).powi(elapsed);
    }
    total
}

/// Grow a balance across `months` months of monthly compounding at an
/// annually-quoted rate.
#[inline]
pub fn compound(balance: f64, annual: f64, months: i32) -> f64 {
    balance * (1.0 + monthly_rate(annual)).powi(months)
}
