//! Loan amortization under the three supported repayment policies.
//!
//! Interest/principal decompositions are produced by replaying the schedule
//! from the loan's inception through the queried months, so the split is
//! exact for integer month counts rather than approximated from closed-form
//! balances. Loans use the nominal `annual_rate / 12` monthly rate, the
//! convention amortizing loans are quoted in (growth prorating elsewhere
//! uses the geometric rate from [`crate::rate_math`]).

use serde::{Deserialize, Serialize};

use crate::rate_math::YearMonth;

/// How a debt's principal is repaid over its term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentType {
    /// Interest-only every month, full principal due at maturity.
    Bullet,
    /// Constant monthly payment via the annuity formula.
    LevelPayment,
    /// Constant monthly principal, declining interest.
    EqualPrincipal,
}

/// A debt's fixed terms. Maturity is required; a debt without one is
/// normalized away before it reaches this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub principal: f64,
    pub annual_rate: f64,
    pub start: YearMonth,
    pub maturity: YearMonth,
}

/// Interest and principal paid within a single year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanYearFlow {
    pub interest: f64,
    pub principal: f64,
}

impl Loan {
    /// Total term in months, inclusive of both endpoints.
    pub fn term_months(&self) -> i32 {
        self.start.months_until(self.maturity) + 1
    }

    #[inline]
    fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }

    fn is_degenerate(&self) -> bool {
        self.principal <= 0.0 || self.maturity < self.start
    }

    /// Level monthly payment from the standard annuity formula,
    /// `P · r(1+r)^n / ((1+r)^n − 1)`, falling back to linear `P/n`
    /// repayment when the rate is zero.
    pub fn monthly_payment(&self) -> f64 {
        let n = self.term_months();
        if n <= 0 || self.principal <= 0.0 {
            return 0.0;
        }
        let r = self.monthly_rate();
        if r == 0.0 {
            return self.principal / n as f64;
        }
        let factor = (1.0 + r).powi(n);
        self.principal * r * factor / (factor - 1.0)
    }

    /// Interest and principal paid during `year`, summed over the year's
    /// active months and rounded to the smallest currency unit. Years
    /// outside the loan's life yield a zero flow.
    pub fn year_flows(&self, repayment: RepaymentType, year: i16) -> LoanYearFlow {
        let mut flow = LoanYearFlow::default();
        if self.is_degenerate() || year < self.start.year || year > self.maturity.year {
            return flow;
        }

        self.replay(repayment, |at, interest, principal| {
            if at.year == year {
                flow.interest += interest;
                flow.principal += principal;
            }
            at.year <= year
        });

        flow.interest = flow.interest.round();
        flow.principal = flow.principal.round();
        flow
    }

    /// Remaining balance as of the last active month of `year`: the original
    /// principal before the loan starts, 0 once past maturity, otherwise the
    /// exact replayed balance.
    pub fn balance_at_year_end(&self, repayment: RepaymentType, year: i16) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        if year < self.start.year {
            return self.principal;
        }

        let mut balance = self.principal;
        self.replay(repayment, |at, _interest, principal| {
            if at.year > year {
                return false;
            }
            balance -= principal;
            true
        });
        balance.round().max(0.0)
    }

    /// Replay the schedule month by month from inception, invoking `visit`
    /// with each month's interest and principal components. `visit` returns
    /// `false` to stop the replay early.
    fn replay<F>(&self, repayment: RepaymentType, mut visit: F)
    where
        F: FnMut(YearMonth, f64, f64) -> bool,
    {
        let n = self.term_months();
        if n <= 0 {
            return;
        }
        let r = self.monthly_rate();
        let payment = self.monthly_payment();
        let equal_principal = self.principal / n as f64;

        let mut balance = self.principal;
        let mut at = self.start;
        for month_index in 0..n {
            // The final month always clears whatever balance remains, which
            // absorbs float drift and the bullet balloon in one rule.
            let is_final = month_index == n - 1;
            let interest = balance * r;
            let principal = match repayment {
                RepaymentType::Bullet => {
                    if is_final {
                        balance
                    } else {
                        0.0
                    }
                }
                RepaymentType::LevelPayment => {
                    if is_final {
                        balance
                    } else {
                        (payment - interest).clamp(0.0, balance)
                    }
                }
                RepaymentType::EqualPrincipal => {
                    if is_final {
                        balance
                    } else {
                        equal_principal.min(balance)
                    }
                }
            };
            balance -= principal;

            if !visit(at, interest, principal) {
                return;
            }
            at = next_month(at);
        }
    }
}

#[inline]
fn next_month(ym: YearMonth) -> YearMonth {
    if ym.month == 12 {
        YearMonth::new(ym.year + 1, 1)
    } else {
        YearMonth::new(ym.year, ym.month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(principal: f64, rate: f64, start: (i16, i8), maturity: (i16, i8)) -> Loan {
        Loan {
            principal,
            annual_rate: rate,
            start: YearMonth::new(start.0, start.1),
            maturity: YearMonth::new(maturity.0, maturity.1),
        }
    }

    #[test]
    fn test_term_months_inclusive() {
        let l = loan(1_000.0, 0.05, (2025, 1), (2025, 12));
        assert_eq!(l.term_months(), 12);
        let l = loan(1_000.0, 0.05, (2025, 1), (2054, 12));
        assert_eq!(l.term_months(), 360);
    }

    #[test]
    fn test_level_payment_standard_mortgage() {
        // 12,000,000 at 6% nominal over 360 months.
        let l = loan(12_000_000.0, 0.06, (2025, 1), (2054, 12));
        let payment = l.monthly_payment();
        assert!(
            (payment - 71_946.0).abs() < 1.0,
            "payment was {payment:.2}"
        );
    }

    #[test]
    fn test_level_payment_zero_rate_is_linear() {
        let l = loan(12_000.0, 0.0, (2025, 1), (2025, 12));
        assert_eq!(l.monthly_payment(), 1_000.0);
        let flow = l.year_flows(RepaymentType::LevelPayment, 2025);
        assert_eq!(flow.interest, 0.0);
        assert_eq!(flow.principal, 12_000.0);
    }

    #[test]
    fn test_bullet_constant_balance_until_maturity() {
        let l = loan(5_000_000.0, 0.04, (2025, 1), (2030, 6));
        for year in 2025..2030 {
            assert_eq!(
                l.balance_at_year_end(RepaymentType::Bullet, year),
                5_000_000.0
            );
        }
        assert_eq!(l.balance_at_year_end(RepaymentType::Bullet, 2030), 0.0);
    }

    #[test]
    fn test_bullet_principal_due_at_maturity() {
        let l = loan(5_000_000.0, 0.04, (2025, 1), (2030, 6));
        let flow = l.year_flows(RepaymentType::Bullet, 2030);
        assert_eq!(flow.principal, 5_000_000.0);
        // Six months of interest on the full principal.
        let expected_interest = (5_000_000.0 * 0.04 / 12.0 * 6.0_f64).round();
        assert_eq!(flow.interest, expected_interest);
    }

    #[test]
    fn test_amortizing_balance_zero_at_maturity() {
        for repayment in [RepaymentType::LevelPayment, RepaymentType::EqualPrincipal] {
            let l = loan(12_000_000.0, 0.06, (2025, 1), (2054, 12));
            assert_eq!(
                l.balance_at_year_end(repayment, 2054),
                0.0,
                "{repayment:?} should fully amortize"
            );
            assert_eq!(l.balance_at_year_end(repayment, 2055), 0.0);
        }
    }

    #[test]
    fn test_balance_before_start_is_principal() {
        let l = loan(9_000.0, 0.05, (2030, 3), (2035, 2));
        assert_eq!(l.balance_at_year_end(RepaymentType::LevelPayment, 2029), 9_000.0);
    }

    #[test]
    fn test_equal_principal_interest_declines() {
        let l = loan(1_200_000.0, 0.06, (2025, 1), (2034, 12));
        let early = l.year_flows(RepaymentType::EqualPrincipal, 2025);
        let late = l.year_flows(RepaymentType::EqualPrincipal, 2034);
        assert!(early.interest > late.interest);
        // Constant principal: every full year repays 1/10 of the loan.
        assert_eq!(early.principal, 120_000.0);
    }

    #[test]
    fn test_total_principal_equals_loan() {
        for repayment in [
            RepaymentType::Bullet,
            RepaymentType::LevelPayment,
            RepaymentType::EqualPrincipal,
        ] {
            let l = loan(3_600_000.0, 0.045, (2025, 7), (2028, 6));
            let total: f64 = (2025..=2028)
                .map(|y| l.year_flows(repayment, y).principal)
                .sum();
            assert!(
                (total - 3_600_000.0).abs() <= 2.0,
                "{repayment:?} repaid {total}"
            );
        }
    }

    #[test]
    fn test_partial_year_flows() {
        // Loan starting mid-year only accrues from its start month.
        let l = loan(1_000_000.0, 0.12, (2025, 10), (2026, 9));
        let flow = l.year_flows(RepaymentType::Bullet, 2025);
        let expected = (1_000_000.0 * 0.01 * 3.0_f64).round();
        assert_eq!(flow.interest, expected);
        assert_eq!(flow.principal, 0.0);
    }

    #[test]
    fn test_degenerate_loans_are_silent() {
        let inverted = loan(1_000.0, 0.05, (2030, 1), (2025, 1));
        assert_eq!(inverted.year_flows(RepaymentType::LevelPayment, 2027), LoanYearFlow::default());
        assert_eq!(inverted.balance_at_year_end(RepaymentType::LevelPayment, 2027), 0.0);

        let empty = loan(0.0, 0.05, (2025, 1), (2030, 1));
        assert_eq!(empty.monthly_payment(), 0.0);
    }
}
