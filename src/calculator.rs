//! Term deposit maturity calculation.
//!
//! The balance at maturity is computed either as simple interest paid once at
//! the end of the term, or as compound interest reinvested a fixed number of
//! times per year:
//!
//! ```text
//! simple:   FV = P + (P * R / 100) * T
//! compound: FV = P * (1 + R / 100 / N) ^ (N * T)
//! ```
//!
//! `P` is the principal, `R` the annual rate in percent, `N` the number of
//! interest payments per year and `T` the term in years. Divisions keep
//! [`DIVISION_PRECISION`] decimal places; everything else is exact.

use crate::decimal::{self, Balance, DIVISION_PRECISION};
use crate::error::CalculatorError;
use bigdecimal::{BigDecimal, RoundingMode};
use log::trace;
use num_traits::{One, Zero};

/// Smallest accepted number of interest payments per year (at maturity).
pub const MIN_PAYMENTS_PER_YEAR: i32 = 0;

/// Largest accepted number of interest payments per year (weekly).
pub const MAX_PAYMENTS_PER_YEAR: i32 = 52;

/// Calculates the final balance of a term deposit.
///
/// The calculator holds no state, so one instance can be shared freely
/// between threads.
///
/// # Example
///
/// ```
/// use term_deposit::TermDepositCalculator;
///
/// let calculator = TermDepositCalculator::new();
/// let balance = calculator
///     .calculate_final_balance_str("10000", 1.1, 12, 3)
///     .unwrap();
/// assert_eq!(balance.to_fixed_bank(0), "10335");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TermDepositCalculator;

impl TermDepositCalculator {
    /// Creates a new calculator.
    pub fn new() -> Self {
        TermDepositCalculator
    }

    /// Calculates the balance at maturity.
    ///
    /// `annual_rate_percent` is in percent (`1.1` means 1.1%).
    /// `payments_per_year` must lie in `0..=52`; `0` selects simple interest
    /// paid at maturity. The result is not rounded.
    pub fn calculate_final_balance(
        &self,
        principal: &BigDecimal,
        annual_rate_percent: f64,
        payments_per_year: i32,
        term_years: i32,
    ) -> Result<Balance, CalculatorError> {
        self.calculate_final_balance_for_years(
            principal,
            annual_rate_percent,
            payments_per_year,
            &BigDecimal::from(term_years),
        )
    }

    /// Same as [`calculate_final_balance`](Self::calculate_final_balance), with
    /// the principal given as decimal text of any length.
    pub fn calculate_final_balance_str(
        &self,
        principal: &str,
        annual_rate_percent: f64,
        payments_per_year: i32,
        term_years: i32,
    ) -> Result<Balance, CalculatorError> {
        let principal = decimal::parse(principal)?;
        self.calculate_final_balance(
            &principal,
            annual_rate_percent,
            payments_per_year,
            term_years,
        )
    }

    /// Calculates the balance at maturity for a term that may be a fraction of
    /// a year.
    ///
    /// A fractional number of compounding periods needs a positive growth
    /// factor, so the rate must then be greater than
    /// `-100 * payments_per_year`.
    pub fn calculate_final_balance_for_years(
        &self,
        principal: &BigDecimal,
        annual_rate_percent: f64,
        payments_per_year: i32,
        term_years: &BigDecimal,
    ) -> Result<Balance, CalculatorError> {
        validate_payments_per_year(payments_per_year)?;

        let balance = if payments_per_year == 0 {
            simple_interest(principal, annual_rate_percent, term_years)?
        } else {
            compound_interest(principal, annual_rate_percent, payments_per_year, term_years)?
        };

        Ok(Balance::new(balance))
    }
}

fn validate_payments_per_year(payments_per_year: i32) -> Result<(), CalculatorError> {
    if !(MIN_PAYMENTS_PER_YEAR..=MAX_PAYMENTS_PER_YEAR).contains(&payments_per_year) {
        return Err(CalculatorError::Validation {
            field: "numberOfInterestPaidPerYear",
            value: payments_per_year.to_string(),
            range: format!("{} - {}", MIN_PAYMENTS_PER_YEAR, MAX_PAYMENTS_PER_YEAR),
        });
    }
    Ok(())
}

/// Interest is earned on the principal only and paid once at maturity.
fn simple_interest(
    principal: &BigDecimal,
    annual_rate_percent: f64,
    term_years: &BigDecimal,
) -> Result<BigDecimal, CalculatorError> {
    let rate = decimal::lift_f64(annual_rate_percent)?;
    let annual_interest = decimal::div_round(
        &(rate * principal),
        &BigDecimal::from(100),
        DIVISION_PRECISION,
        RoundingMode::HalfUp,
    )
    .ok_or_else(|| CalculatorError::Validation {
        field: "principal",
        value: format!("scale {}", principal.as_bigint_and_exponent().1),
        range: format!("scale within {}", u32::MAX),
    })?;
    trace!("simple interest: {} per year", annual_interest);

    Ok(principal + annual_interest * term_years)
}

/// Interest is reinvested `payments_per_year` times a year.
fn compound_interest(
    principal: &BigDecimal,
    annual_rate_percent: f64,
    payments_per_year: i32,
    term_years: &BigDecimal,
) -> Result<BigDecimal, CalculatorError> {
    // The percentage is converted while still an f64, then lifted.
    let annual_fraction = decimal::lift_f64(annual_rate_percent / 100.0)?;
    let periods_per_year = BigDecimal::from(payments_per_year);

    let periodic_rate = decimal::div_round(
        &annual_fraction,
        &periods_per_year,
        DIVISION_PRECISION,
        RoundingMode::HalfUp,
    )
    .ok_or_else(|| rate_out_of_range(annual_rate_percent, payments_per_year))?;
    let growth_per_period = periodic_rate + BigDecimal::one();
    let total_periods = &periods_per_year * term_years;
    trace!(
        "compound interest: growth {} over {} periods",
        growth_per_period,
        total_periods
    );

    let growth = decimal::pow(&growth_per_period, &total_periods).ok_or_else(|| {
        if growth_per_period > BigDecimal::zero() {
            // A positive base only fails when the period count is unusable.
            CalculatorError::Validation {
                field: "termYears",
                value: term_years.to_string(),
                range: format!("{} - {} total periods", i64::MIN, i64::MAX),
            }
        } else {
            rate_out_of_range(annual_rate_percent, payments_per_year)
        }
    })?;

    Ok(growth * principal)
}

fn rate_out_of_range(annual_rate_percent: f64, payments_per_year: i32) -> CalculatorError {
    CalculatorError::Validation {
        field: "annualRatePercent",
        value: annual_rate_percent.to_string(),
        range: format!("greater than {}", -100 * i64::from(payments_per_year)),
    }
}
