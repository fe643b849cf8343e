//! Command-line flags and the run configuration built from them.

use crate::error::{AppError, Result};
use crate::frequency::PaymentFrequency;
use clap::Parser;
use std::path::PathBuf;

/// Raw command-line flags.
///
/// Every input flag is optional at the parser level; [`Config::from_cli`]
/// decides which ones are required so it can report them in one place.
#[derive(Parser, Debug)]
#[command(
    name = "term-deposit",
    version,
    about = "Calculates the final balance of a term deposit",
    allow_negative_numbers = true
)]
pub struct Cli {
    /// The deposit amount
    #[arg(long, value_name = "AMOUNT")]
    pub deposit: Option<String>,

    /// Interest rate (annually, in percent)
    #[arg(long, value_name = "PERCENT")]
    pub rate: Option<f64>,

    /// Investment term (years)
    #[arg(long, value_name = "YEARS")]
    pub term: Option<i32>,

    /// Interest paid frequency (0 = at maturity, 1 = monthly, 2 = quarterly, 3 = annually)
    #[arg(long, value_name = "CODE")]
    pub frequency: Option<i32>,

    /// Decimal places for rounding
    #[arg(long = "decimalplaces", value_name = "N", default_value_t = 0)]
    pub decimal_places: i32,

    /// CSV file of test cases to verify (path supported)
    #[arg(long = "csvtest", value_name = "PATH")]
    pub csv_test: Option<PathBuf>,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub deposit: String,
    pub rate: f64,
    pub term: i32,
    pub frequency: PaymentFrequency,
    pub decimal_places: i32,
    pub csv_test: Option<PathBuf>,
}

impl Config {
    /// Checks required flags and converts the frequency code.
    ///
    /// The deposit text is only checked for emptiness here; parsing it is
    /// left to the calculator.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let deposit = cli.deposit.ok_or(AppError::MissingArgument("deposit"))?;
        let rate = cli.rate.ok_or(AppError::MissingArgument("rate"))?;
        let term = cli.term.ok_or(AppError::MissingArgument("term"))?;
        let frequency = cli.frequency.ok_or(AppError::MissingArgument("frequency"))?;

        if deposit.trim().is_empty() {
            return Err(AppError::EmptyDeposit);
        }
        if !rate.is_finite() {
            return Err(AppError::InvalidRate(rate));
        }

        Ok(Config {
            deposit,
            rate,
            term,
            frequency: PaymentFrequency::from_code(frequency)?,
            decimal_places: cli.decimal_places,
            csv_test: cli.csv_test,
        })
    }
}
