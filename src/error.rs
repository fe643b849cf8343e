//! Error types for the deposit calculator and its command-line front end.

use bigdecimal::ParseBigDecimalError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI and batch operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors returned by the balance calculation itself.
///
/// These are handed back to the caller untouched; the calculator never logs
/// or recovers from them.
#[derive(Error, Debug)]
pub enum CalculatorError {
    /// An input lies outside the range the calculation is defined for
    #[error("{field} is out of range, valid range is {range}")]
    Validation {
        field: &'static str,
        value: String,
        range: String,
    },

    /// Text could not be read as a decimal number
    #[error("invalid decimal {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: ParseBigDecimalError,
    },
}

/// Errors that can occur while running the CLI or a batch verification.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// The calculator rejected its inputs
    #[error(transparent)]
    Calculation(#[from] CalculatorError),

    /// A required flag was not supplied
    #[error("please provide --{0}. Use --help for more information")]
    MissingArgument(&'static str),

    /// The deposit flag was supplied but empty
    #[error("please enter deposit amount. Example: 10000")]
    EmptyDeposit,

    /// The rate is NaN or infinite
    #[error("invalid interest rate {0}, must be a finite number")]
    InvalidRate(f64),

    /// Unknown interest paid frequency code
    #[error("invalid interest paid frequency {0}, should be value of 0, 1, 2 or 3")]
    InvalidFrequency(i32),

    /// The batch verification file does not exist
    #[error("csv file does not exist: {}", .0.display())]
    CsvNotFound(PathBuf),

    /// One or more batch rows did not produce the expected output
    #[error("{failed} of {total} csv test rows failed")]
    BatchFailed { failed: usize, total: usize },
}
