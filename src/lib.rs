//! # Term Deposit Calculator
//!
//! Calculates the balance of a fixed-term deposit at maturity, under simple
//! interest paid at maturity or compound interest reinvested up to 52 times a
//! year.
//!
//! ## Design Principles
//!
//! - **Arbitrary-precision arithmetic**: principals of any length via `bigdecimal`
//! - **Fixed division precision**: every quotient keeps 16 decimal places
//! - **No hidden rounding**: results stay exact until formatted with banker's rounding
//! - **Pure core**: the calculator holds no state and never logs its errors
//!
//! ## Example
//!
//! ```
//! use term_deposit::TermDepositCalculator;
//!
//! let calculator = TermDepositCalculator::new();
//! let balance = calculator
//!     .calculate_final_balance_str("10000", 3.7, 12, 5)
//!     .unwrap();
//! assert_eq!(balance.to_fixed_bank(0), "12029");
//! ```

pub mod batch;
pub mod calculator;
pub mod config;
pub mod decimal;
pub mod error;
pub mod frequency;

pub use batch::{BatchRecord, BatchReport, BatchVerifier, RowOutcome, RowStatus};
pub use calculator::{TermDepositCalculator, MAX_PAYMENTS_PER_YEAR, MIN_PAYMENTS_PER_YEAR};
pub use config::{Cli, Config};
pub use decimal::{Balance, DIVISION_PRECISION};
pub use error::{AppError, CalculatorError, Result};
pub use frequency::PaymentFrequency;
