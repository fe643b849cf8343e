//! Term Deposit CLI
//!
//! Prints the final balance of a term deposit and optionally verifies a CSV
//! file of test cases.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --deposit 10000 --rate 1.1 --term 3 --frequency 1 --decimalplaces 2
//! cargo run -- --deposit 10000 --rate 1.1 --term 3 --frequency 1 --csvtest tests/data/test.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info` to see per-row CSV test results, `debug` or `trace` for more

use clap::Parser;
use log::debug;
use std::process;
use term_deposit::{AppError, BatchVerifier, Cli, Config, Result, TermDepositCalculator};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    debug!("Running with {:?}", config);

    let calculator = TermDepositCalculator::new();
    let balance = calculator.calculate_final_balance_str(
        &config.deposit,
        config.rate,
        config.frequency.payments_per_year(),
        config.term,
    )?;
    println!("Final balance: {}", balance.to_fixed_bank(config.decimal_places));

    if let Some(path) = &config.csv_test {
        let report = BatchVerifier::new(calculator).verify_file(path)?;
        if !report.is_success() {
            return Err(AppError::BatchFailed {
                failed: report.total() - report.passed(),
                total: report.total(),
            });
        }
    }

    Ok(())
}
