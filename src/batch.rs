//! CSV batch verification.
//!
//! A batch file has one header row followed by rows of
//! `deposit,rate,term,frequency,decimal_places,expected`, matched by
//! position. Every row is run through the calculator and the rounded result
//! compared with the expected text.

use crate::calculator::TermDepositCalculator;
use crate::error::{AppError, Result};
use crate::frequency::PaymentFrequency;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One data row of a batch file.
#[derive(Debug, Deserialize)]
pub struct BatchRecord {
    /// Deposit amount as decimal text
    pub deposit: String,

    /// Annual rate in percent
    pub rate: f64,

    /// Term in years
    pub term: i32,

    /// Frequency code (0 = at maturity, 1 = monthly, 2 = quarterly, 3 = annually)
    pub frequency: i32,

    /// Decimal places used to render the result
    pub decimal_places: i32,

    /// Expected rendered result
    pub expected: String,
}

/// Outcome of a single batch row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    /// The rendered result matched the expected text.
    Passed { actual: String },

    /// The rendered result differed from the expected text.
    Failed { expected: String, actual: String },

    /// The row could not be read or calculated.
    Error(String),
}

/// A row number (1-based, header not counted) and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    pub row: usize,
    pub status: RowStatus,
}

/// Results of a batch run, in file order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub rows: Vec<RowOutcome>,
}

impl BatchReport {
    /// Total number of data rows seen.
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, RowStatus::Passed { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, RowStatus::Failed { .. }))
    }

    pub fn errors(&self) -> usize {
        self.count(|s| matches!(s, RowStatus::Error(_)))
    }

    /// Returns `true` if every row passed.
    pub fn is_success(&self) -> bool {
        self.passed() == self.total()
    }

    fn count(&self, predicate: impl Fn(&RowStatus) -> bool) -> usize {
        self.rows.iter().filter(|r| predicate(&r.status)).count()
    }
}

/// Runs batch files against a calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchVerifier {
    calculator: TermDepositCalculator,
}

impl BatchVerifier {
    pub fn new(calculator: TermDepositCalculator) -> Self {
        BatchVerifier { calculator }
    }

    /// Opens `path` and verifies every row in it.
    pub fn verify_file(&self, path: &Path) -> Result<BatchReport> {
        if !path.is_file() {
            return Err(AppError::CsvNotFound(path.to_path_buf()));
        }

        info!("CSV test file: {}", path.display());
        let file = File::open(path)?;
        self.verify_csv(BufReader::new(file))
    }

    /// Verifies every row read from `reader`.
    ///
    /// Rows that cannot be read or calculated are recorded as errors and the
    /// run continues. Only I/O failures of the reader abort the batch.
    pub fn verify_csv<R: Read>(&self, reader: R) -> Result<BatchReport> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut report = BatchReport::default();
        for (row_idx, result) in csv_reader.records().enumerate() {
            let row = row_idx + 1;

            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row, e);
                    report.rows.push(RowOutcome {
                        row,
                        status: RowStatus::Error(e.to_string()),
                    });
                    continue;
                }
            };

            let status = self.verify_record(&record);
            match &status {
                RowStatus::Passed { actual } => {
                    info!("Row {}: PASSED (result {})", row, actual)
                }
                RowStatus::Failed { expected, actual } => {
                    warn!("Row {}: FAILED (expected {}, result {})", row, expected, actual)
                }
                RowStatus::Error(message) => warn!("Row {}: {}", row, message),
            }
            report.rows.push(RowOutcome { row, status });
        }

        info!(
            "CSV test finished: {} passed, {} failed, {} errors",
            report.passed(),
            report.failed(),
            report.errors()
        );
        Ok(report)
    }

    fn verify_record(&self, record: &StringRecord) -> RowStatus {
        let parsed: BatchRecord = match record.deserialize(None) {
            Ok(parsed) => parsed,
            Err(e) => return RowStatus::Error(format!("invalid record: {}", e)),
        };

        let frequency = match PaymentFrequency::from_code(parsed.frequency) {
            Ok(frequency) => frequency,
            Err(e) => return RowStatus::Error(e.to_string()),
        };

        let balance = match self.calculator.calculate_final_balance_str(
            &parsed.deposit,
            parsed.rate,
            frequency.payments_per_year(),
            parsed.term,
        ) {
            Ok(balance) => balance,
            Err(e) => return RowStatus::Error(e.to_string()),
        };

        let actual = balance.to_fixed_bank(parsed.decimal_places);
        if actual == parsed.expected {
            RowStatus::Passed { actual }
        } else {
            RowStatus::Failed {
                expected: parsed.expected,
                actual,
            }
        }
    }
}
