//! Interest payment frequency codes accepted on the command line and in
//! batch files.

use crate::error::{AppError, Result};

/// How often interest is paid out and reinvested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentFrequency {
    /// Simple interest, paid once when the term ends.
    AtMaturity,
    Monthly,
    Quarterly,
    Annually,
}

impl PaymentFrequency {
    /// Maps a frequency code to its variant.
    ///
    /// `0` = at maturity, `1` = monthly, `2` = quarterly, `3` = annually.
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(PaymentFrequency::AtMaturity),
            1 => Ok(PaymentFrequency::Monthly),
            2 => Ok(PaymentFrequency::Quarterly),
            3 => Ok(PaymentFrequency::Annually),
            _ => Err(AppError::InvalidFrequency(code)),
        }
    }

    /// Number of interest payments per year, `0` meaning at maturity.
    pub fn payments_per_year(self) -> i32 {
        match self {
            PaymentFrequency::AtMaturity => 0,
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::Annually => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_map_to_payments_per_year() {
        let cases = [(0, 0), (1, 12), (2, 4), (3, 1)];
        for (code, expected) in cases {
            let frequency = PaymentFrequency::from_code(code).unwrap();
            assert_eq!(frequency.payments_per_year(), expected, "code {}", code);
        }
    }

    #[test]
    fn test_unknown_codes_rejected() {
        for code in [-1, 4, 12] {
            let err = PaymentFrequency::from_code(code).unwrap_err();
            assert!(matches!(err, AppError::InvalidFrequency(c) if c == code));
        }
    }
}
