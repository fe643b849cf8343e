//! Property and edge case tests for the balance calculation.

use bigdecimal::BigDecimal;
use std::str::FromStr;
use term_deposit::{Balance, CalculatorError, TermDepositCalculator};

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn balance(principal: &str, rate: f64, per_year: i32, term: i32) -> Balance {
    TermDepositCalculator::new()
        .calculate_final_balance_str(principal, rate, per_year, term)
        .unwrap()
}

// ==================== FORMULAS ====================

#[test]
fn test_simple_interest_formula() {
    let cases = [
        ("10000", 1.1, 3, "10330"),
        ("1000", 5.0, 2, "1100"),
        ("250.75", 2.0, 4, "270.81"),
        ("0.01", 10.0, 1, "0.011"),
    ];

    for (principal, rate, term, expected) in cases {
        assert_eq!(
            balance(principal, rate, 0, term).as_decimal(),
            &dec(expected),
            "{} at {}% for {} years",
            principal,
            rate,
            term
        );
    }
}

#[test]
fn test_compound_interest_formula() {
    // 10% annually for 2 years: 1.1^2
    assert_eq!(balance("1000", 10.0, 1, 2).as_decimal(), &dec("1210"));

    // 8% quarterly for 1 year: 1.02^4
    assert_eq!(balance("1000", 8.0, 4, 1).as_decimal(), &dec("1082.43216"));

    // 12% monthly for 1 year: 1.01^12
    assert_eq!(
        balance("100", 12.0, 12, 1).as_decimal(),
        &dec("112.682503013196972066120100")
    );
}

#[test]
fn test_weekly_compounding() {
    assert_eq!(balance("1000", 5.0, 52, 1).to_fixed_bank(4), "1051.2458");
}

// ==================== PRECISION ====================

#[test]
fn test_large_principal_without_precision_loss() {
    let principal = format!("1{}", "0".repeat(114));
    assert_eq!(
        balance(&principal, 1.1, 12, 3).to_fixed_bank(0),
        "1033534916454078225679782255448432722745079551427440206564576599859159158471212532887402583138973419665405227371992"
    );
}

#[test]
fn test_hundred_digit_principal_scales_exactly() {
    let small = balance("10000", 1.1, 12, 3);
    let principal = format!("1{}", "0".repeat(120));
    let large = balance(&principal, 1.1, 12, 3);

    let factor = dec(&format!("1{}", "0".repeat(116)));
    assert_eq!(large.as_decimal(), &(small.as_decimal() * factor));
}

#[test]
fn test_long_fractional_principal() {
    let principal = format!("0.{}1", "0".repeat(99));
    let result = balance(&principal, 10.0, 1, 1);
    assert_eq!(result.as_decimal(), &dec(&format!("0.{}11", "0".repeat(99))));
}

#[test]
fn test_sixty_four_places() {
    assert_eq!(
        balance("10000", 1.1, 1, 3).to_fixed_bank(64),
        "10333.6433100000000000000000000000000000000000000000000000000000000000"
    );
}

#[test]
fn test_bankers_rounding_on_output() {
    // 1000 at 1.45% simple for 1 year is exactly 1014.5
    let result = balance("1000", 1.45, 0, 1);
    assert_eq!(result.as_decimal(), &dec("1014.5"));
    assert_eq!(result.to_fixed_bank(0), "1014");

    let result = balance("1000", 1.55, 0, 1);
    assert_eq!(result.to_fixed_bank(0), "1016");
}

// ==================== MONOTONICITY ====================

#[test]
fn test_increasing_in_principal() {
    let mut previous = balance("1", 2.5, 12, 5);
    for principal in ["2", "10", "1000", "1000.01", "99999999"] {
        let current = balance(principal, 2.5, 12, 5);
        assert!(current > previous, "principal {}", principal);
        previous = current;
    }
}

#[test]
fn test_non_decreasing_in_rate() {
    for per_year in [0, 1, 4, 12] {
        let mut previous = balance("10000", 0.0, per_year, 3);
        for rate in [0.5, 1.0, 1.1, 3.7, 10.0] {
            let current = balance("10000", rate, per_year, 3);
            assert!(current >= previous, "rate {} per_year {}", rate, per_year);
            previous = current;
        }
    }
}

#[test]
fn test_non_decreasing_in_term() {
    for per_year in [0, 1, 4, 12] {
        let mut previous = balance("10000", 1.1, per_year, 0);
        for term in 1..=10 {
            let current = balance("10000", 1.1, per_year, term);
            assert!(current >= previous, "term {} per_year {}", term, per_year);
            previous = current;
        }
    }
}

#[test]
fn test_non_decreasing_in_frequency() {
    let mut previous = balance("10000", 1.1, 1, 3);
    for per_year in 2..=52 {
        let current = balance("10000", 1.1, per_year, 3);
        assert!(current >= previous, "per_year {}", per_year);
        previous = current;
    }
}

// ==================== DETERMINISM ====================

#[test]
fn test_repeated_calls_are_identical() {
    let calculator = TermDepositCalculator::new();
    let principal = dec("123456789.123456789");
    let first = calculator
        .calculate_final_balance(&principal, 2.5, 12, 7)
        .unwrap();
    let second = calculator
        .calculate_final_balance(&principal, 2.5, 12, 7)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.to_fixed_bank(6), "147040663.404457");
}

#[test]
fn test_calculator_shared_across_threads() {
    let calculator = TermDepositCalculator::new();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(move || {
                calculator
                    .calculate_final_balance_str("10000", 1.1, 12, 3)
                    .unwrap()
                    .to_fixed_bank(0)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "10335");
    }
}

// ==================== VALIDATION ====================

#[test]
fn test_out_of_range_payments_per_year() {
    for per_year in [-1, 53, 100, i32::MIN, i32::MAX] {
        let err = TermDepositCalculator::new()
            .calculate_final_balance_str("10000", 1.1, per_year, 3)
            .unwrap_err();
        assert!(
            matches!(err, CalculatorError::Validation { field: "numberOfInterestPaidPerYear", .. }),
            "per_year {}",
            per_year
        );
    }
}

#[test]
fn test_non_numeric_principal() {
    for text in ["", "abc", "10,000", "1.2.3", "$100"] {
        let err = TermDepositCalculator::new()
            .calculate_final_balance_str(text, 1.1, 12, 3)
            .unwrap_err();
        assert!(matches!(err, CalculatorError::Parse { .. }), "input {:?}", text);
    }
}

#[test]
fn test_principal_is_not_validated() {
    // Zero and negative principals are accepted as-is.
    assert_eq!(balance("0", 1.1, 12, 3).to_fixed_bank(2), "0.00");
    assert_eq!(balance("-1000", 5.0, 0, 2).as_decimal(), &dec("-1100"));
}

#[test]
fn test_negative_rate() {
    assert_eq!(balance("1000", -10.0, 1, 2).as_decimal(), &dec("810"));
    assert_eq!(balance("1000", -10.0, 0, 2).as_decimal(), &dec("800"));
}
