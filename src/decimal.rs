//! Arbitrary-precision decimal support for the calculator.
//!
//! `bigdecimal` gives exact addition and multiplication, rounding to a scale
//! and plain-text rendering. The one thing it lacks is a quotient with a fixed
//! number of places and an explicit tie rule, which [`div_round`] provides.

use crate::error::CalculatorError;
use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places kept by every division.
pub const DIVISION_PRECISION: i64 = 16;

/// Extra places carried while evaluating series for fractional powers.
const GUARD_DIGITS: i64 = 16;

/// Parses decimal text of any length into a `BigDecimal`.
pub fn parse(text: &str) -> Result<BigDecimal, CalculatorError> {
    BigDecimal::from_str(text).map_err(|source| CalculatorError::Parse {
        input: text.to_string(),
        source,
    })
}

/// Lifts a binary float into the decimal domain.
///
/// Uses the shortest decimal text that round-trips to the same `f64`, so
/// `1.1` becomes exactly `1.1` and `1.1 / 100.0` becomes
/// `0.011000000000000001`. NaN and infinities fail with a parse error.
pub fn lift_f64(value: f64) -> Result<BigDecimal, CalculatorError> {
    parse(&value.to_string())
}

/// `10^exponent`, or `None` if the exponent is negative or exceeds `u32`.
fn pow10(exponent: i64) -> Option<BigInt> {
    let exponent = u32::try_from(exponent).ok()?;
    Some(BigInt::from(10u32).pow(exponent))
}

/// Divides and rounds the quotient to `scale` decimal places.
///
/// Returns `None` if `denominator` is zero or the operands' scales are too
/// far apart to line up.
pub fn div_round(
    numerator: &BigDecimal,
    denominator: &BigDecimal,
    scale: i64,
    mode: RoundingMode,
) -> Option<BigDecimal> {
    if denominator.is_zero() {
        return None;
    }

    let (n, n_scale) = numerator.as_bigint_and_exponent();
    let (d, d_scale) = denominator.as_bigint_and_exponent();

    // One digit past `scale`, so the tie rule sees the next digit.
    let shift = scale.checked_add(1)?.checked_add(d_scale)?.checked_sub(n_scale)?;
    let (n, d) = if shift >= 0 {
        (n * pow10(shift)?, d)
    } else {
        (n, d * pow10(shift.checked_neg()?)?)
    };

    let mut digits = &n / &d;
    let inexact = !(&n % &d).is_zero();
    digits = digits * 10u32;
    if inexact {
        // Any nonzero remainder lies strictly beyond the extra digit.
        if n.sign() == d.sign() {
            digits = digits + BigInt::one();
        } else {
            digits = digits - BigInt::one();
        }
    }

    let exact_enough = BigDecimal::new(digits, scale.checked_add(2)?);
    Some(exact_enough.with_scale_round(scale, mode))
}

/// Raises `base` to a decimal `exponent`.
///
/// Integer exponents are exact. A negative integer exponent divides one by
/// the exact positive power once, at [`DIVISION_PRECISION`]; the last digits
/// can therefore differ from an implementation that divides at every
/// squaring step. A fractional exponent is evaluated as
/// `base^floor(e) * exp(frac(e) * ln(base))` and rounded to
/// [`DIVISION_PRECISION`].
///
/// Returns `None` where the power is undefined (a fractional exponent of a
/// non-positive base, or a negative exponent of zero) or where the exponent
/// is too large to evaluate.
pub fn pow(base: &BigDecimal, exponent: &BigDecimal) -> Option<BigDecimal> {
    if exponent.is_integer() {
        let n = exponent.to_i64()?;
        let power = pow_integer(base, n.unsigned_abs());
        if n >= 0 {
            return Some(power);
        }
        return div_round(
            &BigDecimal::one(),
            &power,
            DIVISION_PRECISION,
            RoundingMode::HalfUp,
        );
    }

    if *base <= BigDecimal::zero() {
        return None;
    }

    let whole = exponent.with_scale_round(0, RoundingMode::Floor);
    let fraction = exponent - &whole;
    let integral = pow(base, &whole)?;

    let scale = DIVISION_PRECISION + GUARD_DIGITS;
    let log = (fraction * ln(base, scale)?).with_scale_round(scale, RoundingMode::HalfEven);
    let fractional = exp(&log, scale)?;

    Some((integral * fractional).with_scale_round(DIVISION_PRECISION, RoundingMode::HalfUp))
}

/// Exponentiation by squaring; every product is exact.
fn pow_integer(base: &BigDecimal, mut exponent: u64) -> BigDecimal {
    let mut result = BigDecimal::one();
    let mut square = base.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = &result * &square;
        }
        exponent >>= 1;
        if exponent > 0 {
            square = &square * &square;
        }
    }
    result
}

/// Natural logarithm of a positive value.
fn ln(value: &BigDecimal, scale: i64) -> Option<BigDecimal> {
    let half = BigDecimal::new(BigInt::from(5), 1);
    let upper = BigDecimal::new(BigInt::from(15), 1);
    let two = BigDecimal::from(2);

    // ln(v) = ln(v / 2^k) + k * ln(2), with v / 2^k in [0.5, 1.5]
    let mut reduced = value.clone();
    let mut halvings: i64 = 0;
    while reduced > upper {
        reduced = &reduced * &half;
        halvings += 1;
    }
    while reduced < half {
        reduced = &reduced * &two;
        halvings -= 1;
    }

    let reduced = reduced.with_scale_round(scale, RoundingMode::HalfEven);
    let mut result = log_series(&reduced, scale)?;
    if halvings != 0 {
        result = result + log_series(&two, scale)? * BigDecimal::from(halvings);
    }
    Some(result.with_scale_round(scale, RoundingMode::HalfEven))
}

/// `ln(v) = 2 * atanh((v - 1) / (v + 1))`, summed until terms vanish at `scale`.
fn log_series(value: &BigDecimal, scale: i64) -> Option<BigDecimal> {
    let one = BigDecimal::one();
    let z = div_round(&(value - &one), &(value + &one), scale, RoundingMode::HalfEven)?;
    let z_squared = (&z * &z).with_scale_round(scale, RoundingMode::HalfEven);

    let mut power = z;
    let mut sum = BigDecimal::zero();
    let mut denominator: i64 = 1;
    loop {
        let term = div_round(
            &power,
            &BigDecimal::from(denominator),
            scale,
            RoundingMode::HalfEven,
        )?;
        if term.is_zero() {
            break;
        }
        sum = &sum + &term;
        power = (&power * &z_squared).with_scale_round(scale, RoundingMode::HalfEven);
        denominator += 2;
    }

    Some(sum * BigDecimal::from(2))
}

fn exp(value: &BigDecimal, scale: i64) -> Option<BigDecimal> {
    let one = BigDecimal::one();
    let half = BigDecimal::new(BigInt::from(5), 1);

    // exp(x) = exp(x / 2^k)^(2^k), with |x / 2^k| <= 1
    let mut reduced = value.clone();
    let mut squarings = 0u32;
    while reduced.abs() > one {
        reduced = &reduced * &half;
        squarings += 1;
    }

    let mut sum = one.clone();
    let mut term = one;
    let mut n: i64 = 1;
    loop {
        term = div_round(
            &(&term * &reduced),
            &BigDecimal::from(n),
            scale,
            RoundingMode::HalfEven,
        )?;
        if term.is_zero() {
            break;
        }
        sum = &sum + &term;
        n += 1;
    }

    for _ in 0..squarings {
        sum = (&sum * &sum).with_scale_round(scale, RoundingMode::HalfEven);
    }
    Some(sum)
}

/// Formats `value` with exactly `places` decimal places using banker's
/// rounding. Negative `places` round to tens, hundreds and so on.
pub fn to_fixed_string(value: &BigDecimal, places: i32) -> String {
    value
        .with_scale_round(i64::from(places), RoundingMode::HalfEven)
        .to_plain_string()
}

/// The final balance of a deposit, kept at full precision.
///
/// Nothing is rounded until a caller asks for a fixed number of places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use bigdecimal::BigDecimal;
/// use term_deposit::Balance;
///
/// let balance = Balance::new(BigDecimal::from_str("10334.5").unwrap());
/// assert_eq!(balance.to_fixed_bank(0), "10334");
/// assert_eq!(balance.to_fixed_bank(2), "10334.50");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Balance(BigDecimal);

impl Balance {
    /// Wraps a computed value.
    pub fn new(value: BigDecimal) -> Self {
        Balance(value)
    }

    /// Returns the value rounded half-to-even at `places` decimal places,
    /// padded with zeros to exactly that many places.
    pub fn to_fixed_bank(&self, places: i32) -> String {
        to_fixed_string(&self.0, places)
    }

    /// Borrows the underlying decimal.
    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_plain_string())
    }
}
