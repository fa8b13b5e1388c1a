//! Exact rational numbers used for every bound value and query coordinate.
//!
//! All arithmetic in this crate is carried out over arbitrary-precision rationals so that
//! comparisons against zone boundaries are exact. A [`Rational`] can be created from any of the
//! literal forms accepted by the construction API:
//!
//! ```rust
//! use robust_tre::rational;
//!
//! let a = rational::integer(7);
//! let b = rational::ratio(3, 2).unwrap();
//! let c = rational::literal("1.4").unwrap();
//! let d = rational::literal("-7/5").unwrap();
//!
//! assert_eq!(c, rational::ratio(7, 5).unwrap());
//! assert_eq!(-c, d);
//! # let _ = (a, b);
//! ```

use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use thiserror::Error;

/// Arbitrary-precision rational number.
pub type Rational = BigRational;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RationalError {
    #[error("Denominator of rational literal is zero")]
    ZeroDenominator,

    #[error("Value {0} has no exact rational representation")]
    NotFinite(f64),

    #[error("Invalid rational literal \"{0}\"")]
    Literal(String),
}

/// Create a rational from an integer.
pub fn integer(value: i64) -> Rational {
    Rational::from_integer(BigInt::from(value))
}

/// Create the rational `numer / denom`.
pub fn ratio(numer: i64, denom: i64) -> Result<Rational, RationalError> {
    if denom == 0 {
        return Err(RationalError::ZeroDenominator);
    }

    Ok(Rational::new(BigInt::from(numer), BigInt::from(denom)))
}

/// Convert a float into the rational with exactly the same value.
///
/// Note that decimal constants like `0.1` are not exactly representable as floats, so the
/// resulting rational is the binary value the float actually holds. Use [`literal`] to get the
/// decimal value instead.
pub fn from_f64(value: f64) -> Result<Rational, RationalError> {
    Rational::from_float(value).ok_or(RationalError::NotFinite(value))
}

/// Nearest float to a rational value.
pub fn to_f64(value: &Rational) -> f64 {
    value.to_f64().unwrap_or_else(|| {
        if value.is_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    })
}

/// Parse an integer (`7`), decimal (`-1.25`) or fraction (`3/2`) literal.
pub fn literal(input: &str) -> Result<Rational, RationalError> {
    let text = input.trim();
    let invalid = || RationalError::Literal(input.to_string());

    if let Some((numer, denom)) = text.split_once('/') {
        let numer = BigInt::from_str(numer.trim()).map_err(|_| invalid())?;
        let denom = BigInt::from_str(denom.trim()).map_err(|_| invalid())?;

        if denom.is_zero() {
            return Err(RationalError::ZeroDenominator);
        }

        return Ok(Rational::new(numer, denom));
    }

    match text.split_once('.') {
        Some((whole, frac)) => {
            let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());

            if frac.is_empty() || !digits_only(frac) {
                return Err(invalid());
            }

            let (negative, whole) = match whole.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, whole),
            };

            if whole.is_empty() || !digits_only(whole) {
                return Err(invalid());
            }

            let numer = BigInt::from_str(&format!("{}{}", whole, frac)).map_err(|_| invalid())?;
            let denom = num_traits::pow(BigInt::from(10), frac.len());
            let value = Rational::new(numer, denom);

            Ok(if negative { -value } else { value })
        }
        None => BigInt::from_str(text)
            .map(Rational::from_integer)
            .map_err(|_| invalid()),
    }
}

/// Midpoint of two values.
pub fn midpoint(a: &Rational, b: &Rational) -> Rational {
    (a + b) / Rational::from_integer(BigInt::from(2))
}

/// Restrict `value` to the closed interval `[lower, upper]`.
///
/// The caller must ensure that `lower <= upper`.
pub fn clamp(value: Rational, lower: &Rational, upper: &Rational) -> Rational {
    if &value < lower {
        lower.clone()
    } else if &value > upper {
        upper.clone()
    } else {
        value
    }
}

/// Evenly spaced values covering `[start, end]`, both ends included.
///
/// Returns an empty vector when `count` is zero and `[start]` when `count` is one.
pub fn linspace(start: &Rational, end: &Rational, count: usize) -> Vec<Rational> {
    match count {
        0 => Vec::new(),
        1 => vec![start.clone()],
        _ => {
            let steps = Rational::from_integer(BigInt::from(count - 1));
            let width = end - start;

            (0..count)
                .map(|i| {
                    if i + 1 == count {
                        end.clone()
                    } else {
                        let frac = Rational::from_integer(BigInt::from(i)) / &steps;
                        start + &width * frac
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn parse_literals() -> Result<(), Box<dyn Error>> {
        assert_eq!(literal("7")?, integer(7));
        assert_eq!(literal("-3")?, integer(-3));
        assert_eq!(literal("1.4")?, ratio(7, 5)?);
        assert_eq!(literal("-0.25")?, ratio(-1, 4)?);
        assert_eq!(literal(" 3/2 ")?, ratio(3, 2)?);
        assert_eq!(literal("-6/4")?, ratio(-3, 2)?);

        Ok(())
    }

    #[test]
    fn reject_bad_literals() {
        assert_eq!(literal("1/0"), Err(RationalError::ZeroDenominator));
        assert!(matches!(literal("1."), Err(RationalError::Literal(_))));
        assert!(matches!(literal(".5"), Err(RationalError::Literal(_))));
        assert!(matches!(literal("abc"), Err(RationalError::Literal(_))));
        assert!(matches!(literal("1.-5"), Err(RationalError::Literal(_))));
        assert_eq!(ratio(1, 0), Err(RationalError::ZeroDenominator));
    }

    #[test]
    fn float_conversion_is_exact() -> Result<(), Box<dyn Error>> {
        assert_eq!(from_f64(0.5)?, ratio(1, 2)?);
        assert_eq!(from_f64(-3.0)?, integer(-3));
        assert!(matches!(from_f64(f64::NAN), Err(RationalError::NotFinite(_))));
        assert!(from_f64(f64::INFINITY).is_err());
        assert_eq!(to_f64(&ratio(3, 4)?), 0.75);

        Ok(())
    }

    #[test]
    fn linspace_includes_ends() {
        let values = linspace(&integer(0), &integer(20), 5);

        assert_eq!(values, vec![integer(0), integer(5), integer(10), integer(15), integer(20)]);
        assert_eq!(linspace(&integer(1), &integer(2), 1), vec![integer(1)]);
        assert!(linspace(&integer(1), &integer(2), 0).is_empty());
    }

    #[test]
    fn clamp_and_midpoint() -> Result<(), Box<dyn Error>> {
        assert_eq!(clamp(integer(5), &integer(0), &integer(3)), integer(3));
        assert_eq!(clamp(integer(-5), &integer(0), &integer(3)), integer(0));
        assert_eq!(clamp(integer(2), &integer(0), &integer(3)), integer(2));
        assert_eq!(midpoint(&integer(2), &integer(5)), ratio(7, 2)?);

        Ok(())
    }
}
