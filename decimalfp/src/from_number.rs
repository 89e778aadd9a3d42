/*!

Construction from other number types (§6 "construction family"): integers
of any width, decimal literal text, IEEE-754 binary floats, and arbitrary
rationals.

Every binary float has a finite exact decimal expansion — its denominator
is always a power of two, and a power of two always divides a power of ten
— so [`Decimal::from_f32`]/[`Decimal::from_f64`] never fail on a finite
input; only `NaN`/`±Infinity` produce [`Error::CannotRepresent`] (§6's
resolved Open Question).

*/

use core::str::FromStr;

use crate::bigint::BigInt;
use crate::decimal::Decimal;
use crate::digits::BigUInt;
use crate::error::{Error, Result};
use crate::parse;
use crate::rounding::{self, RoundingMode};

impl Decimal {
    /// Builds a [`Decimal`] from a signed 128-bit integer, precision 0.
    pub fn from_i128(n: i128) -> Result<Decimal> {
        if n == 0 {
            return Decimal::zero(0);
        }
        let sign = if n < 0 { -1 } else { 1 };
        Decimal::from_raw(sign, BigUInt::from_u128(n.unsigned_abs()), 0)
    }

    /// Builds a [`Decimal`] from an unsigned 128-bit integer, precision 0.
    pub fn from_u128(n: u128) -> Result<Decimal> {
        if n == 0 {
            return Decimal::zero(0);
        }
        Decimal::from_raw(1, BigUInt::from_u128(n), 0)
    }

    /// Builds a [`Decimal`] from an arbitrary-precision integer, precision 0.
    pub fn from_bigint(n: &BigInt) -> Result<Decimal> {
        if n.is_zero() {
            return Decimal::zero(0);
        }
        Decimal::from_raw(n.signum() as i8, n.magnitude().clone(), 0)
    }

    /// Parses a decimal literal and re-expresses it at exactly `prec`
    /// fractional digits, rounding with the process-wide default mode if
    /// digits must be dropped (§6 `from_string` with an explicit precision
    /// override).
    pub fn parse(s: &str, prec: u32) -> Result<Decimal> {
        parse::parse_with_precision(s, prec, rounding::get_default_rounding())
    }

    /// Builds a [`Decimal`] exactly representing a `f64` (§6
    /// `from_binary_float`). Fails with [`Error::CannotRepresent`] only for
    /// `NaN`/`±Infinity` — every finite `f64` has a finite exact decimal
    /// expansion.
    pub fn from_f64(v: f64) -> Result<Decimal> {
        let (sign, mantissa, exp2) = decompose_f64(v).ok_or(Error::CannotRepresent)?;
        if mantissa == 0 {
            return Decimal::zero(0);
        }
        let mantissa = BigUInt::from_u128(mantissa);
        if exp2 >= 0 {
            let mag = mantissa.mul(&pow2(exp2 as u32)?)?;
            Decimal::from_raw(sign, mag, 0)
        } else {
            let k = (-exp2) as u32;
            let mag = mantissa.mul(&pow5(k)?)?;
            Decimal::from_raw(sign, mag, k)
        }
    }

    /// Builds a [`Decimal`] exactly representing a `f32` (widened to `f64`,
    /// which never loses precision for a binary float).
    pub fn from_f32(v: f32) -> Result<Decimal> {
        Decimal::from_f64(v as f64)
    }

    /// Builds a [`Decimal`] from a rational `num / den`, re-expressed at
    /// exactly `prec` fractional digits using the process-wide default
    /// rounding mode (§6 `from_rational`).
    pub fn from_ratio(num: &BigInt, den: &BigInt, prec: u32) -> Result<Decimal> {
        if den.is_zero() {
            return Err(Error::DivideByZero);
        }
        let num = Decimal::from_bigint(num)?;
        let den = Decimal::from_bigint(den)?;
        num.checked_div_with_prec(&den, prec, rounding::get_default_rounding())
    }

    /// Re-expresses `self` at exactly `prec` fractional digits, rounding
    /// with `rounding_mode` if digits are dropped (§6 `from_decimal`
    /// re-precision; a public name for [`Decimal::adjust`]).
    pub fn with_precision(&self, prec: u32, rounding_mode: RoundingMode) -> Result<Decimal> {
        self.adjust(prec, rounding_mode)
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Decimal> {
        parse::parse(s)
    }
}

/// Decomposes a finite `f64` into `(sign, mantissa, exp2)` with
/// `value == sign * mantissa * 2^exp2` and `mantissa` an integer that fits
/// in a `u128` (at most 53 significant bits). `None` for `NaN`/`±Infinity`.
fn decompose_f64(v: f64) -> Option<(i8, u128, i64)> {
    if !v.is_finite() {
        return None;
    }
    if v == 0.0 {
        return Some((0, 0, 0));
    }
    let sign: i8 = if v.is_sign_negative() { -1 } else { 1 };
    let bits = v.to_bits();
    let raw_exp = ((bits >> 52) & 0x7ff) as i64;
    let raw_frac = bits & ((1u64 << 52) - 1);
    let (mantissa, exp2) = if raw_exp == 0 {
        // Subnormal: no implicit leading bit.
        (raw_frac as u128, -1074i64)
    } else {
        (((1u64 << 52) | raw_frac) as u128, raw_exp - 1023 - 52)
    };
    Some((sign, mantissa, exp2))
}

fn pow2(exp: u32) -> Result<BigUInt> {
    pow_small(2, exp)
}

fn pow5(exp: u32) -> Result<BigUInt> {
    pow_small(5, exp)
}

fn pow_small(base: u64, exp: u32) -> Result<BigUInt> {
    let mut acc = BigUInt::one();
    let mut b = BigUInt::from_u128(base as u128);
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            acc = acc.mul(&b)?;
        }
        e >>= 1;
        if e > 0 {
            b = b.mul(&b)?;
        }
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_matches_parse() {
        let a: Decimal = "123.45".parse().unwrap();
        assert_eq!(a, parse::parse("123.45").unwrap());
    }

    #[test]
    fn parse_with_precision_override() {
        let a = Decimal::parse("1.005", 2).unwrap();
        assert_eq!(a.precision(), 2);
    }

    #[test]
    fn integer_constructors_roundtrip() {
        assert_eq!(Decimal::from_i128(-42).unwrap(), "-42".parse::<Decimal>().unwrap());
        assert_eq!(Decimal::from_u128(7).unwrap(), "7".parse::<Decimal>().unwrap());
        assert_eq!(Decimal::from_i128(0).unwrap(), Decimal::zero(0).unwrap());
    }

    #[test]
    fn from_bigint_matches_from_i128() {
        let b = BigInt::from_i128(-9999);
        assert_eq!(Decimal::from_bigint(&b).unwrap(), Decimal::from_i128(-9999).unwrap());
    }

    #[test]
    fn from_f64_exact_binary_fractions() {
        assert_eq!(Decimal::from_f64(0.5).unwrap(), "0.5".parse::<Decimal>().unwrap());
        assert_eq!(Decimal::from_f64(0.25).unwrap(), "0.25".parse::<Decimal>().unwrap());
        assert_eq!(Decimal::from_f64(2.0).unwrap(), "2".parse::<Decimal>().unwrap());
        assert_eq!(Decimal::from_f64(-1.5).unwrap(), "-1.5".parse::<Decimal>().unwrap());
        assert_eq!(Decimal::from_f64(0.0).unwrap(), Decimal::zero(0).unwrap());
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert_eq!(Decimal::from_f64(f64::NAN), Err(Error::CannotRepresent));
        assert_eq!(Decimal::from_f64(f64::INFINITY), Err(Error::CannotRepresent));
    }

    #[test]
    fn from_f32_widens_losslessly() {
        assert_eq!(Decimal::from_f32(0.125).unwrap(), "0.125".parse::<Decimal>().unwrap());
    }

    #[test]
    fn from_ratio_matches_spec_example() {
        let q = Decimal::from_ratio(&BigInt::from_i128(1), &BigInt::from_i128(4), 5).unwrap();
        assert_eq!(q, "0.25000".parse::<Decimal>().unwrap());
    }

    #[test]
    fn with_precision_rounds_like_adjust() {
        let x: Decimal = "1.005".parse().unwrap();
        assert_eq!(x.with_precision(2, RoundingMode::HalfEven).unwrap(), "1.00".parse::<Decimal>().unwrap());
    }
}
