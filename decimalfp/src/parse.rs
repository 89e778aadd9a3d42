/*!

The parser (§4.5): decimal literal text to a [`Decimal`].

Grammar: `[ws]* [sign]? ((digits ('.' digits?)?) | ('.' digits)) ([eE]
[sign]? digits)? [ws]*`. No support for `NaN`/`Infinity`/underscores — this
is a literal, line-for-line rendition of §4.5's grammar, not a superset of
it (see SPEC_FULL.md's note on the Open Question about digit separators).

*/

use alloc::string::String;

use crate::decimal::{check_precision, Decimal, MAX_DEC_PRECISION};
use crate::digits::BigUInt;
use crate::error::{Error, Result};
use crate::rounding::RoundingMode;

struct Scan<'a> {
    bytes: &'a [u8],
    text: &'a str,
    pos: usize,
}

impl<'a> Scan<'a> {
    fn new(text: &'a str) -> Self {
        Scan { bytes: text.as_bytes(), text, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat_digits(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    fn at_end(&self) -> bool {
        self.pos == self.bytes.len()
    }
}

/// The parts of a literal after scanning, before precision is decided.
struct Scanned {
    sign: i8,
    coeff: BigUInt,
    /// `len(F) - E`: the literal's *natural* declared precision, before the
    /// `max(0, ...)` clamp from §4.5 (negative means the coefficient still
    /// needs a `10^-this` absorbed into it).
    dec_prec_signed: i64,
}

fn scan(s: &str) -> Result<Scanned> {
    let trimmed = s.trim();
    let mut sc = Scan::new(trimmed);

    let sign = match sc.peek() {
        Some(b'+') => {
            sc.pos += 1;
            1i8
        }
        Some(b'-') => {
            sc.pos += 1;
            -1i8
        }
        _ => 1i8,
    };

    let int_part = sc.eat_digits();
    let frac_part = if sc.peek() == Some(b'.') {
        sc.pos += 1;
        sc.eat_digits()
    } else {
        ""
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(Error::InvalidLiteral);
    }

    let mut exp: i64 = 0;
    if matches!(sc.peek(), Some(b'e') | Some(b'E')) {
        sc.pos += 1;
        let exp_negative = match sc.peek() {
            Some(b'+') => {
                sc.pos += 1;
                false
            }
            Some(b'-') => {
                sc.pos += 1;
                true
            }
            _ => false,
        };
        let exp_digits = sc.eat_digits();
        if exp_digits.is_empty() {
            return Err(Error::InvalidLiteral);
        }
        let magnitude: i64 = exp_digits.parse().map_err(|_| Error::InvalidLiteral)?;
        exp = if exp_negative { -magnitude } else { magnitude };
    }

    if !sc.at_end() {
        return Err(Error::InvalidLiteral);
    }

    let mut coeff_str = String::with_capacity(int_part.len() + frac_part.len());
    coeff_str.push_str(int_part);
    coeff_str.push_str(frac_part);
    let coeff = if coeff_str.is_empty() {
        BigUInt::zero()
    } else {
        BigUInt::from_decimal_digits(&coeff_str)?
    };

    let frac_len = frac_part.len() as i64;
    Ok(Scanned { sign, coeff, dec_prec_signed: frac_len - exp })
}

fn build_natural(scanned: Scanned) -> Result<Decimal> {
    let Scanned { sign, coeff, dec_prec_signed } = scanned;
    if dec_prec_signed >= 0 {
        if dec_prec_signed > MAX_DEC_PRECISION as i64 {
            return Err(Error::PrecisionLimitExceeded { max: MAX_DEC_PRECISION });
        }
        Decimal::from_raw(sign, coeff, dec_prec_signed as u32)
    } else {
        let extra = (-dec_prec_signed) as u32;
        let shifted = coeff.mul_pow10(extra)?;
        Decimal::from_raw(sign, shifted, 0)
    }
}

/// Parses a decimal literal with the natural precision implied by the
/// text (§4.5).
pub fn parse(s: &str) -> Result<Decimal> {
    build_natural(scan(s)?)
}

/// Parses a decimal literal, then re-expresses it at exactly `prec`
/// fractional digits, rounding with `rounding` if digits are dropped.
pub fn parse_with_precision(s: &str, prec: u32, rounding: RoundingMode) -> Result<Decimal> {
    check_precision(prec)?;
    let natural = build_natural(scan(s)?)?;
    natural.adjust(prec, rounding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::RoundingMode;

    #[test]
    fn basic_literals() {
        let d = parse("123.45").unwrap();
        assert_eq!(d.precision(), 2);
        assert_eq!(d.coefficient().to_decimal_digits(), "12345");

        let d = parse("-0.5").unwrap();
        assert_eq!(d.signum(), -1);
        assert_eq!(d.precision(), 1);

        let d = parse("+7").unwrap();
        assert_eq!(d.precision(), 0);
        assert_eq!(d.signum(), 1);
    }

    #[test]
    fn whitespace_tolerated() {
        assert_eq!(parse("  42  ").unwrap(), parse("42").unwrap());
    }

    #[test]
    fn leading_dot_and_trailing_dot() {
        assert_eq!(parse(".5").unwrap(), parse("0.5").unwrap());
        let d = parse("3.").unwrap();
        assert_eq!(d.precision(), 0);
    }

    #[test]
    fn exponents() {
        let d = parse("1.5e2").unwrap();
        assert_eq!(d.precision(), 0);
        assert_eq!(d.coefficient().to_decimal_digits(), "150");

        let d = parse("1.5e-2").unwrap();
        assert_eq!(d.precision(), 3);
        assert_eq!(d.coefficient().to_decimal_digits(), "15");
    }

    #[test]
    fn zero_has_zero_sign() {
        let d = parse("-0.00").unwrap();
        assert_eq!(d.signum(), 0);
        assert!(d.is_zero());
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", ".", "-", "1.2.3", "1e", "1 2", "abc", "1_000"] {
            assert!(parse(bad).is_err(), "expected {bad:?} to fail");
        }
    }

    #[test]
    fn parse_with_precision_rounds() {
        let d = parse_with_precision("1.005", 2, RoundingMode::HalfEven).unwrap();
        assert_eq!(d.precision(), 2);
        // 1.005 at half_even rounds to 1.00 (0 is even)
        assert_eq!(d.coefficient().to_decimal_digits(), "100");
    }
}
