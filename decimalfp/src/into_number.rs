/*!

Integer-ratio, magnitude, and integer conversions (§4.8): `as_integer_ratio`,
`as_tuple`, and the narrowing conversions to the host's own integer types.

Per §3 ("Lifecycles"), the spec allows `numerator`/`denominator` to be
memoised on first query. This crate does not cache them: `Decimal` carries
no interior mutability (and pulling in a `once_cell`-style dependency for a
single pair of lazily-computed integers that are cheap to recompute — a gcd
and two multiplies, bounded by `MAX_DIGITS` — would cost more in dependency
surface than it saves), so [`Decimal::numerator`]/[`Decimal::denominator`]
recompute on every call. See DESIGN.md.

*/

use crate::bigint::BigInt;
use crate::decimal::Decimal;
use crate::digits::BigUInt;
use crate::error::Result;

impl Decimal {
    /// `(numerator, denominator)` of the mathematical value, fully reduced
    /// (`gcd(numerator, denominator) == 1`, `denominator >= 1`) (§4.8).
    pub fn as_integer_ratio(&self) -> (BigInt, BigInt) {
        if self.is_zero() {
            return (BigInt::zero(), BigInt::from_u128(1));
        }
        let coeff = self.coefficient();
        if self.precision() == 0 {
            return (BigInt::from_parts(self.signum() as i8, coeff), BigInt::from_u128(1));
        }
        let den = BigUInt::pow10(self.precision()).expect("precision already validated");
        let g = coeff.gcd(&den);
        let num = coeff.divmod(&g).0;
        let den = den.divmod(&g).0;
        (BigInt::from_parts(self.signum() as i8, num), BigInt::from_parts(1, den))
    }

    /// The reduced numerator of [`Decimal::as_integer_ratio`].
    pub fn numerator(&self) -> BigInt {
        self.as_integer_ratio().0
    }

    /// The reduced denominator of [`Decimal::as_integer_ratio`] (always
    /// `>= 1`).
    pub fn denominator(&self) -> BigInt {
        self.as_integer_ratio().1
    }

    /// `(sign, coefficient, exponent)` with `exponent = -precision()` after
    /// trimming any trailing zero digits from the coefficient (§4.8
    /// `as_tuple`) — e.g. `1.50` (coefficient `150`, precision 2) becomes
    /// `(+, 15, -1)`.
    pub fn as_tuple(&self) -> (i32, BigInt, i64) {
        if self.is_zero() {
            return (0, BigInt::zero(), -(self.precision() as i64));
        }
        let mut coeff = self.coefficient();
        let mut exp = -(self.precision() as i64);
        loop {
            let (q, r) = coeff.divmod_small(10);
            if r != 0 || q.is_zero() {
                break;
            }
            coeff = q;
            exp += 1;
        }
        (self.signum(), BigInt::from_parts(1, coeff), exp)
    }

    /// Converts to a [`BigInt`], truncating toward zero (the integer part
    /// of [`Decimal::trunc`]).
    pub fn to_bigint(&self) -> Result<BigInt> {
        let t = self.trunc()?;
        Ok(BigInt::from_parts(t.signum() as i8, t.coefficient()))
    }

    /// Converts to an `i128`, truncating toward zero, if it fits.
    pub fn to_i128(&self) -> Result<Option<i128>> {
        Ok(self.to_bigint()?.to_i128())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn as_integer_ratio_matches_spec_examples() {
        let (n, d) = parse("0.1").unwrap().as_integer_ratio();
        assert_eq!((n, d), (BigInt::from_i128(1), BigInt::from_i128(10)));

        let (n, d) = parse("0.25").unwrap().as_integer_ratio();
        assert_eq!((n, d), (BigInt::from_i128(1), BigInt::from_i128(4)));
    }

    #[test]
    fn as_integer_ratio_integer_has_denominator_one() {
        let (n, d) = parse("-7").unwrap().as_integer_ratio();
        assert_eq!((n, d), (BigInt::from_i128(-7), BigInt::from_i128(1)));
    }

    #[test]
    fn reduced_ratio_is_fully_reduced() {
        for s in ["0.1", "0.25", "-3.75", "123.456", "0"] {
            let x = parse(s).unwrap();
            let (n, den) = x.as_integer_ratio();
            assert_eq!(n.gcd(&den), BigInt::from_i128(1), "{s}");
            assert!(den.signum() >= 0, "{s}");
        }
    }

    #[test]
    fn as_tuple_trims_trailing_zeros() {
        let (sign, coeff, exp) = parse("1.50").unwrap().as_tuple();
        assert_eq!(sign, 1);
        assert_eq!(coeff, BigInt::from_i128(15));
        assert_eq!(exp, -1);
    }

    #[test]
    fn to_bigint_truncates() {
        assert_eq!(parse("9.99").unwrap().to_bigint().unwrap(), BigInt::from_i128(9));
        assert_eq!(parse("-9.99").unwrap().to_bigint().unwrap(), BigInt::from_i128(-9));
    }

    #[test]
    fn to_i128_round_trips_small_values() {
        assert_eq!(parse("42").unwrap().to_i128().unwrap(), Some(42));
    }
}
