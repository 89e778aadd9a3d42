/*!

The engine's public arbitrary-precision signed integer (§9's "abstract
BigInt interface"): a thin sign wrapper around [`BigUInt`]. Used for
`numerator`/`denominator` (§4.8) and for `from_integer` inputs too large
for `i128`/`u128`.

*/

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use crate::digits::BigUInt;
use crate::error::Error;

/// An arbitrary-precision signed integer.
#[derive(Debug, Clone, Eq)]
pub struct BigInt {
    sign: i8,
    mag: BigUInt,
}

impl BigInt {
    /// The value zero.
    pub fn zero() -> Self {
        BigInt { sign: 0, mag: BigUInt::zero() }
    }

    pub(crate) fn from_parts(sign: i8, mag: BigUInt) -> Self {
        if mag.is_zero() {
            BigInt { sign: 0, mag }
        } else {
            BigInt { sign, mag }
        }
    }

    /// Builds a `BigInt` from a signed 128-bit integer.
    pub fn from_i128(n: i128) -> Self {
        if n == 0 {
            return Self::zero();
        }
        let sign = if n < 0 { -1 } else { 1 };
        let mag = BigUInt::from_u128(n.unsigned_abs());
        BigInt { sign, mag }
    }

    /// Builds a `BigInt` from an unsigned 128-bit integer.
    pub fn from_u128(n: u128) -> Self {
        if n == 0 {
            Self::zero()
        } else {
            BigInt { sign: 1, mag: BigUInt::from_u128(n) }
        }
    }

    /// `true` iff this value is zero.
    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    /// `-1`, `0`, or `+1`.
    pub fn signum(&self) -> i32 {
        self.sign as i32
    }

    pub(crate) fn magnitude(&self) -> &BigUInt {
        &self.mag
    }

    /// Converts to an `i128`, if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        let mag = self.mag.to_u128()?;
        if self.sign >= 0 {
            i128::try_from(mag).ok()
        } else {
            i128::try_from(mag).ok().map(|v| -v)
        }
    }

    /// Unary negation.
    pub fn neg(&self) -> Self {
        BigInt { sign: -self.sign, mag: self.mag.clone() }
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        BigInt { sign: if self.sign == 0 { 0 } else { 1 }, mag: self.mag.clone() }
    }

    /// Greatest common divisor (always non-negative).
    pub fn gcd(&self, other: &Self) -> Self {
        BigInt { sign: 1, mag: self.mag.gcd(&other.mag) }
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign < 0 {
            write!(f, "-")?;
        }
        write!(f, "{}", self.mag.to_decimal_digits())
    }
}

impl FromStr for BigInt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let (sign, rest) = match s.as_bytes().first() {
            Some(b'-') => (-1i8, &s[1..]),
            Some(b'+') => (1i8, &s[1..]),
            _ => (1i8, s),
        };
        let mag = BigUInt::from_decimal_digits(rest)?;
        Ok(Self::from_parts(sign, mag))
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.mag == other.mag
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => {
                if self.sign >= 0 {
                    self.mag.cmp_mag(&other.mag)
                } else {
                    other.mag.cmp_mag(&self.mag)
                }
            }
            non_eq => non_eq,
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        self.mag.to_decimal_digits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_i128() {
        for n in [0i128, 1, -1, i128::MAX, i128::MIN + 1] {
            assert_eq!(BigInt::from_i128(n).to_i128(), Some(n));
        }
    }

    #[test]
    fn display_and_parse() {
        for s in ["0", "123", "-123", "999999999999999999999999999999"] {
            let b: BigInt = s.parse().unwrap();
            assert_eq!(alloc::format!("{b}"), if s == "0" { "0" } else { s });
        }
    }

    #[test]
    fn ordering() {
        let a: BigInt = "-5".parse().unwrap();
        let b: BigInt = "3".parse().unwrap();
        assert!(a < b);
        assert!(BigInt::zero() > a);
        assert!(BigInt::zero() < b);
    }
}
