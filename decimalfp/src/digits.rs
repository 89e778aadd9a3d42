/*!

The digit-array body: an arbitrary-precision unsigned integer stored as a
little-endian sequence of base-`DIGIT_BASE` (10¹⁹) limbs.

This type is used two ways in the engine: as the *coefficient* storage of a
[`crate::Decimal`] once the magnitude no longer fits in a `u128` (§4.3 of the
spec), and — doubling as the abstract "BigInt interface" design note asks
for (§9) — as the backing store of the public [`crate::BigInt`] type used
for `numerator`/`denominator` and oversized `from_integer` inputs.

Choosing base 10¹⁹ means a digit-array's decimal string is just its digits
written MSB-first, most-significant one unpadded and the rest zero-padded
to 19 characters each — no digit-by-digit decimal conversion is needed for
formatting, and parsing is the same trick in reverse (chunk the literal's
digits into 19-character groups from the right). The cost of that
convenience shows up in [`BigUInt::divmod`], whose per-digit schoolbook long
division cannot lean on a textbook base-2/base-10 shortcut and instead
binary-searches each output digit.

*/

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::error::{Error, Result};
use crate::wide::{self, DIGIT_BASE, DIGIT_BASE_WIDE};

/// Hard cap on digit-array length (§3): about 155,000 decimal digits.
pub const MAX_DIGITS: usize = 8192;

/// An arbitrary-precision unsigned integer, little-endian base-10¹⁹ limbs.
///
/// Invariant: `digits` is never empty, and its last element is never zero
/// unless the whole array is the single digit `[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigUInt {
    digits: Vec<u64>,
}

impl BigUInt {
    /// The value zero.
    pub fn zero() -> Self {
        BigUInt { digits: vec![0] }
    }

    /// The value one.
    pub fn one() -> Self {
        BigUInt { digits: vec![1] }
    }

    /// `10^exp`, built directly without repeated multiplication.
    pub fn pow10(exp: u32) -> Result<Self> {
        let whole = exp / 19;
        let rem = exp % 19;
        if (whole as usize + 1) > MAX_DIGITS {
            return Err(Error::InternalLimitExceeded);
        }
        let mut digits = vec![0u64; whole as usize];
        digits.push(10u64.pow(rem));
        Ok(BigUInt { digits }.trimmed())
    }

    pub fn is_zero(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == 0
    }

    pub fn is_one(&self) -> bool {
        self.digits.len() == 1 && self.digits[0] == 1
    }

    pub fn from_u128(mut n: u128) -> Self {
        if n == 0 {
            return Self::zero();
        }
        let mut digits = Vec::with_capacity(3);
        while n > 0 {
            let (q, r) = wide::divmod128_by_u64(n, DIGIT_BASE);
            digits.push(r);
            n = q;
        }
        BigUInt { digits }
    }

    /// Converts back to a `u128`, if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        let mut acc: u128 = 0;
        for &d in self.digits.iter().rev() {
            acc = acc.checked_mul(DIGIT_BASE_WIDE)?;
            acc = acc.checked_add(d as u128)?;
        }
        Some(acc)
    }

    /// Parses an unsigned decimal digit string (ASCII digits only, no sign,
    /// no leading/trailing whitespace — the caller strips those).
    pub fn from_decimal_digits(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(Error::InvalidLiteral);
        }
        let n = bytes.len();
        let n_limbs = n.div_ceil(19);
        if n_limbs > MAX_DIGITS {
            return Err(Error::InternalLimitExceeded);
        }
        let mut digits = Vec::with_capacity(n_limbs);
        let mut end = n;
        while end > 0 {
            let start = end.saturating_sub(19);
            let chunk = &s[start..end];
            let value: u64 = chunk.parse().map_err(|_| Error::InvalidLiteral)?;
            digits.push(value);
            end = start;
        }
        Ok(BigUInt { digits }.trimmed())
    }

    /// Renders as a plain (unsigned, no leading zeros unless the value is
    /// zero) decimal digit string.
    pub fn to_decimal_digits(&self) -> alloc::string::String {
        use core::fmt::Write;
        let mut s = alloc::string::String::new();
        let mut iter = self.digits.iter().rev();
        if let Some(first) = iter.next() {
            let _ = write!(s, "{first}");
        }
        for d in iter {
            let _ = write!(s, "{d:019}");
        }
        s
    }

    fn trimmed(mut self) -> Self {
        while self.digits.len() > 1 && *self.digits.last().unwrap() == 0 {
            self.digits.pop();
        }
        self
    }

    fn check_limit(self) -> Result<Self> {
        if self.digits.len() > MAX_DIGITS {
            Err(Error::InternalLimitExceeded)
        } else {
            Ok(self)
        }
    }

    /// Multiplies by a single base-B digit (`0 <= d < DIGIT_BASE`).
    pub fn mul_small(&self, d: u64) -> Result<Self> {
        if d == 0 {
            return Ok(Self::zero());
        }
        let mut out = Vec::with_capacity(self.digits.len() + 1);
        let mut carry: u128 = 0;
        for &digit in &self.digits {
            let prod = wide::mul64_wide(digit, d) + carry;
            let (q, r) = wide::divmod128_by_u64(prod, DIGIT_BASE);
            out.push(r);
            carry = q;
        }
        while carry > 0 {
            let (q, r) = wide::divmod128_by_u64(carry, DIGIT_BASE);
            out.push(r);
            carry = q;
        }
        BigUInt { digits: out }.trimmed().check_limit()
    }

    /// Multiplies by `BASE^k` (prepends `k` zero limbs).
    pub fn shl_limbs(&self, k: usize) -> Result<Self> {
        if self.is_zero() || k == 0 {
            return Ok(self.clone());
        }
        if self.digits.len() + k > MAX_DIGITS {
            return Err(Error::InternalLimitExceeded);
        }
        let mut out = vec![0u64; k];
        out.extend_from_slice(&self.digits);
        Ok(BigUInt { digits: out })
    }

    /// Multiplies by `10^k` for arbitrary `k >= 0`.
    pub fn mul_pow10(&self, k: u32) -> Result<Self> {
        let whole = (k / 19) as usize;
        let rem = k % 19;
        let shifted = self.shl_limbs(whole)?;
        if rem == 0 {
            Ok(shifted)
        } else {
            shifted.mul_small(10u64.pow(rem))
        }
    }

    /// Number of decimal digits in this value's usual (no leading zeros)
    /// base-10 rendition; `0` renders as one digit.
    pub fn decimal_len(&self) -> u64 {
        let msd = *self.digits.last().unwrap();
        let msd_len = if msd == 0 { 1 } else { (msd.ilog10() + 1) as u64 };
        msd_len + 19 * (self.digits.len() as u64 - 1)
    }

    pub fn cmp_mag(&self, other: &Self) -> Ordering {
        if self.digits.len() != other.digits.len() {
            return self.digits.len().cmp(&other.digits.len());
        }
        for (a, b) in self.digits.iter().rev().zip(other.digits.iter().rev()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// `self + other`.
    pub fn add(&self, other: &Self) -> Result<Self> {
        let mut out = Vec::with_capacity(self.digits.len().max(other.digits.len()) + 1);
        let mut carry: u64 = 0;
        for i in 0..self.digits.len().max(other.digits.len()) {
            let a = self.digits.get(i).copied().unwrap_or(0);
            let b = other.digits.get(i).copied().unwrap_or(0);
            let sum = a as u128 + b as u128 + carry as u128;
            let (q, r) = wide::divmod128_by_u64(sum, DIGIT_BASE);
            out.push(r);
            carry = q as u64;
        }
        if carry > 0 {
            out.push(carry);
        }
        BigUInt { digits: out }.trimmed().check_limit()
    }

    /// `self - other`, assuming `self >= other`.
    ///
    /// # Panics
    ///
    /// Panics if `other > self` — callers always compare first and swap
    /// operands/sign as needed (§4.6: "different signs => magnitude-sub
    /// with sign of the larger magnitude").
    pub fn sub(&self, other: &Self) -> Self {
        assert!(self.cmp_mag(other) != Ordering::Less, "BigUInt::sub underflow");
        let mut out = Vec::with_capacity(self.digits.len());
        let mut borrow: i128 = 0;
        for i in 0..self.digits.len() {
            let a = self.digits[i] as i128;
            let b = other.digits.get(i).copied().unwrap_or(0) as i128;
            let mut diff = a - b - borrow;
            if diff < 0 {
                diff += DIGIT_BASE_WIDE as i128;
                borrow = 1;
            } else {
                borrow = 0;
            }
            out.push(diff as u64);
        }
        debug_assert_eq!(borrow, 0);
        BigUInt { digits: out }.trimmed()
    }

    /// Full schoolbook multiply.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        if self.is_zero() || other.is_zero() {
            return Ok(Self::zero());
        }
        if self.digits.len() + other.digits.len() > MAX_DIGITS {
            return Err(Error::InternalLimitExceeded);
        }
        let mut out = vec![0u64; self.digits.len() + other.digits.len()];
        for (j, &b) in other.digits.iter().enumerate() {
            if b == 0 {
                continue;
            }
            let mut carry: u128 = 0;
            for (i, &a) in self.digits.iter().enumerate() {
                let idx = i + j;
                let total = out[idx] as u128 + wide::mul64_wide(a, b) + carry;
                let (q, r) = wide::divmod128_by_u64(total, DIGIT_BASE);
                out[idx] = r;
                carry = q;
            }
            let mut idx = j + self.digits.len();
            while carry > 0 {
                let total = out[idx] as u128 + carry;
                let (q, r) = wide::divmod128_by_u64(total, DIGIT_BASE);
                out[idx] = r;
                carry = q;
                idx += 1;
            }
        }
        Ok(BigUInt { digits: out }.trimmed())
    }

    /// Divides by a single base-B digit, returning `(quotient, remainder)`.
    ///
    /// # Panics
    ///
    /// Panics if `d == 0`.
    pub fn divmod_small(&self, d: u64) -> (Self, u64) {
        assert!(d != 0, "BigUInt::divmod_small by zero");
        let mut out = vec![0u64; self.digits.len()];
        let mut rem: u64 = 0;
        for i in (0..self.digits.len()).rev() {
            let cur = (rem as u128) * DIGIT_BASE_WIDE + self.digits[i] as u128;
            let d128 = d as u128;
            out[i] = (cur / d128) as u64;
            rem = (cur % d128) as u64;
        }
        (BigUInt { digits: out }.trimmed(), rem)
    }

    /// Divides by another `BigUInt`, returning `(quotient, remainder)`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    pub fn divmod(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "BigUInt::divmod by zero");
        if let Some(d) = other.as_single_limb() {
            let (q, r) = self.divmod_small(d);
            return (q, BigUInt::from_u128(r as u128));
        }
        if self.cmp_mag(other) == Ordering::Less {
            return (Self::zero(), self.clone());
        }
        let mut quotient = vec![0u64; self.digits.len()];
        let mut remainder = Self::zero();
        for i in (0..self.digits.len()).rev() {
            remainder = remainder.shl_one_digit_and_add(self.digits[i]);
            let q = remainder.binary_search_quotient_digit(other);
            if q > 0 {
                let consumed = other.mul_small(q).expect("bounded by operand size");
                remainder = remainder.sub(&consumed);
            }
            quotient[i] = q;
        }
        (BigUInt { digits: quotient }.trimmed(), remainder)
    }

    fn as_single_limb(&self) -> Option<u64> {
        if self.digits.len() == 1 {
            Some(self.digits[0])
        } else {
            None
        }
    }

    fn shl_one_digit_and_add(&self, d: u64) -> Self {
        if self.is_zero() {
            return BigUInt { digits: vec![d] };
        }
        let mut out = Vec::with_capacity(self.digits.len() + 1);
        out.push(d);
        out.extend_from_slice(&self.digits);
        BigUInt { digits: out }.trimmed()
    }

    /// Largest `q` in `[0, DIGIT_BASE)` with `other * q <= self`.
    fn binary_search_quotient_digit(&self, other: &Self) -> u64 {
        let mut lo: u64 = 0;
        let mut hi: u64 = DIGIT_BASE - 1;
        while lo < hi {
            let mid = lo + (hi - lo).div_ceil(2);
            let trial = other.mul_small(mid).expect("bounded by operand size");
            if trial.cmp_mag(self) != Ordering::Greater {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        lo
    }

    /// Greatest common divisor, via the Euclidean algorithm.
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, r) = a.divmod(&b);
            a = b;
            b = r;
        }
        a
    }
}

impl Ord for BigUInt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_mag(other)
    }
}

impl PartialOrd for BigUInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u128_roundtrip() {
        for n in [0u128, 1, 9, 10, u64::MAX as u128, u128::MAX, 123_456_789_012_345_678_901_234] {
            assert_eq!(BigUInt::from_u128(n).to_u128(), Some(n));
        }
    }

    #[test]
    fn decimal_string_roundtrip() {
        for s in ["0", "1", "9", "18446744073709551615", "1" .repeat(50).as_str(), "100000000000000000000000000000000000000"] {
            let b = BigUInt::from_decimal_digits(s).unwrap();
            let back = b.to_decimal_digits();
            let expected = s.trim_start_matches('0');
            let expected = if expected.is_empty() { "0" } else { expected };
            assert_eq!(back, expected, "input {s}");
        }
    }

    #[test]
    fn add_sub_mul() {
        let a = BigUInt::from_u128(999_999_999_999_999_999_999);
        let b = BigUInt::from_u128(1);
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.to_decimal_digits(), "1000000000000000000000");
        assert_eq!(sum.sub(&b), a);
        let p = a.mul(&b).unwrap();
        assert_eq!(p, a);
    }

    #[test]
    fn mul_matches_u128_for_small_values() {
        let a = BigUInt::from_u128(123_456_789);
        let b = BigUInt::from_u128(987_654_321);
        let p = a.mul(&b).unwrap();
        assert_eq!(p.to_u128(), Some(123_456_789u128 * 987_654_321));
    }

    #[test]
    fn divmod_small_values() {
        let a = BigUInt::from_u128(1_000_000_007);
        let b = BigUInt::from_u128(97);
        let (q, r) = a.divmod(&b);
        assert_eq!(q.to_u128().unwrap() * 97 + r.to_u128().unwrap(), 1_000_000_007);
        assert!(r.to_u128().unwrap() < 97);
    }

    #[test]
    fn divmod_big_by_big() {
        let a = BigUInt::from_decimal_digits(&"7".repeat(60)).unwrap();
        let b = BigUInt::from_decimal_digits(&"3".repeat(30)).unwrap();
        let (q, r) = a.divmod(&b);
        let check = q.mul(&b).unwrap().add(&r).unwrap();
        assert_eq!(check, a);
        assert_eq!(r.cmp_mag(&b), Ordering::Less);
    }

    #[test]
    fn gcd_basic() {
        let a = BigUInt::from_u128(48);
        let b = BigUInt::from_u128(18);
        assert_eq!(a.gcd(&b).to_u128(), Some(6));
    }

    #[test]
    fn pow10_matches_mul_pow10() {
        let one = BigUInt::one();
        for k in [0u32, 1, 18, 19, 20, 37, 40] {
            assert_eq!(BigUInt::pow10(k).unwrap(), one.mul_pow10(k).unwrap());
        }
    }

    #[test]
    fn pow10_rejects_pathological_exponent_without_allocating() {
        // whole = exp / 19 far exceeds MAX_DIGITS; must fail before the
        // `vec![0u64; whole]` allocation, not after.
        assert!(matches!(
            BigUInt::pow10(999_999_999),
            Err(Error::InternalLimitExceeded)
        ));
    }
}
