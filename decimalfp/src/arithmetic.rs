/*!

Arithmetic kernels (§4.6): add/sub/mul/divmod/truediv/neg/abs/pow, each
dispatching on the representations of its operands.

Unlike the shifted-int/digit-array split the spec describes for the C
original, [`crate::digits::BigUInt`] already promotes itself transparently
(every limb operation just grows its `Vec`), so there is no separate
"overflow escape, retry in digit-array form" step here: the coefficient is
always carried as a [`BigUInt`] during a kernel and [`Decimal::from_raw`]
picks the inline `u128` representation afterwards when it fits (§4.4
"representation promotion" / "normalize"). The two-tier split is preserved
at the storage layer ([`crate::decimal::Repr`]); the arithmetic layer simply
always computes in the wider type, which costs nothing extra on the common
small-value path since `BigUInt::from_u128`/`to_u128` are direct conversions,
not allocations beyond the three-limb `Vec` every digit-array already needs.

Every operator below that can fail returns `Result<Decimal>` as its
`Output`, rather than panicking: precision/digit-limit overflow and
exact-division failure are ordinary, expected outcomes of this engine (see
spec.md §7), not programmer errors, so they are modeled as values a caller
is forced to handle (`(&a + &b)?`) instead of process aborts.

*/

use core::ops::{Add, Div, Mul, Neg, Rem, Sub};

use crate::decimal::{align, check_precision, Decimal};
use crate::digits::BigUInt;
use crate::error::{Error, Result};
use crate::rounding::{self, RoundingMode};

impl Decimal {
    /// `self + other`, exact. Result precision is `max(precision(self),
    /// precision(other))` (§4.6, invariant 4).
    pub fn checked_add(&self, other: &Decimal) -> Result<Decimal> {
        let (cx, cy, p) = align(self, other)?;
        if self.sign == other.sign || self.sign == 0 || other.sign == 0 {
            let sign = if self.sign != 0 { self.sign } else { other.sign };
            Decimal::from_raw(sign, cx.add(&cy)?, p)
        } else {
            match cx.cmp_mag(&cy) {
                core::cmp::Ordering::Equal => Decimal::zero(p),
                core::cmp::Ordering::Greater => Decimal::from_raw(self.sign, cx.sub(&cy), p),
                core::cmp::Ordering::Less => Decimal::from_raw(other.sign, cy.sub(&cx), p),
            }
        }
    }

    /// `self - other`, exact.
    pub fn checked_sub(&self, other: &Decimal) -> Result<Decimal> {
        self.checked_add(&other.neg())
    }

    /// `self * other`. Result precision is `precision(self) +
    /// precision(other)`; fails with [`Error::PrecisionLimitExceeded`] if
    /// that sum exceeds [`crate::MAX_DEC_PRECISION`] (§4.6).
    pub fn checked_mul(&self, other: &Decimal) -> Result<Decimal> {
        let p = self
            .dec_prec
            .checked_add(other.dec_prec)
            .ok_or(Error::PrecisionLimitExceeded { max: crate::decimal::MAX_DEC_PRECISION })?;
        check_precision(p)?;
        if self.is_zero() || other.is_zero() {
            return Decimal::zero(p);
        }
        let mag = self.coefficient().mul(&other.coefficient())?;
        Decimal::from_raw(self.sign * other.sign, mag, p)
    }

    /// Floor division: `(q, r)` with `q` an integer-valued [`Decimal`] and
    /// `r` at precision `max(precision(self), precision(other))`, such that
    /// `q*other + r == self`, `0 <= sign(other)*r < |other|` (§4.6).
    pub fn div_rem(&self, other: &Decimal) -> Result<(Decimal, Decimal)> {
        if other.is_zero() {
            return Err(Error::DivideByZero);
        }
        let (cx, cy, p) = align(self, other)?;
        if self.is_zero() {
            return Ok((Decimal::zero(0)?, Decimal::zero(p)?));
        }
        let (q_mag, r_mag) = cx.divmod(&cy);
        let same_sign = self.sign == other.sign;
        if same_sign || r_mag.is_zero() {
            let q = Decimal::from_raw(if q_mag.is_zero() { 0 } else { self.sign * other.sign }, q_mag, 0)?;
            let r = Decimal::from_raw(if r_mag.is_zero() { 0 } else { self.sign }, r_mag, p)?;
            Ok((q, r))
        } else {
            // truncated quotient rounded one further toward -inf, remainder
            // complemented so it keeps the divisor's sign (floor division).
            let q_mag = q_mag.add(&BigUInt::one())?;
            let r_mag = cy.sub(&r_mag);
            let q = Decimal::from_raw(-1, q_mag, 0)?;
            let r = Decimal::from_raw(other.sign, r_mag, p)?;
            Ok((q, r))
        }
    }

    /// Division with a caller-chosen result precision and rounding mode —
    /// always succeeds (beyond `DivideByZero`/limit errors) because any
    /// excess is simply rounded away (§4.6 `truediv`, precision supplied).
    pub fn checked_div_with_prec(
        &self,
        other: &Decimal,
        prec: u32,
        rounding_mode: RoundingMode,
    ) -> Result<Decimal> {
        if other.is_zero() {
            return Err(Error::DivideByZero);
        }
        check_precision(prec)?;
        if self.is_zero() {
            return Decimal::zero(prec);
        }
        // self / other = (cx * 10^-px) / (cy * 10^-py); shift cx left so the
        // quotient already carries `prec` fractional digits before rounding.
        let shift = prec + other.dec_prec;
        let numerator = self.coefficient().mul_pow10(shift)?;
        let denominator = other.coefficient().mul_pow10(self.dec_prec)?;
        let (q, r) = numerator.divmod(&denominator);
        let last_digit = (q.divmod_small(10).1) as u8;
        let twice_r = r.mul_small(2).unwrap_or_else(|_| r.clone());
        let cmp = twice_r.cmp_mag(&denominator);
        let sign = self.sign * other.sign;
        let up = rounding::should_round_up(rounding_mode, sign < 0, last_digit, r.is_zero(), cmp);
        let q = if up { q.add(&BigUInt::one())? } else { q };
        Decimal::from_raw(if q.is_zero() { 0 } else { sign }, q, prec)
    }

    /// Division with no requested precision: exact iff the denominator of
    /// the fully reduced rational `self/other` divides a power of ten,
    /// otherwise [`Error::CannotRepresent`] (§4.6 `truediv`, `p = -1`).
    pub fn checked_div(&self, other: &Decimal) -> Result<Decimal> {
        if other.is_zero() {
            return Err(Error::DivideByZero);
        }
        if self.is_zero() {
            return Decimal::zero(self.dec_prec.max(other.dec_prec));
        }
        let (num, den) = self.checked_div_exact_ratio(other)?;
        let g = num.gcd(&den);
        let (_, den) = (num.divmod(&g).0, den.divmod(&g).0);
        let prec = den.trailing_pow_of_ten().ok_or(Error::CannotRepresent)?;
        self.checked_div_with_prec(other, prec, rounding::get_default_rounding())
    }

    /// `self % other` — the remainder from [`Decimal::div_rem`].
    pub fn checked_rem(&self, other: &Decimal) -> Result<Decimal> {
        Ok(self.div_rem(other)?.1)
    }

    /// Raises `self` to the integer power `n` (§4.6 `pow`). `n < 0` falls
    /// back to the reciprocal of `pow(self, -n)`, which only succeeds when
    /// that reciprocal is itself an exact decimal (§4.6, §9).
    pub fn checked_pow(&self, n: i64) -> Result<Decimal> {
        if n == 0 {
            return Decimal::from_small(1, 1, 0);
        }
        if self.is_zero() {
            return if n > 0 {
                Decimal::zero(0)
            } else {
                Err(Error::DivideByZero)
            };
        }
        let mut acc = Decimal::from_small(1, 1, 0)?;
        let mut base = self.clone();
        let mut exp = n.unsigned_abs();
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.checked_mul(&base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.checked_mul(&base)?;
            }
        }
        if n > 0 {
            Ok(acc)
        } else {
            let one = Decimal::from_small(1, 1, 0)?;
            one.checked_div(&acc)
        }
    }

    /// Truncates to an integer-valued [`Decimal`] (`dec_prec = 0`), toward
    /// zero (§4.8 `trunc`/`to_int`).
    pub fn trunc(&self) -> Result<Decimal> {
        if self.dec_prec == 0 {
            return Ok(self.clone());
        }
        let divisor = BigUInt::pow10(self.dec_prec)?;
        let (q, _) = self.coefficient().divmod(&divisor);
        Decimal::from_raw(self.sign, q, 0)
    }

    /// Largest integer-valued [`Decimal`] `<= self` (§4.8 `floor`).
    pub fn floor(&self) -> Result<Decimal> {
        self.div_rem(&Decimal::from_small(1, 1, 0)?).map(|(q, _)| q)
    }

    /// Smallest integer-valued [`Decimal`] `>= self` (§4.8 `ceil`).
    pub fn ceil(&self) -> Result<Decimal> {
        let t = self.trunc()?;
        if t.compare(self) == core::cmp::Ordering::Equal || self.sign < 0 {
            Ok(t)
        } else {
            t.checked_add(&Decimal::from_small(1, 1, 0)?)
        }
    }

    /// Rounds to `n` fractional digits using `rounding_mode` (§6
    /// `round(n)`; an alias for [`Decimal::adjust`] at the public surface).
    pub fn round(&self, n: u32, rounding_mode: RoundingMode) -> Result<Decimal> {
        self.adjust(n, rounding_mode)
    }

    /// The reduced rational `(numerator, denominator)` of `self / other`,
    /// *before* deciding whether its denominator is a power of ten.
    fn checked_div_exact_ratio(&self, other: &Decimal) -> Result<(BigUInt, BigUInt)> {
        // self/other = (cx * 10^-px) / (cy * 10^-py) = cx*10^py / (cy*10^px)
        let (num, den) = if other.dec_prec >= self.dec_prec {
            (self.coefficient().mul_pow10(other.dec_prec - self.dec_prec)?, other.coefficient())
        } else {
            (self.coefficient(), other.coefficient().mul_pow10(self.dec_prec - other.dec_prec)?)
        };
        Ok((num, den))
    }
}

impl BigUInt {
    /// If `self == 2^a * 5^b` for some `a, b`, returns `max(a, b)` — the
    /// number of decimal digits needed to divide it out exactly (i.e. `self`
    /// divides `10^k`). Otherwise `None`.
    fn trailing_pow_of_ten(&self) -> Option<u32> {
        if self.is_one() {
            return Some(0);
        }
        let mut n = self.clone();
        let two = BigUInt::from_u128(2);
        let five = BigUInt::from_u128(5);
        let mut a = 0u32;
        loop {
            let (q, r) = n.divmod(&two);
            if !r.is_zero() {
                break;
            }
            n = q;
            a += 1;
        }
        let mut b = 0u32;
        loop {
            let (q, r) = n.divmod(&five);
            if !r.is_zero() {
                break;
            }
            n = q;
            b += 1;
        }
        if n.is_one() {
            Some(a.max(b))
        } else {
            None
        }
    }
}

macro_rules! forward_fallible_binop {
    (impl $trait:ident, $method:ident, $checked:ident) => {
        impl $trait for &Decimal {
            type Output = Result<Decimal>;
            fn $method(self, other: &Decimal) -> Result<Decimal> {
                Decimal::$checked(self, other)
            }
        }
        impl $trait for Decimal {
            type Output = Result<Decimal>;
            fn $method(self, other: Decimal) -> Result<Decimal> {
                Decimal::$checked(&self, &other)
            }
        }
        impl $trait<&Decimal> for Decimal {
            type Output = Result<Decimal>;
            fn $method(self, other: &Decimal) -> Result<Decimal> {
                Decimal::$checked(&self, other)
            }
        }
        impl $trait<Decimal> for &Decimal {
            type Output = Result<Decimal>;
            fn $method(self, other: Decimal) -> Result<Decimal> {
                Decimal::$checked(self, &other)
            }
        }
    };
}

forward_fallible_binop!(impl Add, add, checked_add);
forward_fallible_binop!(impl Sub, sub, checked_sub);
forward_fallible_binop!(impl Mul, mul, checked_mul);
forward_fallible_binop!(impl Div, div, checked_div);
forward_fallible_binop!(impl Rem, rem, checked_rem);

impl Neg for &Decimal {
    type Output = Decimal;
    fn neg(self) -> Decimal {
        Decimal::neg(self)
    }
}

impl Neg for Decimal {
    type Output = Decimal;
    fn neg(self) -> Decimal {
        Decimal::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn d(s: &str) -> Decimal {
        parse(s).unwrap()
    }

    #[test]
    fn add_matches_spec_example() {
        assert_eq!((&d("0.1") + &d("0.2")).unwrap(), d("0.3"));
        assert_eq!((&d("0.1") + &d("0.2")).unwrap().precision(), 1);
    }

    #[test]
    fn sub_self_is_zero() {
        let x = d("123.456");
        assert!((&x - &x).unwrap().is_zero());
    }

    #[test]
    fn mul_identity() {
        let x = d("42.5");
        let one = d("1");
        assert_eq!((&x * &one).unwrap(), x);
    }

    #[test]
    fn neg_and_add_cancel() {
        let x = d("7.25");
        assert!((&x + &(-&x)).unwrap().is_zero());
    }

    #[test]
    fn div_rem_matches_spec_example() {
        let (q, r) = d("7.5").div_rem(&d("-2")).unwrap();
        assert_eq!(q, d("-4"));
        assert_eq!(r, d("-0.5"));
    }

    #[test]
    fn div_rem_property_holds() {
        for (x, y) in [("7.5", "-2"), ("-7.5", "2"), ("10", "3"), ("-10", "-3"), ("1", "3")] {
            let (x, y) = (d(x), d(y));
            let (q, r) = x.div_rem(&y).unwrap();
            let check = q.checked_mul(&y).unwrap().checked_add(&r).unwrap();
            assert_eq!(check, x, "{x:?} vs {y:?}");
            assert!(r.is_zero() || r.signum() == y.signum());
        }
    }

    #[test]
    fn div_without_precision_fails_for_one_third() {
        assert_eq!(d("1").checked_div(&d("3")), Err(Error::CannotRepresent));
    }

    #[test]
    fn div_with_precision_matches_spec_example() {
        let q = d("1").checked_div_with_prec(&d("3"), 5, RoundingMode::HalfEven).unwrap();
        assert_eq!(q, d("0.33333"));
    }

    #[test]
    fn div_exact_power_of_two_denominator() {
        assert_eq!(d("1").checked_div(&d("4")).unwrap(), d("0.25"));
    }

    #[test]
    fn round_half_even_vs_half_down() {
        assert_eq!(d("1.5").round(0, RoundingMode::HalfEven).unwrap(), d("2"));
        assert_eq!(d("1.5").round(0, RoundingMode::HalfDown).unwrap(), d("1"));
    }

    #[test]
    fn pow_repeated_squaring() {
        assert_eq!(d("2").checked_pow(10).unwrap(), d("1024"));
        assert_eq!(d("5").checked_pow(0).unwrap(), d("1"));
    }

    #[test]
    fn pow_negative_falls_back_to_reciprocal() {
        assert_eq!(d("2").checked_pow(-2).unwrap(), d("0.25"));
    }

    #[test]
    fn trunc_floor_ceil() {
        assert_eq!(d("1.9").trunc().unwrap(), d("1"));
        assert_eq!(d("-1.9").trunc().unwrap(), d("-1"));
        assert_eq!(d("1.1").floor().unwrap(), d("1"));
        assert_eq!(d("-1.1").floor().unwrap(), d("-2"));
        assert_eq!(d("1.1").ceil().unwrap(), d("2"));
        assert_eq!(d("-1.1").ceil().unwrap(), d("-1"));
    }

    #[test]
    fn precision_rules_hold() {
        let x = d("1.23");
        let y = d("4.5");
        assert_eq!((&x + &y).unwrap().precision(), x.precision().max(y.precision()));
        assert_eq!((&x * &y).unwrap().precision(), x.precision() + y.precision());
    }

    #[test]
    fn big_values_force_digit_array() {
        let a = Decimal::from_i128_helper();
        let b = a.checked_sub(&Decimal::from_small(1, 1, 0).unwrap()).unwrap();
        assert_eq!((&b + &Decimal::from_small(1, 1, 0).unwrap()).unwrap(), a);
    }

    impl Decimal {
        fn from_i128_helper() -> Decimal {
            // 2**200, too big for a u128 coefficient.
            let two = BigUInt::from_u128(2);
            let mut mag = BigUInt::one();
            for _ in 0..200 {
                mag = mag.mul(&two).unwrap();
            }
            Decimal::from_raw(1, mag, 0).unwrap()
        }
    }
}
