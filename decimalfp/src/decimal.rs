/*!

The unified value (§3, §4.4): a tagged sum of the shifted-int and
digit-array bodies, plus sign and declared precision.

*/

use core::cmp::Ordering;

use crate::digits::BigUInt;
use crate::error::{Error, Result};
use crate::rounding::{self, RoundingMode};
use crate::wide;

/// The maximum number of fractional decimal digits a [`Decimal`] may
/// declare (§3). At least 65, per spec; chosen generously here since the
/// digit-array body has no trouble carrying it (see DESIGN.md).
pub const MAX_DEC_PRECISION: u32 = 999_999_999;

/// The coefficient body (§3): either an inline 128-bit magnitude or an
/// owned, heap-allocated digit array. Zero is always represented as
/// `Small(0)` — a `Big` coefficient is never zero (invariant 2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Repr {
    Small(u128),
    Big(BigUInt),
}

/// An exact decimal fixed-point number: `sign * coefficient * 10^-dec_prec`.
///
/// Values are immutable after construction (§3 "Lifecycles"); every
/// operation returns a new `Decimal` rather than mutating in place.
///
/// `Debug`/`Eq`/`Ord` are implemented by hand ([`crate::format`],
/// [`crate::comparison`]) rather than derived: equality and ordering compare
/// the mathematical value, not the `(sign, dec_prec, repr)` triple, so a
/// `3` and a `3.00` must be equal despite differing fields.
#[derive(Clone)]
pub struct Decimal {
    pub(crate) sign: i8,
    pub(crate) dec_prec: u32,
    pub(crate) repr: Repr,
}

impl Decimal {
    /// The value zero, with the given declared precision.
    pub fn zero(dec_prec: u32) -> Result<Self> {
        check_precision(dec_prec)?;
        Ok(Decimal { sign: 0, dec_prec, repr: Repr::Small(0) })
    }

    pub(crate) fn from_raw(sign: i8, mag: BigUInt, dec_prec: u32) -> Result<Self> {
        check_precision(dec_prec)?;
        if mag.is_zero() {
            return Ok(Decimal { sign: 0, dec_prec, repr: Repr::Small(0) });
        }
        debug_assert!(sign != 0);
        let repr = match mag.to_u128() {
            Some(n) => Repr::Small(n),
            None => Repr::Big(mag),
        };
        Ok(Decimal { sign, dec_prec, repr })
    }

    pub(crate) fn from_small(sign: i8, mag: u128, dec_prec: u32) -> Result<Self> {
        check_precision(dec_prec)?;
        if mag == 0 {
            return Ok(Decimal { sign: 0, dec_prec, repr: Repr::Small(0) });
        }
        debug_assert!(sign != 0);
        Ok(Decimal { sign, dec_prec, repr: Repr::Small(mag) })
    }

    /// `true` iff this value is mathematically zero.
    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    /// `-1`, `0`, or `+1`.
    pub fn signum(&self) -> i32 {
        self.sign as i32
    }

    /// The declared number of fractional decimal digits.
    pub fn precision(&self) -> u32 {
        self.dec_prec
    }

    /// The coefficient, widened to a [`BigUInt`] regardless of body.
    pub(crate) fn coefficient(&self) -> BigUInt {
        match &self.repr {
            Repr::Small(n) => BigUInt::from_u128(*n),
            Repr::Big(b) => b.clone(),
        }
    }

    /// Unary negation: flips the sign unless the value is zero.
    pub fn neg(&self) -> Self {
        let mut out = self.clone();
        if out.sign != 0 {
            out.sign = -out.sign;
        }
        out
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        let mut out = self.clone();
        if out.sign != 0 {
            out.sign = 1;
        }
        out
    }

    /// Returns a value equal (under rounding) to `self` but declared at
    /// `new_prec` fractional digits (§4.4 `adjust`). Increasing precision
    /// is always exact; decreasing applies `rounding` to the dropped
    /// digits.
    pub fn adjust(&self, new_prec: u32, rounding_mode: RoundingMode) -> Result<Self> {
        check_precision(new_prec)?;
        if new_prec == self.dec_prec {
            return Ok(self.clone());
        }
        if new_prec > self.dec_prec {
            let shift = new_prec - self.dec_prec;
            let mag = self.coefficient().mul_pow10(shift)?;
            return Self::from_raw(self.sign, mag, new_prec);
        }
        // new_prec < self.dec_prec: drop digits, round.
        let drop = self.dec_prec - new_prec;
        let divisor = BigUInt::pow10(drop)?;
        let (q, r) = self.coefficient().divmod(&divisor);
        let last_digit = (q.divmod_small(10).1) as u8;
        let twice_r = r.mul_small(2).unwrap_or_else(|_| r.clone());
        let cmp = twice_r.cmp_mag(&divisor);
        let up = rounding::should_round_up(
            rounding_mode,
            self.sign < 0,
            last_digit,
            r.is_zero(),
            cmp,
        );
        let q = if up { q.add(&BigUInt::one())? } else { q };
        Self::from_raw(self.sign, q, new_prec)
    }

    /// `floor(log10(|self|))` (§4.8). Undefined for zero.
    pub fn magnitude(&self) -> Result<i64> {
        if self.is_zero() {
            return Err(Error::UndefinedMagnitude);
        }
        // magnitude of the *value*, not the coefficient: subtract dec_prec.
        match &self.repr {
            Repr::Small(n) => Ok(wide::floor_log10_128(*n) as i64 - self.dec_prec as i64),
            Repr::Big(b) => Ok(b.decimal_len() as i64 - 1 - self.dec_prec as i64),
        }
    }
}

pub(crate) fn check_precision(prec: u32) -> Result<()> {
    if prec > MAX_DEC_PRECISION {
        Err(Error::PrecisionLimitExceeded { max: MAX_DEC_PRECISION })
    } else {
        Ok(())
    }
}

/// Aligns two coefficients to the same scale (the larger of the two
/// precisions), returning `(aligned_x, aligned_y, common_prec)`.
pub(crate) fn align(x: &Decimal, y: &Decimal) -> Result<(BigUInt, BigUInt, u32)> {
    let p = x.dec_prec.max(y.dec_prec);
    let cx = x.coefficient().mul_pow10(p - x.dec_prec)?;
    let cy = y.coefficient().mul_pow10(p - y.dec_prec)?;
    Ok((cx, cy, p))
}

impl Decimal {
    /// Three-way comparison on the mathematical value (§4.6 `compare`,
    /// invariant 5): exact, independent of declared precision or body.
    ///
    /// Aligning two wildly different precisions onto a common scale (as
    /// `add`/`sub` must) can need a coefficient far outside the engine's
    /// digit-array limits even when both operands are themselves valid —
    /// e.g. `1` at precision 0 against `5e-999999999` at precision
    /// 999999999. Comparison never needs to materialize that: it first
    /// orders by order-of-magnitude (`digit_count - 1 + exponent`), which
    /// is exact and shift-free, and only falls back to a literal shift when
    /// the two values share an order of magnitude — in which case the
    /// required shift is itself bounded by the (already in-limits) digit
    /// counts of the two operands.
    pub fn compare(&self, other: &Decimal) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => {}
            non_eq => return non_eq,
        }
        if self.sign == 0 {
            return Ordering::Equal;
        }
        let cx = self.coefficient();
        let cy = other.coefficient();
        let ex = -(self.dec_prec as i64);
        let ey = -(other.dec_prec as i64);
        let mag_order = compare_magnitudes(&cx, ex, &cy, ey);
        if self.sign > 0 {
            mag_order
        } else {
            mag_order.reverse()
        }
    }
}

/// Orders `cx * 10^ex` against `cy * 10^ey`, both non-negative, without
/// requiring an unbounded shift (see [`Decimal::compare`]).
fn compare_magnitudes(cx: &BigUInt, ex: i64, cy: &BigUInt, ey: i64) -> Ordering {
    if ex == ey {
        return cx.cmp_mag(cy);
    }
    let mx = cx.decimal_len() as i64 - 1 + ex;
    let my = cy.decimal_len() as i64 - 1 + ey;
    match mx.cmp(&my) {
        Ordering::Equal => {
            if ex > ey {
                match cx.mul_pow10((ex - ey) as u32) {
                    Ok(shifted) => shifted.cmp_mag(cy),
                    Err(_) => Ordering::Equal,
                }
            } else {
                match cy.mul_pow10((ey - ex) as u32) {
                    Ok(shifted) => cx.cmp_mag(&shifted),
                    Err(_) => Ordering::Equal,
                }
            }
        }
        other => other,
    }
}
