/*!

The rounding kernel (§4.7): eight deterministic modes, each a pure function
of a truncated quotient's last decimal digit, whether anything was dropped,
and how the dropped remainder compares to half the divisor.

Every lossy operation (`adjust`, `truediv` with a target precision, `round`)
first computes the *truncated-toward-zero* result and then asks
[`should_round_up`] whether to bump its magnitude by one. No kernel ever
rounds by any other means, so this is the only place tie-breaking logic
lives.

*/

use core::cmp::Ordering;
use core::sync::atomic::{AtomicU8, Ordering as AtomicOrdering};

use crate::error::{Error, Result};

/// One of the eight rounding modes from §4.7.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round away from zero if the truncated quotient's last digit is 0 or
    /// 5, toward zero otherwise — regardless of whether the drop was a tie.
    ZeroFiveUp = 0,
    /// Always toward positive infinity.
    Ceiling = 1,
    /// Always toward zero (pure truncation).
    Down = 2,
    /// Always toward negative infinity.
    Floor = 3,
    /// Ties toward zero, otherwise toward the nearest representable value.
    HalfDown = 4,
    /// Ties toward an even last digit, otherwise toward the nearest value.
    #[default]
    HalfEven = 5,
    /// Ties away from zero, otherwise toward the nearest value.
    HalfUp = 6,
    /// Always away from zero.
    Up = 7,
}

impl RoundingMode {
    /// The name used by [`RoundingMode::from_name`]/`set_default_rounding`.
    pub fn name(self) -> &'static str {
        match self {
            RoundingMode::ZeroFiveUp => "05up",
            RoundingMode::Ceiling => "ceiling",
            RoundingMode::Down => "down",
            RoundingMode::Floor => "floor",
            RoundingMode::HalfDown => "half_down",
            RoundingMode::HalfEven => "half_even",
            RoundingMode::HalfUp => "half_up",
            RoundingMode::Up => "up",
        }
    }

    /// Parses one of the eight names in §4.7, case-sensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(match name {
            "05up" => RoundingMode::ZeroFiveUp,
            "ceiling" => RoundingMode::Ceiling,
            "down" => RoundingMode::Down,
            "floor" => RoundingMode::Floor,
            "half_down" => RoundingMode::HalfDown,
            "half_even" => RoundingMode::HalfEven,
            "half_up" => RoundingMode::HalfUp,
            "up" => RoundingMode::Up,
            _ => return Err(Error::InvalidRoundingMode),
        })
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => RoundingMode::ZeroFiveUp,
            1 => RoundingMode::Ceiling,
            2 => RoundingMode::Down,
            3 => RoundingMode::Floor,
            4 => RoundingMode::HalfDown,
            5 => RoundingMode::HalfEven,
            6 => RoundingMode::HalfUp,
            _ => RoundingMode::Up,
        }
    }
}

/// Decides whether a truncated-toward-zero quotient's magnitude should be
/// incremented by one, given the dropped remainder.
///
/// - `negative`: sign of the mathematical (pre-rounding) result.
/// - `last_digit`: the truncated quotient's least-significant decimal digit
///   (0-9) — only consulted by [`RoundingMode::ZeroFiveUp`] and, on a tie,
///   [`RoundingMode::HalfEven`].
/// - `remainder_is_zero`: `true` iff the operation was exact (nothing to
///   round); every mode leaves an exact result alone.
/// - `twice_remainder_cmp_divisor`: `(2 * |remainder|).cmp(&|divisor|)`.
pub fn should_round_up(
    mode: RoundingMode,
    negative: bool,
    last_digit: u8,
    remainder_is_zero: bool,
    twice_remainder_cmp_divisor: Ordering,
) -> bool {
    if remainder_is_zero {
        return false;
    }
    match mode {
        RoundingMode::Down => false,
        RoundingMode::Up => true,
        RoundingMode::Ceiling => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::ZeroFiveUp => last_digit == 0 || last_digit == 5,
        RoundingMode::HalfDown => twice_remainder_cmp_divisor == Ordering::Greater,
        RoundingMode::HalfUp => twice_remainder_cmp_divisor != Ordering::Less,
        RoundingMode::HalfEven => match twice_remainder_cmp_divisor {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => last_digit % 2 == 1,
        },
    }
}

static DEFAULT_ROUNDING: AtomicU8 = AtomicU8::new(RoundingMode::HalfEven as u8);

/// Reads the process-wide default rounding mode (§5, §6).
pub fn get_default_rounding() -> RoundingMode {
    RoundingMode::from_u8(DEFAULT_ROUNDING.load(AtomicOrdering::Relaxed))
}

/// Sets the process-wide default rounding mode (§5, §6).
pub fn set_default_rounding(mode: RoundingMode) {
    DEFAULT_ROUNDING.store(mode as u8, AtomicOrdering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for mode in [
            RoundingMode::ZeroFiveUp,
            RoundingMode::Ceiling,
            RoundingMode::Down,
            RoundingMode::Floor,
            RoundingMode::HalfDown,
            RoundingMode::HalfEven,
            RoundingMode::HalfUp,
            RoundingMode::Up,
        ] {
            assert_eq!(RoundingMode::from_name(mode.name()).unwrap(), mode);
        }
        assert_eq!(RoundingMode::from_name("nope"), Err(Error::InvalidRoundingMode));
    }

    #[test]
    fn exact_never_rounds() {
        for mode in [RoundingMode::Up, RoundingMode::Ceiling, RoundingMode::HalfEven] {
            assert!(!should_round_up(mode, false, 3, true, Ordering::Equal));
        }
    }

    #[test]
    fn half_even_ties_to_even() {
        // ...2.5 -> 2 (last digit 2 is even, no increment)
        assert!(!should_round_up(RoundingMode::HalfEven, false, 2, false, Ordering::Equal));
        // ...1.5 -> 2 (last digit 1 is odd, increment)
        assert!(should_round_up(RoundingMode::HalfEven, false, 1, false, Ordering::Equal));
    }

    #[test]
    fn half_down_ties_to_zero() {
        assert!(!should_round_up(RoundingMode::HalfDown, false, 1, false, Ordering::Equal));
        assert!(should_round_up(RoundingMode::HalfDown, false, 1, false, Ordering::Greater));
    }

    #[test]
    fn ceiling_and_floor_respect_sign() {
        assert!(should_round_up(RoundingMode::Ceiling, false, 1, false, Ordering::Less));
        assert!(!should_round_up(RoundingMode::Ceiling, true, 1, false, Ordering::Less));
        assert!(should_round_up(RoundingMode::Floor, true, 1, false, Ordering::Less));
        assert!(!should_round_up(RoundingMode::Floor, false, 1, false, Ordering::Less));
    }

    #[test]
    fn zero_five_up_checks_last_digit_only() {
        assert!(should_round_up(RoundingMode::ZeroFiveUp, false, 0, false, Ordering::Less));
        assert!(should_round_up(RoundingMode::ZeroFiveUp, false, 5, false, Ordering::Less));
        assert!(!should_round_up(RoundingMode::ZeroFiveUp, false, 3, false, Ordering::Less));
    }

    #[test]
    fn default_rounding_roundtrips() {
        let prev = get_default_rounding();
        set_default_rounding(RoundingMode::Up);
        assert_eq!(get_default_rounding(), RoundingMode::Up);
        set_default_rounding(prev);
    }
}
