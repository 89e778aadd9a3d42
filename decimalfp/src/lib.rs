#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![forbid(missing_docs)]
#![doc = include_str!("../README.md")]

extern crate alloc;

mod arithmetic;
mod bigint;
mod comparison;
mod decimal;
mod digits;
mod error;
mod format;
mod from_number;
mod hashing;
mod into_number;
mod parse;
mod rounding;
mod wide;

#[cfg(feature = "serde")]
mod serde_impl;

pub use bigint::BigInt;
pub use decimal::{Decimal, MAX_DEC_PRECISION};
pub use error::{Error, Result};
pub use format::Locale;
pub use rounding::{get_default_rounding, set_default_rounding, RoundingMode};
