use thiserror::Error;

/// Errors raised by the decimal fixed-point engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A string did not match the decimal literal grammar.
    #[error("invalid decimal literal")]
    InvalidLiteral,
    /// A declared or implied precision exceeds [`crate::MAX_DEC_PRECISION`].
    #[error("precision exceeds the maximum of {max}")]
    PrecisionLimitExceeded {
        /// The configured maximum.
        max: u32,
    },
    /// A digit-array grew past the engine's hard limits.
    #[error("internal digit-array limit exceeded")]
    InternalLimitExceeded,
    /// Division (or remainder, or `divmod`) by zero.
    #[error("division by zero")]
    DivideByZero,
    /// The source value has no finite decimal representation.
    #[error("value cannot be represented as a finite decimal")]
    CannotRepresent,
    /// `magnitude()` of zero is undefined.
    #[error("magnitude of zero is undefined")]
    UndefinedMagnitude,
    /// `set_default_rounding` was called with an unrecognized mode.
    #[error("invalid rounding mode")]
    InvalidRoundingMode,
    /// A format specifier did not match the format grammar.
    #[error("invalid format specifier")]
    InvalidFormat,
    /// The digit-array allocator could not satisfy a request. Kept for
    /// interface parity with the original C library's checked `malloc`;
    /// stable Rust's global allocator aborts the process on allocation
    /// failure instead of returning an error, so this engine never
    /// actually constructs this variant — the digit-array length guard
    /// reports [`Error::InternalLimitExceeded`] instead (see DESIGN.md).
    #[error("out of memory")]
    OutOfMemory,
}

/// The engine's result alias.
pub type Result<T> = core::result::Result<T, Error>;
