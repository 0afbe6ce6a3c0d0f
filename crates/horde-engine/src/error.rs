//! Binding error types.
//!
//! Only conditions detected on the Rust side are errors. Failures reported by
//! the engine itself come back as `false`, a zero handle or `None`.

use thiserror::Error;

use crate::session::EngineState;

/// Errors raised by the binding before (or instead of) a boundary call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A handle, count or index parameter was negative.
    #[error("`{param}` must not be negative (got {value})")]
    OutOfRange { param: &'static str, value: i64 },

    /// A text parameter cannot be passed as a NUL-terminated string.
    #[error("`{param}` contains an interior NUL byte")]
    NullArgument { param: &'static str },

    /// A fixed-size array had the wrong number of elements.
    #[error("`{param}` must have exactly {expected} elements (got {actual})")]
    LengthMismatch {
        param: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A declared payload size exceeds the bytes actually supplied.
    #[error("`{param}` holds {len} bytes but {size} were declared")]
    PayloadTooShort {
        param: &'static str,
        size: usize,
        len: usize,
    },

    /// The session is not in a state that accepts this operation.
    #[error("`{op}` is not valid while the engine is {state}")]
    InvalidState { op: &'static str, state: EngineState },

    /// The loaded engine library is not the version this binding targets.
    ///
    /// Fatal: the session can never be initialized afterwards.
    #[error("engine version `{found}` is incompatible with this binding (expected `{expected}`)")]
    Incompatible { expected: String, found: String },

    /// The operation is not supported by this binding.
    #[error("`{0}` is not supported by this binding")]
    Unsupported(&'static str),

    /// A native library could not be loaded or is missing a symbol.
    #[error("native library error: {0}")]
    Library(String),
}

impl Error {
    /// Returns `true` for rejections caused by caller input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. }
                | Self::NullArgument { .. }
                | Self::LengthMismatch { .. }
                | Self::PayloadTooShort { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
