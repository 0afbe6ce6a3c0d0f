//! Marshaling between Rust values and the boundary's C representation.
//!
//! Responsibilities:
//! - text to NUL-terminated bytes and back (`text`)
//! - call-scoped transfer buffers for byte payloads (`buffer`)
//! - fixed-size matrix checks and eager copies of engine-owned arrays (`array`)
//! - signed/unsigned conversion of handles and counts (this module)

pub mod array;
pub mod buffer;
pub mod text;

pub use array::{check_matrix, copy_borrowed, read_matrix, MATRIX_LEN};
pub use buffer::TransferBuffer;
pub use text::{from_c_ptr, to_c_string, to_c_string_opt};

use crate::error::{Error, Result};

/// Converts a signed façade value to the boundary's unsigned width.
///
/// Negative values are never forwarded.
#[inline]
pub fn to_uint(param: &'static str, value: i32) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        log::trace!("rejected `{param}` = {value}: negative");
        Error::OutOfRange { param, value: i64::from(value) }
    })
}

/// Narrows a boundary value to the façade's signed width.
///
/// Values above `i32::MAX` cannot name a valid object and collapse to `0`.
#[inline]
pub fn from_uint(raw: u32) -> i32 {
    i32::try_from(raw).unwrap_or(0)
}
