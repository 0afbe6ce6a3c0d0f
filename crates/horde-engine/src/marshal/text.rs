use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::error::{Error, Result};

/// Marshals text to a NUL-terminated byte string.
///
/// Text with an interior NUL would arrive truncated, so it is rejected.
pub fn to_c_string(param: &'static str, text: &str) -> Result<CString> {
    CString::new(text).map_err(|_| {
        log::trace!("rejected `{param}`: interior NUL");
        Error::NullArgument { param }
    })
}

/// Like [`to_c_string`] for parameters the engine accepts as null.
pub fn to_c_string_opt(param: &'static str, text: Option<&str>) -> Result<Option<CString>> {
    text.map(|t| to_c_string(param, t)).transpose()
}

/// Copies a string returned by the boundary. A null pointer reads as empty.
///
/// The engine returns single-byte text; bytes that are not valid UTF-8 are
/// replaced rather than rejected.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of this call.
pub unsafe fn from_c_ptr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}
