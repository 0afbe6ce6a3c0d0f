use bytemuck::Pod;
use glam::Mat4;

use crate::error::{Error, Result};

/// Element count of a 4x4 matrix on the boundary.
pub const MATRIX_LEN: usize = 16;

/// Checks that `values` is exactly one column-major 4x4 matrix.
pub fn check_matrix<'a>(param: &'static str, values: &'a [f32]) -> Result<&'a [f32; MATRIX_LEN]> {
    values.try_into().map_err(|_| {
        log::trace!("rejected `{param}`: {} elements", values.len());
        Error::LengthMismatch { param, expected: MATRIX_LEN, actual: values.len() }
    })
}

/// Mutable variant of [`check_matrix`] for out-parameters.
pub fn check_matrix_mut<'a>(
    param: &'static str,
    values: &'a mut [f32],
) -> Result<&'a mut [f32; MATRIX_LEN]> {
    let actual = values.len();
    values.try_into().map_err(|_| {
        log::trace!("rejected `{param}`: {actual} elements");
        Error::LengthMismatch { param, expected: MATRIX_LEN, actual }
    })
}

/// Copies `count` elements out of an engine-owned buffer.
///
/// Engine buffers are only valid until the next engine call, so the copy is
/// made immediately. A null pointer or zero count yields an empty vector.
///
/// # Safety
/// When non-null, `ptr` must be valid for reads of `count` elements of `T`.
pub unsafe fn copy_borrowed<T: Pod>(ptr: *const T, count: u32) -> Vec<T> {
    if ptr.is_null() || count == 0 {
        return Vec::new();
    }
    // SAFETY: guaranteed by the caller.
    unsafe { std::slice::from_raw_parts(ptr, count as usize) }.to_vec()
}

/// Copies one column-major matrix out of an engine-owned buffer.
///
/// # Safety
/// When non-null, `ptr` must be valid for reads of 16 floats.
pub unsafe fn read_matrix(ptr: *const f32) -> Option<Mat4> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: guaranteed by the caller.
    let cols = unsafe { &*ptr.cast::<[f32; MATRIX_LEN]>() };
    Some(Mat4::from_cols_array(cols))
}
