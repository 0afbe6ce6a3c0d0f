use crate::error::{Error, Result};

/// Call-scoped copy of a byte payload, terminated with a zero byte.
///
/// The engine parses some payloads (XML, shader code) as C strings, so the
/// buffer is always `size + 1` bytes with the last byte forced to zero. It is
/// freed when dropped, including on early returns.
#[derive(Debug)]
pub struct TransferBuffer {
    bytes: Box<[u8]>,
}

impl TransferBuffer {
    /// Copies the first `size` bytes of `data`.
    pub fn new(param: &'static str, data: &[u8], size: i32) -> Result<Self> {
        let size = super::to_uint("size", size)? as usize;
        if data.len() < size {
            log::trace!("rejected `{param}`: {} bytes < declared {size}", data.len());
            return Err(Error::PayloadTooShort { param, size, len: data.len() });
        }

        let mut bytes = vec![0u8; size + 1].into_boxed_slice();
        bytes[..size].copy_from_slice(&data[..size]);
        Ok(Self { bytes })
    }

    /// Copies all of `data`.
    pub fn from_slice(data: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(data.len() + 1);
        bytes.extend_from_slice(data);
        bytes.push(0);
        Self { bytes: bytes.into_boxed_slice() }
    }

    /// Payload size as declared to the boundary (terminator excluded).
    #[inline]
    pub fn payload_len(&self) -> u32 {
        (self.bytes.len() - 1) as u32
    }

    /// The full buffer, terminator included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
