//! The 64-byte SPI frame.
//!
//! ```text
//! offset 0..2   0xCA 0xFE   fingerprint
//! offset 2      length      0..=61, cleared after every exchange
//! offset 3..64  payload     last MIDI chunk written
//! ```
//!
//! Clearing the length leaves the payload bytes in place, so the payload
//! area always holds the most recent chunk. A peer can only tell "nothing
//! new" from "new data" by the length byte.

use crate::error::{Error, Result};

pub const FRAME_LEN: usize = 64;
pub const HEADER_LEN: usize = 3;
pub const MAX_PAYLOAD: usize = FRAME_LEN - HEADER_LEN;
pub const FINGERPRINT: [u8; 2] = [0xCA, 0xFE];

const LEN_OFFSET: usize = 2;

#[derive(Clone, PartialEq, Eq)]
#[repr(C)]
pub struct Frame {
    bytes: [u8; FRAME_LEN],
}

impl Frame {
    pub const fn new() -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = FINGERPRINT[0];
        bytes[1] = FINGERPRINT[1];
        Self { bytes }
    }

    /// Live payload length, as carried in the length byte.
    pub fn len(&self) -> usize {
        self.bytes[LEN_OFFSET] as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whole payload area, including bytes past `len()`.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    /// Stores `chunk` as the current payload, replacing whatever was there.
    ///
    /// Chunks longer than [`MAX_PAYLOAD`] leave the frame untouched.
    pub fn load(&mut self, chunk: &[u8]) -> Result<()> {
        if chunk.len() > MAX_PAYLOAD {
            return Err(Error::PayloadTooLong { len: chunk.len() });
        }
        self.bytes[LEN_OFFSET] = chunk.len() as u8;
        self.bytes[HEADER_LEN..HEADER_LEN + chunk.len()].copy_from_slice(chunk);
        Ok(())
    }

    /// Marks the payload as already sent. The payload bytes stay.
    pub fn clear_len(&mut self) {
        self.bytes[LEN_OFFSET] = 0;
    }

    /// The frame exactly as it goes out on the wire.
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Validates a raw frame and returns its live payload.
    pub fn decode(raw: &[u8; FRAME_LEN]) -> Result<&[u8]> {
        if raw[..2] != FINGERPRINT {
            return Err(Error::BadFingerprint);
        }
        let len = raw[LEN_OFFSET];
        if len as usize > MAX_PAYLOAD {
            return Err(Error::BadLength(len));
        }
        Ok(&raw[HEADER_LEN..HEADER_LEN + len as usize])
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Frame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Frame")
            .field("len", &self.len())
            .field("payload", &&self.payload()[..self.len().min(MAX_PAYLOAD)])
            .finish()
    }
}
