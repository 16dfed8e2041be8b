use crate::error::{Error, Result};
use crate::frame::FRAME_LEN;

/// Largest stream read the ingress path will ask for.
pub const RX_CHUNK_CAPACITY: usize = FRAME_LEN;

/// Tunables of the bridge. `Default` matches the reference board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Word clock falling edges per pacing signal.
    pub word_clock_divisor: u32,
    /// Time between two sends of the note pattern.
    pub note_interval_ms: u64,
    /// Note-off for `first`, note-on for `second`, both on channel 1.
    pub note_template: [u8; 6],
    /// Note the pattern wraps back to.
    pub first_note: u8,
    /// Highest note of the pattern, inclusive.
    pub last_note: u8,
    /// Status LED toggle period.
    pub heartbeat_interval_ms: u64,
    /// Bytes requested from the USB stream per read.
    pub rx_chunk_len: usize,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            // 44.1 kHz codec word clock, one frame per 32-sample block
            word_clock_divisor: 32,
            note_interval_ms: 1000,
            // Mackie Control: 0x5f stop off, 0x5b rewind on
            note_template: [0x90, 0x5f, 0x00, 0x90, 0x5b, 0x7f],
            first_note: 0x5b,
            last_note: 0x5f,
            heartbeat_interval_ms: 1000,
            rx_chunk_len: 48,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.word_clock_divisor == 0 {
            return Err(Error::InvalidConfig("word clock divisor must be non-zero"));
        }
        if self.note_interval_ms == 0 || self.heartbeat_interval_ms == 0 {
            return Err(Error::InvalidConfig("intervals must be non-zero"));
        }
        if self.rx_chunk_len == 0 || self.rx_chunk_len > RX_CHUNK_CAPACITY {
            return Err(Error::InvalidConfig("rx chunk length out of range"));
        }
        if self.first_note > self.last_note {
            return Err(Error::InvalidConfig("first note above last note"));
        }
        Ok(())
    }

    /// This config if it passes [`validate`](Self::validate), the defaults
    /// otherwise.
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                warn!("{:?}, falling back to defaults", e);
                Self::new()
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
