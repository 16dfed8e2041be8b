use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use crate::error::{Error, Result};
use crate::frame::{Frame, MAX_PAYLOAD};
use crate::handshake::Handshake;
use crate::stats::Stats;

pub type FrameMutex = Mutex<CriticalSectionRawMutex, Frame>;
pub type PacingSignal = Signal<CriticalSectionRawMutex, ()>;

/// Everything the USB core and the SPI core hand to each other.
///
/// Meant to live in a `static` (or a `StaticCell`) owned by the entry point
/// and passed by reference into both executors. The frame is written only by
/// [`Shared::publish`] and read/cleared only by the SPI bridge.
pub struct Shared {
    frame: FrameMutex,
    pacing: PacingSignal,
    handshake: Handshake,
    stats: Stats,
}

impl Shared {
    pub const fn new() -> Self {
        Self {
            frame: Mutex::new(Frame::new()),
            pacing: Signal::new(),
            handshake: Handshake::new(),
            stats: Stats::new(),
        }
    }

    /// Replaces the pending payload with `chunk`.
    ///
    /// Chunks that do not fit are dropped before the lock is taken.
    pub async fn publish(&self, chunk: &[u8]) -> Result<()> {
        if chunk.len() > MAX_PAYLOAD {
            self.stats.chunk_dropped();
            return Err(Error::PayloadTooLong { len: chunk.len() });
        }
        self.frame.lock().await.load(chunk)?;
        self.stats.chunk_published();
        Ok(())
    }

    pub fn frame(&self) -> &FrameMutex {
        &self.frame
    }

    pub fn pacing(&self) -> &PacingSignal {
        &self.pacing
    }

    pub fn handshake(&self) -> &Handshake {
        &self.handshake
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}
