use portable_atomic::{AtomicU32, Ordering};

/// Counters shared by both cores. On cores without compare-and-swap the
/// increments fall back to a critical section.
pub struct Stats {
    exchanges: AtomicU32,
    spi_errors: AtomicU32,
    pin_errors: AtomicU32,
    published: AtomicU32,
    dropped: AtomicU32,
    pacing_overruns: AtomicU32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatsSnapshot {
    pub exchanges: u32,
    pub spi_errors: u32,
    /// Chip-select failures
    pub pin_errors: u32,
    pub published: u32,
    pub dropped: u32,
    pub pacing_overruns: u32,
}

impl Stats {
    pub const fn new() -> Self {
        Self {
            exchanges: AtomicU32::new(0),
            spi_errors: AtomicU32::new(0),
            pin_errors: AtomicU32::new(0),
            published: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            pacing_overruns: AtomicU32::new(0),
        }
    }

    pub(crate) fn exchanged(&self) {
        self.exchanges.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn spi_error(&self) {
        self.spi_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn pin_error(&self) {
        self.pin_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn chunk_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn chunk_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn pacing_overrun(&self) {
        self.pacing_overruns.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            exchanges: self.exchanges.load(Ordering::Relaxed),
            spi_errors: self.spi_errors.load(Ordering::Relaxed),
            pin_errors: self.pin_errors.load(Ordering::Relaxed),
            published: self.published.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            pacing_overruns: self.pacing_overruns.load(Ordering::Relaxed),
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}
