//! Word clock pacing.
//!
//! The codec word clock runs far faster than the SPI link needs. Every
//! `divisor` falling edges release one pacing signal. The signal holds at
//! most one pending release; edges arriving while it is still pending are
//! counted as overruns and otherwise absorbed.

use embedded_hal_async::digital::Wait;

use crate::config::Config;
use crate::error::Error;
use crate::shared::Shared;

/// Countdown from `divisor` to zero, one step per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordClockDivider {
    divisor: u32,
    remaining: u32,
}

impl WordClockDivider {
    /// A zero divisor behaves like 1.
    pub const fn new(divisor: u32) -> Self {
        let divisor = if divisor == 0 { 1 } else { divisor };
        Self {
            divisor,
            remaining: divisor,
        }
    }

    /// Counts one edge. Returns `true` on the edge that completes a period.
    pub fn edge(&mut self) -> bool {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.divisor;
            true
        } else {
            false
        }
    }
}

/// Feeds one edge into `divider` and releases pacing when a period completes.
pub fn on_edge(divider: &mut WordClockDivider, shared: &Shared) -> bool {
    if !divider.edge() {
        return false;
    }
    if shared.pacing().signaled() {
        shared.stats().pacing_overrun();
    }
    shared.pacing().signal(());
    true
}

/// Word clock loop, dividing by `config.word_clock_divisor`. Never returns.
pub async fn run_word_clock<W: Wait>(shared: &Shared, mut word_clock: W, config: &Config) -> ! {
    let config = config.validated();
    let mut divider = WordClockDivider::new(config.word_clock_divisor);
    loop {
        match word_clock.wait_for_falling_edge().await {
            Ok(()) => {
                on_edge(&mut divider, shared);
            }
            Err(e) => {
                let e = Error::pin(e);
                warn!("word clock: {:?}", e);
            }
        }
    }
}
