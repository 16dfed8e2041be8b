use embedded_hal_1::digital::{OutputPin, PinState};

use crate::error::Error;

/// Status LED blinker, driven from the USB loop's tick.
#[derive(Debug, Clone, Copy)]
pub struct Heartbeat {
    interval_ms: u64,
    last_ms: u64,
    lit: bool,
}

impl Heartbeat {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_ms: 0,
            lit: false,
        }
    }

    /// Toggles `led` once more than one interval has passed since the last
    /// toggle. Returns whether the pin was written.
    pub fn service<L: OutputPin>(&mut self, led: &mut L, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_ms) <= self.interval_ms {
            return false;
        }
        if let Err(e) = led.set_state(PinState::from(self.lit)) {
            warn!("status LED: {:?}", Error::pin(e));
        }
        self.lit = !self.lit;
        self.last_ms = now_ms;
        true
    }
}
