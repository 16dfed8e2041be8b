use crate::config::Config;
use crate::host::{DeviceAddress, MidiHost};

/// Plays the scripted note pattern on the attached device: once per interval
/// a note-off/note-on pair goes out on the highest cable, then both note
/// numbers step up by one and wrap from `last_note` back to `first_note`.
///
/// The reference board uses B-flat..D, which lights the transport LEDs of a
/// Mackie Control surface one after another.
#[derive(Debug, Clone)]
pub struct NoteSequencer {
    message: [u8; 6],
    first_note: u8,
    last_note: u8,
    interval_ms: u64,
    start_ms: u64,
}

impl NoteSequencer {
    pub fn new(config: &Config) -> Self {
        Self {
            message: config.note_template,
            first_note: config.first_note,
            last_note: config.last_note,
            interval_ms: config.note_interval_ms,
            start_ms: 0,
        }
    }

    /// The two messages that go out on the next send.
    pub fn message(&self) -> &[u8; 6] {
        &self.message
    }

    /// Sends the next pair if the interval has elapsed. Returns `true` when
    /// something was written.
    ///
    /// Without a ready device (none attached, not configured or no outbound
    /// cable) this does nothing at all, not even advance its time base. The
    /// time base moves in whole intervals, so it catches up in a burst after
    /// a long idle period rather than drifting.
    pub fn service<H: MidiHost>(
        &mut self,
        host: &mut H,
        dev: Option<DeviceAddress>,
        now_ms: u64,
    ) -> bool {
        let Some(dev) = dev else {
            return false;
        };
        let cables = host.tx_cables(dev);
        if cables == 0 {
            return false;
        }

        host.stream_flush(dev);
        if now_ms.saturating_sub(self.start_ms) < self.interval_ms {
            return false;
        }
        self.start_ms += self.interval_ms;

        let cable = cables - 1;
        let written = host.stream_write(dev, cable, &self.message);
        if written != 0 {
            self.message[1] = self.step(self.message[1]);
            self.message[4] = self.step(self.message[4]);
        }
        host.stream_flush(dev);
        written != 0
    }

    fn step(&self, note: u8) -> u8 {
        let next = note.wrapping_add(1);
        if next > self.last_note {
            self.first_note
        } else {
            next
        }
    }
}
