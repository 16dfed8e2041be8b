//! USB side of the bridge. Runs on the primary core: keeps the host stack
//! going, plays the note pattern and pushes every inbound MIDI chunk into the
//! shared frame.

use embassy_futures::yield_now;
use embassy_time::Instant;
use embedded_hal_1::digital::OutputPin;

use crate::config::{Config, RX_CHUNK_CAPACITY};
use crate::device::DeviceTracker;
use crate::error::{Error, Result};
use crate::heartbeat::Heartbeat;
use crate::host::{DeviceAddress, HostEvent, MidiHost};
use crate::notes::NoteSequencer;
use crate::shared::Shared;

/// State owned by the USB loop. The tracked device lives here and nowhere
/// else, so it needs no lock.
pub struct UsbMidi {
    tracker: DeviceTracker,
    notes: NoteSequencer,
    heartbeat: Heartbeat,
    rx_chunk_len: usize,
}

impl UsbMidi {
    /// An invalid `config` is logged and replaced by the defaults.
    pub fn new(config: &Config) -> Self {
        let config = config.validated();
        Self {
            tracker: DeviceTracker::new(),
            notes: NoteSequencer::new(&config),
            heartbeat: Heartbeat::new(config.heartbeat_interval_ms),
            rx_chunk_len: config.rx_chunk_len,
        }
    }

    pub fn device(&self) -> Option<DeviceAddress> {
        self.tracker.current()
    }

    pub fn notes(&self) -> &NoteSequencer {
        &self.notes
    }

    /// One pass of the USB loop at tick `now_ms`.
    pub async fn step<H, L>(&mut self, host: &mut H, shared: &Shared, led: Option<&mut L>, now_ms: u64)
    where
        H: MidiHost,
        L: OutputPin,
    {
        while let Some(event) = host.poll() {
            if let Err(e) = self.handle_event(host, shared, event).await {
                debug!("host event ignored: {:?}", e);
            }
        }

        if let Some(led) = led {
            self.heartbeat.service(led, now_ms);
        }

        let ready = self.tracker.current().filter(|&dev| host.is_configured(dev));
        self.notes.service(host, ready, now_ms);
    }

    /// Dispatches one host notification. Mounts of a second device and
    /// unmounts of an untracked one come back as errors; neither changes the
    /// tracked device.
    pub async fn handle_event<H: MidiHost>(
        &mut self,
        host: &mut H,
        shared: &Shared,
        event: HostEvent,
    ) -> Result<()> {
        match event {
            HostEvent::Mounted(info) => self.tracker.mount(&info),
            HostEvent::Unmounted { dev, instance } => self.tracker.unmount(dev, instance),
            HostEvent::Received { dev, packets } => {
                debug!("MIDI callback");
                if self.tracker.current() == Some(dev) && packets != 0 {
                    self.drain(host, shared, dev).await;
                }
                Ok(())
            }
            HostEvent::Transmitted { .. } => Ok(()),
        }
    }

    /// Reads `dev`'s inbound stream chunk by chunk until it runs dry. Each
    /// chunk that fits replaces the shared frame's payload; larger ones are
    /// dropped whole. Returns the number of chunks read.
    pub async fn drain<H: MidiHost>(&mut self, host: &mut H, shared: &Shared, dev: DeviceAddress) -> usize {
        let mut buf = [0u8; RX_CHUNK_CAPACITY];
        let mut chunks = 0;
        loop {
            let chunk = host.stream_read(dev, &mut buf[..self.rx_chunk_len]);
            if chunk.len == 0 {
                return chunks;
            }
            chunks += 1;
            let bytes = &buf[..chunk.len.min(self.rx_chunk_len)];

            match shared.publish(bytes).await {
                Ok(()) => {}
                Err(Error::PayloadTooLong { .. }) => {
                    warn!("MIDI RX Cable #{}: Message too long", chunk.cable);
                }
                Err(e) => {
                    warn!("MIDI RX Cable #{}: {:?}", chunk.cable, e);
                }
            }
            info!(
                "MIDI RX Cable #{}, bytes read {}, values: {:?}",
                chunk.cable,
                bytes.len(),
                bytes
            );
        }
    }
}

/// USB core loop: answers the handshake, then polls forever.
pub async fn run_usb_midi<H, L>(shared: &Shared, mut host: H, mut led: Option<L>, config: &Config) -> !
where
    H: MidiHost,
    L: OutputPin,
{
    if let Err(e) = shared.handshake().answer().await {
        warn!("continuing after handshake error: {:?}", e);
    }

    let mut usb = UsbMidi::new(config);
    info!("Starting core0 event loop");
    loop {
        let now_ms = Instant::now().as_millis();
        usb.step(&mut host, shared, led.as_mut(), now_ms).await;
        yield_now().await;
    }
}
