//! Mock hardware for host-side tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal_1::digital::{self, OutputPin};
use embedded_hal_1::spi::{self, ErrorKind};
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::SpiBus;
use heapless::Deque;

use usb_midi_spi_bridge::{DeviceAddress, FRAME_LEN, HostEvent, MidiHost, MountInfo, StreamChunk};

pub fn addr(n: u8) -> DeviceAddress {
    DeviceAddress::new(n).unwrap()
}

pub fn mount_event(n: u8, tx_cables: u16) -> HostEvent {
    HostEvent::Mounted(MountInfo {
        dev: addr(n),
        in_ep: 0x81,
        out_ep: 0x01,
        rx_cables: 1,
        tx_cables,
    })
}

/// Scripted USB MIDI host stack.
#[derive(Default)]
pub struct MockHost {
    pub events: Deque<HostEvent, 16>,
    pub inbound: VecDeque<(u8, Vec<u8>)>,
    pub configured: bool,
    pub tx_cables: u8,
    /// (device, cable, bytes) per accepted write
    pub written: Vec<(DeviceAddress, u8, Vec<u8>)>,
    pub flushes: usize,
    pub reads: usize,
    pub refuse_writes: bool,
}

impl MockHost {
    pub fn ready(tx_cables: u8) -> Self {
        Self {
            configured: true,
            tx_cables,
            ..Default::default()
        }
    }

    pub fn push_event(&mut self, event: HostEvent) {
        self.events.push_back(event).unwrap();
    }

    pub fn push_inbound(&mut self, cable: u8, bytes: &[u8]) {
        self.inbound.push_back((cable, bytes.to_vec()));
    }
}

impl MidiHost for MockHost {
    fn poll(&mut self) -> Option<HostEvent> {
        self.events.pop_front()
    }

    fn is_configured(&self, _dev: DeviceAddress) -> bool {
        self.configured
    }

    fn tx_cables(&self, _dev: DeviceAddress) -> u8 {
        self.tx_cables
    }

    fn stream_write(&mut self, dev: DeviceAddress, cable: u8, bytes: &[u8]) -> usize {
        if self.refuse_writes {
            return 0;
        }
        self.written.push((dev, cable, bytes.to_vec()));
        bytes.len()
    }

    fn stream_flush(&mut self, _dev: DeviceAddress) {
        self.flushes += 1;
    }

    fn stream_read(&mut self, _dev: DeviceAddress, buf: &mut [u8]) -> StreamChunk {
        self.reads += 1;
        match self.inbound.pop_front() {
            Some((cable, bytes)) => {
                let len = bytes.len().min(buf.len());
                buf[..len].copy_from_slice(&bytes[..len]);
                StreamChunk { cable, len }
            }
            None => StreamChunk::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    CsLow,
    CsHigh,
    Transfer([u8; FRAME_LEN]),
}

pub type BusLog = Rc<RefCell<Vec<BusEvent>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSpiError;

impl spi::Error for MockSpiError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// SPI bus that logs every frame it clocks out and answers with `reply`.
pub struct MockSpi {
    pub log: BusLog,
    pub reply: [u8; FRAME_LEN],
    pub fail: bool,
}

impl MockSpi {
    pub fn new(log: BusLog) -> Self {
        Self {
            log,
            reply: [0; FRAME_LEN],
            fail: false,
        }
    }
}

impl spi::ErrorType for MockSpi {
    type Error = MockSpiError;
}

impl SpiBus<u8> for MockSpi {
    async fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    async fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockSpiError);
        }
        let mut sent = [0u8; FRAME_LEN];
        sent.copy_from_slice(write);
        self.log.borrow_mut().push(BusEvent::Transfer(sent));
        read.copy_from_slice(&self.reply[..read.len()]);
        Ok(())
    }

    async fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Chip-select that logs into the same [`BusLog`] as the bus.
pub struct MockCs(pub BusLog);

impl digital::ErrorType for MockCs {
    type Error = Infallible;
}

impl OutputPin for MockCs {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(BusEvent::CsLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(BusEvent::CsHigh);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl digital::Error for MockPinError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// Chip-select that cannot be driven low.
pub struct StuckHighCs;

impl digital::ErrorType for StuckHighCs {
    type Error = MockPinError;
}

impl OutputPin for StuckHighCs {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(MockPinError)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn bus() -> (MockSpi, MockCs, BusLog) {
    let log = BusLog::default();
    (MockSpi::new(log.clone()), MockCs(log.clone()), log)
}

pub fn transfers(log: &BusLog) -> Vec<[u8; FRAME_LEN]> {
    log.borrow()
        .iter()
        .filter_map(|event| match event {
            BusEvent::Transfer(frame) => Some(*frame),
            _ => None,
        })
        .collect()
}

/// LED that remembers its states.
#[derive(Default)]
pub struct MockLed(pub Vec<bool>);

impl digital::ErrorType for MockLed {
    type Error = Infallible;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.push(true);
        Ok(())
    }
}

/// Word clock input that delivers `edges` falling edges, then goes quiet.
pub struct MockWordClock {
    pub edges: usize,
}

impl MockWordClock {
    async fn next_edge(&mut self) -> Result<(), Infallible> {
        if self.edges == 0 {
            core::future::pending::<()>().await;
        }
        self.edges -= 1;
        Ok(())
    }
}

impl digital::ErrorType for MockWordClock {
    type Error = Infallible;
}

impl Wait for MockWordClock {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.next_edge().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.next_edge().await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.next_edge().await
    }
}
