//! The USB MIDI host collaborator.
//!
//! Enumeration, endpoints and the MIDI class driver belong to whatever USB
//! host stack the board uses. This module only names what the bridge needs
//! from it.

use core::fmt;
use core::num::NonZeroU8;

/// Bus address of an attached device. Address 0 never names a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceAddress(NonZeroU8);

impl DeviceAddress {
    pub const fn new(addr: u8) -> Option<Self> {
        match NonZeroU8::new(addr) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u8}", self.get())
    }
}

/// What the host stack reports when a MIDI interface comes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MountInfo {
    pub dev: DeviceAddress,
    pub in_ep: u8,
    pub out_ep: u8,
    pub rx_cables: u8,
    pub tx_cables: u16,
}

/// Notifications from the host stack. These stand in for its callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    Mounted(MountInfo),
    Unmounted { dev: DeviceAddress, instance: u8 },
    /// `packets` inbound USB MIDI packets are waiting to be read.
    Received { dev: DeviceAddress, packets: u32 },
    Transmitted { dev: DeviceAddress },
}

/// Result of one stream read: `len` bytes arrived on `cable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamChunk {
    pub cable: u8,
    pub len: usize,
}

pub trait MidiHost {
    /// Runs one non-blocking step of the host stack and returns the next
    /// pending notification, if any.
    fn poll(&mut self) -> Option<HostEvent>;

    fn is_configured(&self, dev: DeviceAddress) -> bool;

    /// Number of outbound virtual cables.
    fn tx_cables(&self, dev: DeviceAddress) -> u8;

    /// Queues bytes for `cable`, returning how many were accepted.
    fn stream_write(&mut self, dev: DeviceAddress, cable: u8, bytes: &[u8]) -> usize;

    fn stream_flush(&mut self, dev: DeviceAddress);

    /// Reads up to `buf.len()` bytes. A zero `len` means nothing is left.
    fn stream_read(&mut self, dev: DeviceAddress, buf: &mut [u8]) -> StreamChunk;
}

impl<T: MidiHost + ?Sized> MidiHost for &mut T {
    fn poll(&mut self) -> Option<HostEvent> {
        T::poll(self)
    }

    fn is_configured(&self, dev: DeviceAddress) -> bool {
        T::is_configured(self, dev)
    }

    fn tx_cables(&self, dev: DeviceAddress) -> u8 {
        T::tx_cables(self, dev)
    }

    fn stream_write(&mut self, dev: DeviceAddress, cable: u8, bytes: &[u8]) -> usize {
        T::stream_write(self, dev, cable, bytes)
    }

    fn stream_flush(&mut self, dev: DeviceAddress) {
        T::stream_flush(self, dev)
    }

    fn stream_read(&mut self, dev: DeviceAddress, buf: &mut [u8]) -> StreamChunk {
        T::stream_read(self, dev, buf)
    }
}
