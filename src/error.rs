//! Bridge error types

use core::fmt;

use embedded_hal_1::{digital, spi};

use crate::host::DeviceAddress;

/// Bridge operation result type
pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can go wrong on either side of the bridge.
///
/// None of these are fatal. The loops log them and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Inbound MIDI chunk does not fit into one frame
    PayloadTooLong {
        /// Size of the rejected chunk
        len: usize,
    },
    /// Frame does not start with the `0xCA 0xFE` marker
    BadFingerprint,
    /// Frame length byte exceeds the payload capacity
    BadLength(u8),
    /// A second MIDI device was mounted while one is already tracked
    DeviceBusy {
        /// Device currently tracked
        active: DeviceAddress,
        /// Device that was turned away
        rejected: DeviceAddress,
    },
    /// Unmount notification for a device that is not tracked
    UnknownDevice(DeviceAddress),
    /// Start-up handshake carried an unexpected token
    HandshakeMismatch {
        /// Token this side waited for
        expected: u32,
        /// Token that actually arrived
        received: u32,
    },
    /// SPI bus failure
    Spi(spi::ErrorKind),
    /// GPIO failure (chip-select, LED or word clock input)
    Pin(digital::ErrorKind),
    /// Configuration rejected by [`Config::validate`](crate::Config::validate)
    InvalidConfig(&'static str),
}

impl Error {
    pub(crate) fn spi<E: spi::Error>(e: E) -> Self {
        Error::Spi(e.kind())
    }

    pub(crate) fn pin<E: digital::Error>(e: E) -> Self {
        Error::Pin(e.kind())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PayloadTooLong { len } => write!(f, "MIDI chunk of {} bytes is too long", len),
            Error::BadFingerprint => write!(f, "frame fingerprint mismatch"),
            Error::BadLength(len) => write!(f, "frame length {} out of range", len),
            Error::DeviceBusy { active, rejected } => write!(
                f,
                "device {} rejected, device {} is already connected",
                rejected, active
            ),
            Error::UnknownDevice(dev) => write!(f, "device {} is not tracked", dev),
            Error::HandshakeMismatch { expected, received } => {
                write!(f, "handshake expected {}, got {}", expected, received)
            }
            Error::Spi(kind) => write!(f, "SPI error: {}", kind),
            Error::Pin(kind) => write!(f, "pin error: {}", kind),
            Error::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}
