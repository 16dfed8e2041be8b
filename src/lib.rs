//! USB MIDI host to SPI bridge for dual-core microcontrollers.
//!
//! One core runs [`run_usb_midi`]: it polls the USB host stack, plays a short
//! note pattern on the attached MIDI device and copies every inbound MIDI
//! chunk into a shared 64-byte [`Frame`]. The other core runs
//! [`run_spi_bridge`]: each time the codec word clock (divided down by
//! [`run_word_clock`]) ticks, it swaps the frame with an SPI peer and clears
//! the frame's length byte.
//!
//! Both loops take a [`Shared`] by reference. Put it in a `static` and wrap
//! each loop in an executor task, one executor per core:
//!
//! ```ignore
//! static SHARED: Shared = Shared::new();
//!
//! #[embassy_executor::task]
//! async fn spi_task(spi: Spi<'static, SPI1, Async>, cs: Output<'static>) -> ! {
//!     run_spi_bridge(&SHARED, spi, cs).await
//! }
//!
//! #[embassy_executor::task]
//! async fn word_clock_task(ws: Input<'static>) -> ! {
//!     run_word_clock(&SHARED, ws, &Config::default()).await
//! }
//!
//! // core 1
//! spawner.spawn(spi_task(spi, cs).unwrap());
//! spawner.spawn(word_clock_task(ws_pin).unwrap());
//! // core 0
//! run_usb_midi(&SHARED, host, Some(led), &Config::default()).await;
//! ```
//!
//! `tests/executor.rs` runs the same wiring on two host executor threads.
//!
//! The USB host stack itself is not part of this crate; it is reached
//! through [`MidiHost`].

#![cfg_attr(not(test), no_std)]

// This must go FIRST so that all the other modules see its macros.
mod fmt;

pub mod config;
pub mod device;
pub mod error;
pub mod frame;
pub mod handshake;
pub mod heartbeat;
pub mod host;
pub mod notes;
pub mod pacing;
pub mod shared;
pub mod spi_bridge;
pub mod stats;
pub mod usb_midi;

pub use config::Config;
pub use error::{Error, Result};
pub use frame::{FINGERPRINT, FRAME_LEN, Frame, MAX_PAYLOAD};
pub use host::{DeviceAddress, HostEvent, MidiHost, MountInfo, StreamChunk};
pub use pacing::{WordClockDivider, run_word_clock};
pub use shared::Shared;
pub use spi_bridge::{SpiBridge, run_spi_bridge};
pub use stats::StatsSnapshot;
pub use usb_midi::{UsbMidi, run_usb_midi};
