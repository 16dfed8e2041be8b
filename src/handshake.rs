//! Start-up rendezvous between the two cores.
//!
//! The SPI core announces itself with [`HELLO`], the USB core answers with
//! [`ACK`]. A wrong token is reported but never stops either side.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::error::{Error, Result};

pub const HELLO: u32 = 42;
pub const ACK: u32 = 43;

pub struct Handshake {
    to_usb: Channel<CriticalSectionRawMutex, u32, 1>,
    to_spi: Channel<CriticalSectionRawMutex, u32, 1>,
}

impl Handshake {
    pub const fn new() -> Self {
        Self {
            to_usb: Channel::new(),
            to_spi: Channel::new(),
        }
    }

    /// SPI core side: send the greeting, then wait for the answer.
    pub async fn greet(&self) -> Result<()> {
        self.greet_with(HELLO).await
    }

    pub(crate) async fn greet_with(&self, token: u32) -> Result<()> {
        self.to_usb.send(token).await;
        let received = self.to_spi.receive().await;
        if received != ACK {
            warn!("Hmm, that's not right on core 1! got {}", received);
            return Err(Error::HandshakeMismatch {
                expected: ACK,
                received,
            });
        }
        info!("Handshake complete on core 1");
        Ok(())
    }

    /// USB core side: wait for the greeting and answer it.
    ///
    /// The answer goes out even on a bad greeting so the SPI core is never
    /// left waiting.
    pub async fn answer(&self) -> Result<()> {
        self.answer_with(ACK).await
    }

    pub(crate) async fn answer_with(&self, token: u32) -> Result<()> {
        let received = self.to_usb.receive().await;
        self.to_spi.send(token).await;
        if received != HELLO {
            warn!("Hmm, that's not right on core 0! got {}", received);
            return Err(Error::HandshakeMismatch {
                expected: HELLO,
                received,
            });
        }
        info!("Handshake complete on core 0");
        Ok(())
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Self::new()
    }
}
