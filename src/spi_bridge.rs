//! SPI side of the bridge. Runs on its own core: waits for the word clock,
//! then swaps one 64-byte frame with the peer.
//!
//! Chip-select is a plain GPIO driven around each exchange, active low. The
//! board sets the bus itself up for 8 MHz, 8-bit words, CPOL 0 / CPHA 0
//! ([`MODE_0`](embedded_hal_1::spi::MODE_0)), MSB first.

use embedded_hal_1::digital::OutputPin;
use embedded_hal_async::spi::SpiBus;

use crate::error::{Error, Result};
use crate::frame::{FRAME_LEN, Frame};
use crate::shared::Shared;

pub struct SpiBridge<S, CS> {
    spi: S,
    cs: CS,
    rx: [u8; FRAME_LEN],
}

impl<S, CS> SpiBridge<S, CS>
where
    S: SpiBus<u8>,
    CS: OutputPin,
{
    /// Takes the bus and deasserts chip-select.
    pub fn new(spi: S, mut cs: CS) -> Self {
        if let Err(e) = cs.set_high() {
            warn!("chip-select: {:?}", Error::pin(e));
        }
        Self {
            spi,
            cs,
            rx: [0; FRAME_LEN],
        }
    }

    /// Frame clocked in from the peer during the last exchange.
    pub fn received(&self) -> &[u8; FRAME_LEN] {
        &self.rx
    }

    /// One full-duplex exchange of the shared frame.
    ///
    /// The frame stays locked for the whole exchange. Once chip-select is
    /// asserted, it is released and the length byte cleared even when the bus
    /// fails. If chip-select cannot be asserted nothing is clocked out and the
    /// frame keeps its length, so the payload goes out on the next exchange.
    pub async fn exchange(&mut self, shared: &Shared) -> Result<()> {
        let mut frame = shared.frame().lock().await;

        if let Err(e) = self.cs.set_low() {
            shared.stats().pin_error();
            return Err(Error::pin(e));
        }
        let transfer = match self.spi.transfer(&mut self.rx, frame.as_bytes()).await {
            Ok(()) => self.spi.flush().await,
            Err(e) => Err(e),
        };
        let deassert = self.cs.set_high();
        frame.clear_len();
        drop(frame);

        if transfer.is_err() {
            shared.stats().spi_error();
        } else {
            shared.stats().exchanged();
        }
        if deassert.is_err() {
            shared.stats().pin_error();
        }
        transfer.map_err(Error::spi)?;
        deassert.map_err(Error::pin)?;

        match Frame::decode(&self.rx) {
            Ok(payload) if !payload.is_empty() => {
                trace!("SPI RX {} bytes: {:?}", payload.len(), payload);
            }
            _ => {}
        }
        Ok(())
    }
}

/// SPI core loop: handshake, then WAIT -> TRANSFER forever.
pub async fn run_spi_bridge<S, CS>(shared: &Shared, spi: S, cs: CS) -> !
where
    S: SpiBus<u8>,
    CS: OutputPin,
{
    if let Err(e) = shared.handshake().greet().await {
        warn!("continuing after handshake error: {:?}", e);
    }

    info!("SPI setup");
    let mut bridge = SpiBridge::new(spi, cs);

    info!("Starting core1 event loop");
    loop {
        shared.pacing().wait().await;
        if let Err(e) = bridge.exchange(shared).await {
            warn!("SPI exchange failed: {:?}", e);
        }
    }
}
