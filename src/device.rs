use crate::error::{Error, Result};
use crate::host::{DeviceAddress, MountInfo};

/// Tracks the one MIDI device the bridge talks to. The first device mounted
/// wins; later ones are turned away until it goes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeviceTracker {
    current: Option<DeviceAddress>,
}

impl DeviceTracker {
    pub const fn new() -> Self {
        Self { current: None }
    }

    pub fn current(&self) -> Option<DeviceAddress> {
        self.current
    }

    pub fn mount(&mut self, info: &MountInfo) -> Result<()> {
        info!(
            "MIDI device address = {}, IN endpoint {} has {} cables, OUT endpoint {} has {} cables",
            info.dev,
            info.in_ep & 0xf,
            info.rx_cables,
            info.out_ep & 0xf,
            info.tx_cables
        );
        match self.current {
            None => {
                self.current = Some(info.dev);
                Ok(())
            }
            Some(active) => {
                warn!(
                    "A different USB MIDI device ({}) is already connected. Only one device at a time is supported, device {} is disabled",
                    active,
                    info.dev
                );
                Err(Error::DeviceBusy {
                    active,
                    rejected: info.dev,
                })
            }
        }
    }

    pub fn unmount(&mut self, dev: DeviceAddress, instance: u8) -> Result<()> {
        if self.current == Some(dev) {
            self.current = None;
            info!("MIDI device address = {}, instance = {} is unmounted", dev, instance);
            Ok(())
        } else {
            info!("Unused MIDI device address = {}, instance = {} is unmounted", dev, instance);
            Err(Error::UnknownDevice(dev))
        }
    }
}
