//! Shared serial lines.
//!
//! A serial port can only be opened once, so every probe on the same device
//! path goes through one [`SerialLines`] slot. The slot's async mutex serializes
//! requests; the line is reopened whenever a probe asks for another rate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use modscan_common::modbus::{MODBUS_UNIT_MIN, UnitId};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex as AsyncMutex;
use tokio_modbus::client::Context;
use tokio_modbus::prelude::*;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::debug;

use crate::error::ProbeError;
use crate::frame;
use crate::register::{self, RegisterBlock, Reply};

const WAKE_REPEAT: usize = 12;
const WAKE_INTERVAL: Duration = Duration::from_millis(100);

struct SerialLine {
    rate: u32,
    ctx: Context,
}

type Slot = Arc<AsyncMutex<Option<SerialLine>>>;

#[derive(Default)]
pub struct SerialLines {
    slots: Mutex<HashMap<String, Slot>>,
}

impl SerialLines {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, device: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(device.to_string()).or_default().clone()
    }

    /// Reads `block` from `unit` on `device`, opening or re-rating the line first
    /// when needed.
    pub async fn read_block(
        &self,
        device: &str,
        rate: u32,
        unit: UnitId,
        block: RegisterBlock,
        timeout: Duration,
    ) -> Result<Reply, ProbeError> {
        let slot = self.slot(device);
        let mut guard = slot.lock().await;

        let line = match guard.take() {
            Some(line) if line.rate == rate => line,
            stale => {
                if let Some(mut old) = stale {
                    debug!("Re-rating {device} from {} to {rate} bps", old.rate);
                    let _ = old.ctx.disconnect().await;
                }
                open_line(device, rate).await?
            }
        };

        let line = guard.insert(line);
        register::read_block(&mut line.ctx, unit, block, timeout).await
    }

    /// Closes every open line. Lines are reopened lazily by the next probe.
    pub async fn close_all(&self) {
        let slots: Vec<Slot> = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.drain().map(|(_, slot)| slot).collect()
        };

        for slot in slots {
            if let Some(mut line) = slot.lock().await.take() {
                let _ = line.ctx.disconnect().await;
            }
        }
    }
}

async fn open_line(device: &str, rate: u32) -> Result<SerialLine, ProbeError> {
    let mut port: SerialStream = tokio_serial::new(device, rate)
        .open_native_async()
        .map_err(|source| ProbeError::Serial {
            path: device.to_string(),
            source,
        })?;

    wake_devices(&mut port).await?;
    debug!("Opened {device} at {rate} bps");

    Ok(SerialLine {
        rate,
        ctx: rtu::attach_slave(port, Slave(MODBUS_UNIT_MIN)),
    })
}

/// Lets auto-bauding devices adapt to a freshly opened line.
async fn wake_devices(port: &mut SerialStream) -> Result<(), ProbeError> {
    let packet: Vec<u8> = frame::wake_frame();
    for _ in 0..WAKE_REPEAT {
        port.write_all(&packet).await?;
        tokio::time::sleep(WAKE_INTERVAL).await;
    }
    Ok(())
}
