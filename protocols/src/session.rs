use std::sync::Arc;
use std::time::Duration;

use modscan_common::modbus::{Method, UnitId};
use modscan_common::target::{NetTarget, ProbeTarget};
use tokio::net::TcpStream;
use tokio::time;
use tokio_modbus::client::Context;
use tokio_modbus::prelude::*;

use crate::error::ProbeError;
use crate::register::{self, RegisterBlock, Reply};
use crate::serial::SerialLines;

/// Connection factory shared by all probes of an engine.
#[derive(Default)]
pub struct Transport {
    serial: Arc<SerialLines>,
}

/// An open path to one probe target.
pub enum Session {
    Network(Context),
    Serial {
        lines: Arc<SerialLines>,
        device: String,
        rate: u32,
    },
}

impl Transport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, target: &ProbeTarget, timeout: Duration) -> Result<Session, ProbeError> {
        match target {
            ProbeTarget::Network(net) => Ok(Session::Network(connect(net, timeout).await?)),
            ProbeTarget::Serial(serial) => Ok(Session::Serial {
                lines: self.serial.clone(),
                device: serial.device.clone(),
                rate: serial.rate,
            }),
        }
    }

    /// Releases serial lines held open between probes of a batch.
    pub async fn release(&self) {
        self.serial.close_all().await;
    }
}

impl Session {
    pub async fn read_block(&mut self, unit: UnitId, block: RegisterBlock, timeout: Duration) -> Result<Reply, ProbeError> {
        match self {
            Session::Network(ctx) => register::read_block(ctx, unit, block, timeout).await,
            Session::Serial { lines, device, rate } => {
                lines.read_block(device, *rate, unit, block, timeout).await
            }
        }
    }

    pub async fn close(self) {
        if let Session::Network(mut ctx) = self {
            let _ = ctx.disconnect().await;
        }
    }
}

async fn connect(target: &NetTarget, timeout: Duration) -> Result<Context, ProbeError> {
    let addr = target.socket_addr();
    let slave = Slave(target.unit.get());

    let stream: TcpStream = time::timeout(timeout, TcpStream::connect(addr))
        .await
        .map_err(|_| ProbeError::Timeout(timeout))?
        .map_err(|source| ProbeError::Connect { addr, source })?;

    match target.method {
        Method::RtuOverTcp => Ok(rtu::attach_slave(stream, slave)),
        Method::Tcp | Method::Rtu => Ok(tcp::attach_slave(stream, slave)),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
