use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Why a single probe attempt got no answer.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("connection to {addr} failed: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("serial port {path} unavailable: {source}")]
    Serial {
        path: String,
        #[source]
        source: tokio_serial::Error,
    },

    #[error("modbus transport error: {0}")]
    Modbus(#[from] tokio_modbus::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
