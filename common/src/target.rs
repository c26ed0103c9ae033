//! # Probe Target Model
//!
//! One candidate to test for a responding Modbus device:
//! * A **network** target: method, IPv4 host, TCP port and unit.
//! * A **serial** target: device path, baud rate, serial mode and unit.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use crate::error::TargetError;
use crate::modbus::{Method, UnitId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NetTarget {
    pub method: Method,
    pub host: Ipv4Addr,
    pub port: u16,
    pub unit: UnitId,
}

impl NetTarget {
    pub fn new(method: Method, host: Ipv4Addr, port: u16, unit: UnitId) -> Result<Self, TargetError> {
        if method.is_serial() {
            return Err(TargetError::NotNetwork(method.to_string()));
        }
        Ok(Self {
            method,
            host,
            port,
            unit,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.host, self.port))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerialTarget {
    /// Device path, e.g. `/dev/ttyUSB0`.
    pub device: String,
    pub rate: u32,
    pub mode: Method,
    pub unit: UnitId,
}

impl SerialTarget {
    pub fn new(device: impl Into<String>, rate: u32, mode: Method, unit: UnitId) -> Result<Self, TargetError> {
        if !mode.is_serial() {
            return Err(TargetError::NotSerial(mode.to_string()));
        }
        Ok(Self {
            device: device.into(),
            rate,
            mode,
            unit,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProbeTarget {
    Network(NetTarget),
    Serial(SerialTarget),
}

impl ProbeTarget {
    pub fn unit(&self) -> UnitId {
        match self {
            ProbeTarget::Network(t) => t.unit,
            ProbeTarget::Serial(t) => t.unit,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            ProbeTarget::Network(t) => t.method,
            ProbeTarget::Serial(t) => t.mode,
        }
    }
}

impl From<NetTarget> for ProbeTarget {
    fn from(target: NetTarget) -> Self {
        ProbeTarget::Network(target)
    }
}

impl From<SerialTarget> for ProbeTarget {
    fn from(target: SerialTarget) -> Self {
        ProbeTarget::Serial(target)
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeTarget::Network(t) => {
                write!(f, "{}://{}:{} unit {}", t.method, t.host, t.port, t.unit)
            }
            ProbeTarget::Serial(t) => write!(f, "{}://{}@{} unit {}", t.mode, t.device, t.rate, t.unit),
        }
    }
}

/// Parses a baud rate, accepting an optional `bps` suffix.
pub fn parse_rate(s: &str) -> Result<u32, TargetError> {
    let trimmed = s.trim();
    let digits = trimmed.strip_suffix("bps").unwrap_or(trimmed).trim();
    match digits.parse::<u32>() {
        Ok(rate) if rate > 0 => Ok(rate),
        _ => Err(TargetError::InvalidRate(s.to_string())),
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
