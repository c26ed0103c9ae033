//! # Modbus Addressing
//!
//! Unit identifiers and transport methods shared by targets, profiles and the
//! scanners.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::TargetError;

pub const MODBUS_UNIT_MIN: u8 = 1;
pub const MODBUS_UNIT_MAX: u8 = 247;
pub const MODBUS_TCP_PORT: u16 = 502;

/// A Modbus unit (slave) identifier, always within `1..=247`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(u8);

impl UnitId {
    pub fn new(unit: u8) -> Result<Self, TargetError> {
        if (MODBUS_UNIT_MIN..=MODBUS_UNIT_MAX).contains(&unit) {
            Ok(Self(unit))
        } else {
            Err(TargetError::UnitOutOfRange(unit.into()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every assignable unit identifier, in ascending order.
    pub fn all() -> impl Iterator<Item = UnitId> {
        unit_range().map(UnitId)
    }
}

pub fn unit_range() -> RangeInclusive<u8> {
    MODBUS_UNIT_MIN..=MODBUS_UNIT_MAX
}

/// Number of assignable unit identifiers.
pub fn unit_count() -> u64 {
    u64::from(MODBUS_UNIT_MAX - MODBUS_UNIT_MIN) + 1
}

impl TryFrom<u8> for UnitId {
    type Error = TargetError;

    fn try_from(unit: u8) -> Result<Self, Self::Error> {
        UnitId::new(unit)
    }
}

impl FromStr for UnitId {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u16 = s
            .trim()
            .parse()
            .map_err(|_| TargetError::InvalidUnit(s.to_string()))?;
        let unit: u8 = u8::try_from(value).map_err(|_| TargetError::UnitOutOfRange(value))?;
        UnitId::new(unit)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a probe reaches a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Modbus TCP (MBAP framing).
    Tcp,
    /// RTU framing tunnelled over a plain TCP stream, as used by serial gateways.
    RtuOverTcp,
    /// RTU framing on a local serial line.
    Rtu,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Tcp, Method::RtuOverTcp, Method::Rtu];

    pub fn is_serial(self) -> bool {
        matches!(self, Method::Rtu)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Tcp => "tcp",
            Method::RtuOverTcp => "rtu-over-tcp",
            Method::Rtu => "rtu",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(Method::Tcp),
            "rtu-over-tcp" | "rtuovertcp" => Ok(Method::RtuOverTcp),
            "rtu" => Ok(Method::Rtu),
            _ => Err(TargetError::UnknownMethod(s.to_string())),
        }
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
