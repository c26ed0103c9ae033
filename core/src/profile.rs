//! # Device Profiles
//!
//! A profile describes how one family of devices is recognised: which transport
//! methods it speaks, which unit identifiers and baud rates it usually sits on,
//! and which register block identifies it.
//!
//! The [`ProfileRegistry`] answers two questions for the scanners: which units
//! are worth a quick look for a given method, and which rates a serial line
//! should be tried at when the caller did not say.

use std::collections::BTreeSet;
use std::time::Duration;

use modscan_common::modbus::{Method, UnitId};
use modscan_protocols::{RegisterBlock, Reply};

/// What a reply must look like for a profile to claim the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// Any answer, exceptions included, proves a device is present.
    AnyReply,
    /// A normal register reply, whatever its content.
    Registers,
    /// Registers holding exactly these words.
    Equals(Vec<u16>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    pub vendor: String,
    pub device_type: String,
    pub methods: Vec<Method>,
    pub units: Vec<UnitId>,
    pub rates: Vec<u32>,
    pub block: RegisterBlock,
    pub signature: Signature,
    pub min_timeout: Duration,
}

impl DeviceProfile {
    pub fn supports(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    pub fn identifies(&self, reply: &Reply) -> bool {
        match (&self.signature, reply) {
            (Signature::AnyReply, _) => true,
            (Signature::Registers, Reply::Registers(_)) => true,
            (Signature::Equals(expected), Reply::Registers(words)) => words == expected,
            _ => false,
        }
    }
}

pub const COMMON_UNITS: [u8; 6] = [1, 2, 3, 10, 100, 247];
pub const COMMON_RATES: [u32; 5] = [9600, 19200, 38400, 57600, 115200];

/// "SunS" marker at the start of a SunSpec register map.
const SUNSPEC_MARKER: [u16; 2] = [0x5375, 0x6E53];
const SUNSPEC_BASE: u16 = 40000;

#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<DeviceProfile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the profiles every scan knows about. Specific profiles come
    /// first so the generic catch-all only claims what nothing else recognised.
    pub fn builtin() -> Self {
        let units: Vec<UnitId> = COMMON_UNITS.iter().filter_map(|u| UnitId::new(*u).ok()).collect();

        let mut registry = Self::new();
        registry.register(DeviceProfile {
            vendor: "SunSpec".into(),
            device_type: "SunSpec device".into(),
            methods: Method::ALL.to_vec(),
            units: units.clone(),
            rates: COMMON_RATES.to_vec(),
            block: RegisterBlock::holding(SUNSPEC_BASE, 2),
            signature: Signature::Equals(SUNSPEC_MARKER.to_vec()),
            min_timeout: Duration::from_millis(500),
        });
        registry.register(DeviceProfile {
            vendor: "Generic".into(),
            device_type: "Modbus device".into(),
            methods: Method::ALL.to_vec(),
            units,
            rates: COMMON_RATES.to_vec(),
            block: RegisterBlock::holding(0, 1),
            signature: Signature::AnyReply,
            min_timeout: Duration::from_millis(500),
        });
        registry
    }

    /// Adds a profile unless one with the same vendor and type is present.
    pub fn register(&mut self, profile: DeviceProfile) -> bool {
        let known = self
            .profiles
            .iter()
            .any(|p| p.vendor == profile.vendor && p.device_type == profile.device_type);
        if known {
            return false;
        }
        self.profiles.push(profile);
        true
    }

    pub fn profiles_for(&self, method: Method) -> impl Iterator<Item = &DeviceProfile> {
        self.profiles.iter().filter(move |p| p.supports(method))
    }

    /// Union of the preferred units of every profile speaking `method`.
    pub fn units(&self, method: Method) -> Vec<UnitId> {
        let units: BTreeSet<UnitId> = self
            .profiles_for(method)
            .flat_map(|p| p.units.iter().copied())
            .collect();
        units.into_iter().collect()
    }

    /// Union of the preferred rates of every profile speaking `method`.
    pub fn rates(&self, method: Method) -> Vec<u32> {
        let rates: BTreeSet<u32> = self
            .profiles_for(method)
            .flat_map(|p| p.rates.iter().copied())
            .collect();
        rates.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
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
