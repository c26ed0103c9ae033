use std::time::Duration;

use crate::modbus::UnitId;
use crate::target::ProbeTarget;

/// A device that answered a probe.
///
/// Scanners treat it as an opaque handle; only [`Device::unit`] is consulted,
/// to keep already found units out of the serial full sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub target: ProbeTarget,
    pub vendor: String,
    pub device_type: String,
    /// Round trip of the identifying read.
    pub latency: Duration,
    /// Suggested request timeout for later polling of this device.
    pub timeout: Duration,
}

impl Device {
    pub fn new(target: ProbeTarget, vendor: impl Into<String>, device_type: impl Into<String>) -> Self {
        Self {
            target,
            vendor: vendor.into(),
            device_type: device_type.into(),
            latency: Duration::ZERO,
            timeout: Duration::ZERO,
        }
    }

    /// Records the measured latency and derives a timeout of four round trips,
    /// never below `min_timeout`.
    pub fn with_latency(mut self, latency: Duration, min_timeout: Duration) -> Self {
        self.latency = latency;
        self.timeout = min_timeout.max(latency * 4);
        self
    }

    pub fn unit(&self) -> UnitId {
        self.target.unit()
    }
}
