use std::collections::BTreeSet;
use std::ops::ControlFlow;
use std::sync::Arc;

use async_trait::async_trait;
use modscan_common::device::Device;
use modscan_common::error::TargetError;
use modscan_common::info;
use modscan_common::modbus::{self, Method, UnitId};
use modscan_common::target::{ProbeTarget, SerialTarget};

use crate::engine::ProbeEngine;
use crate::scanner::{ScanState, ScanStrategy, Scanner};

const CONCURRENCY: usize = 4;
const RETRIES: usize = 1;

/// Finds the line speed of one serial bus, then sweeps every unit at it.
///
/// The quick phase tries the engine's usual units at each rate in order and
/// settles on the first rate where anything answers. The full phase then probes
/// all remaining units, at that rate only, or at every rate when the quick
/// phase heard nothing.
pub struct SerialScan {
    engine: Arc<dyn ProbeEngine>,
    device: String,
    rates: Vec<u32>,
    mode: Method,
}

pub type SerialScanner = Scanner<SerialScan>;

impl SerialScanner {
    pub fn new(engine: Arc<dyn ProbeEngine>, device: impl Into<String>, rates: Vec<u32>, mode: Method) -> anyhow::Result<Self> {
        if !mode.is_serial() {
            return Err(TargetError::NotSerial(mode.to_string()).into());
        }

        Ok(Scanner::with_strategy(SerialScan {
            engine,
            device: device.into(),
            rates,
            mode,
        }))
    }

    pub fn with_rate(engine: Arc<dyn ProbeEngine>, device: impl Into<String>, rate: u32, mode: Method) -> anyhow::Result<Self> {
        Self::new(engine, device, vec![rate], mode)
    }
}

impl SerialScan {
    pub fn rates(&self) -> &[u32] {
        &self.rates
    }

    async fn scan_units(&self, units: &[UnitId], rate: u32, state: &ScanState) -> anyhow::Result<ControlFlow<(), Vec<Device>>> {
        let targets: Vec<ProbeTarget> = units
            .iter()
            .map(|unit| SerialTarget::new(self.device.clone(), rate, self.mode, *unit).map(ProbeTarget::from))
            .collect::<Result<_, _>>()?;

        self.engine.probe(targets, state, CONCURRENCY, RETRIES).await
    }
}

#[async_trait]
impl ScanStrategy for SerialScan {
    type Plan = ();

    fn prepare(&self) -> Option<(u64, ())> {
        Some((modbus::unit_count(), ()))
    }

    async fn scan(&self, _plan: (), state: &ScanState) -> anyhow::Result<ControlFlow<()>> {
        let quick_units: Vec<UnitId> = self.engine.get_units(self.mode);
        let mut rates: &[u32] = &self.rates;
        let mut found: Vec<Device> = Vec::new();

        for (i, rate) in self.rates.iter().enumerate() {
            info!("Scanning {} @ {rate} bps (quick)", self.device);

            found = match self.scan_units(&quick_units, *rate, state).await? {
                ControlFlow::Continue(found) => found,
                ControlFlow::Break(()) => return Ok(ControlFlow::Break(())),
            };

            if !found.is_empty() {
                rates = &self.rates[i..=i];
                break;
            }
        }

        let known: BTreeSet<UnitId> = found.iter().map(Device::unit).collect();
        let units: Vec<UnitId> = UnitId::all().filter(|unit| !known.contains(unit)).collect();

        for rate in rates {
            info!("Scanning {} @ {rate} bps (full)", self.device);

            if self.scan_units(&units, *rate, state).await?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(()))
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
