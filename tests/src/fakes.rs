//! Scripted engine and enumerator for driving the scanners without hardware.

use std::ops::ControlFlow;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use modscan_common::device::Device;
use modscan_common::modbus::{Method, UnitId};
use modscan_common::network::attachment::NetworkAttachment;
use modscan_common::network::blacklist::Blacklist;
use modscan_common::network::interface::NetworkEnumerator;
use modscan_common::target::ProbeTarget;
use modscan_core::{ProbeEngine, Progress};

type Responder = Box<dyn Fn(&ProbeTarget) -> bool + Send + Sync>;

/// One `probe` call as the engine saw it.
#[derive(Debug, Clone)]
pub struct Batch {
    pub targets: Vec<ProbeTarget>,
    pub concurrency: usize,
    pub retries: usize,
}

impl Batch {
    pub fn units(&self) -> Vec<u8> {
        self.targets.iter().map(|t| t.unit().get()).collect()
    }

    pub fn rate(&self) -> Option<u32> {
        match self.targets.first()? {
            ProbeTarget::Serial(serial) => Some(serial.rate),
            ProbeTarget::Network(_) => None,
        }
    }
}

/// Engine that answers for the targets its responder accepts.
///
/// Every target takes `delay` to evaluate, so tests can observe a scan while
/// it runs.
pub struct ScriptedEngine {
    quick_units: Vec<UnitId>,
    responder: Responder,
    delay: Duration,
    batches: Mutex<Vec<Batch>>,
}

impl ScriptedEngine {
    pub fn new(quick_units: &[u8], responder: impl Fn(&ProbeTarget) -> bool + Send + Sync + 'static) -> Self {
        Self {
            quick_units: quick_units.iter().filter_map(|u| UnitId::new(*u).ok()).collect(),
            responder: Box::new(responder),
            delay: Duration::ZERO,
            batches: Mutex::new(Vec::new()),
        }
    }

    pub fn silent(quick_units: &[u8]) -> Self {
        Self::new(quick_units, |_| false)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn batches(&self) -> Vec<Batch> {
        lock(&self.batches).clone()
    }
}

#[async_trait]
impl ProbeEngine for ScriptedEngine {
    async fn probe(
        &self,
        targets: Vec<ProbeTarget>,
        progress: &dyn Progress,
        concurrency: usize,
        retries: usize,
    ) -> anyhow::Result<ControlFlow<(), Vec<Device>>> {
        lock(&self.batches).push(Batch {
            targets: targets.clone(),
            concurrency,
            retries,
        });

        let mut found: Vec<Device> = Vec::new();
        for target in targets {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let device: Option<Device> = (self.responder)(&target).then(|| Device::new(target, "Scripted", "Modbus device"));
            if let Some(device) = &device {
                found.push(device.clone());
            }
            if progress.progress(1, device).is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }

        Ok(ControlFlow::Continue(found))
    }

    fn get_units(&self, _method: Method) -> Vec<UnitId> {
        self.quick_units.clone()
    }
}

/// Enumerator returning a fixed set of attachments.
pub struct StaticNetworks(pub Vec<NetworkAttachment>);

impl NetworkEnumerator for StaticNetworks {
    fn get_networks(&self, blacklist: &Blacklist) -> Vec<NetworkAttachment> {
        self.0.iter().filter(|n| !blacklist.excludes(n)).cloned().collect()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
