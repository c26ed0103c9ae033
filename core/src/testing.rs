//! Scripted collaborators for unit tests.

use std::net::Ipv4Addr;
use std::ops::ControlFlow;
use std::sync::Mutex;

use async_trait::async_trait;
use modscan_common::device::Device;
use modscan_common::modbus::{Method, UnitId};
use modscan_common::network::attachment::NetworkAttachment;
use modscan_common::network::blacklist::Blacklist;
use modscan_common::network::interface::NetworkEnumerator;
use modscan_common::target::{NetTarget, ProbeTarget};

use crate::engine::{ProbeEngine, Progress};

pub fn unit(u: u8) -> UnitId {
    UnitId::new(u).unwrap()
}

pub fn device_at(u: u8) -> Device {
    let target = NetTarget::new(Method::Tcp, Ipv4Addr::LOCALHOST, 502, unit(u)).unwrap();
    Device::new(target.into(), "Generic", "Modbus device")
}

/// One recorded `probe` call.
#[derive(Debug, Clone)]
pub struct Batch {
    pub targets: Vec<ProbeTarget>,
    pub concurrency: usize,
    pub retries: usize,
}

/// Answers for every target accepted by `answers`, reporting each target once.
pub struct FakeEngine {
    quick_units: Vec<UnitId>,
    answers: Box<dyn Fn(&ProbeTarget) -> bool + Send + Sync>,
    batches: Mutex<Vec<Batch>>,
}

impl FakeEngine {
    pub fn new(quick_units: &[u8], answers: impl Fn(&ProbeTarget) -> bool + Send + Sync + 'static) -> Self {
        Self {
            quick_units: quick_units.iter().map(|u| unit(*u)).collect(),
            answers: Box::new(answers),
            batches: Mutex::new(Vec::new()),
        }
    }

    pub fn silent(quick_units: &[u8]) -> Self {
        Self::new(quick_units, |_| false)
    }

    pub fn batches(&self) -> Vec<Batch> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProbeEngine for FakeEngine {
    async fn probe(
        &self,
        targets: Vec<ProbeTarget>,
        progress: &dyn Progress,
        concurrency: usize,
        retries: usize,
    ) -> anyhow::Result<ControlFlow<(), Vec<Device>>> {
        self.batches.lock().unwrap().push(Batch {
            targets: targets.clone(),
            concurrency,
            retries,
        });

        let mut found = Vec::new();
        for target in targets {
            let device = (self.answers)(&target).then(|| Device::new(target, "Generic", "Modbus device"));
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

pub struct FixedNetworks(pub Vec<NetworkAttachment>);

impl NetworkEnumerator for FixedNetworks {
    fn get_networks(&self, blacklist: &Blacklist) -> Vec<NetworkAttachment> {
        self.0.iter().filter(|n| !blacklist.excludes(n)).cloned().collect()
    }
}
