//! # Probe Engine
//!
//! The engine turns a batch of [`ProbeTarget`]s into discovered [`Device`]s.
//! Scanners only see the [`ProbeEngine`] trait; [`ModbusProbeEngine`] is the
//! implementation that talks to real hardware.
//!
//! Progress is reported through [`Progress`] once per target, after all retries
//! for that target are exhausted. A [`ControlFlow::Break`] from the sink stops the
//! batch: no further target is dispatched and in-flight probes are dropped.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use modscan_common::config::DEFAULT_PROBE_TIMEOUT;
use modscan_common::device::Device;
use modscan_common::modbus::{Method, UnitId};
use modscan_common::target::ProbeTarget;
use modscan_common::{success, warn};
use modscan_protocols::{Session, Transport};
use tokio::task::JoinSet;
use tracing::debug;

use crate::profile::ProfileRegistry;

/// Receives the outcome of every evaluated target.
pub trait Progress: Send + Sync {
    /// `n` probe attempts completed; `device` is set when one of them answered.
    fn progress(&self, n: u64, device: Option<Device>) -> ControlFlow<()>;
}

#[async_trait]
pub trait ProbeEngine: Send + Sync {
    /// Probes `targets` with at most `concurrency` probes in flight, re-trying a
    /// silent target `retries` more times.
    ///
    /// Returns the devices found in this call, or `Break` when `progress` asked
    /// to stop.
    async fn probe(
        &self,
        targets: Vec<ProbeTarget>,
        progress: &dyn Progress,
        concurrency: usize,
        retries: usize,
    ) -> anyhow::Result<ControlFlow<(), Vec<Device>>>;

    /// Units worth a quick look for `method`.
    fn get_units(&self, method: Method) -> Vec<UnitId>;
}

pub struct ModbusProbeEngine {
    prober: Arc<Prober>,
}

struct Prober {
    registry: ProfileRegistry,
    transport: Transport,
    timeout: Duration,
}

impl ModbusProbeEngine {
    pub fn new(registry: ProfileRegistry, timeout: Duration) -> Self {
        Self {
            prober: Arc::new(Prober {
                registry,
                transport: Transport::new(),
                timeout,
            }),
        }
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.prober.registry
    }
}

impl Default for ModbusProbeEngine {
    fn default() -> Self {
        Self::new(ProfileRegistry::builtin(), DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl ProbeEngine for ModbusProbeEngine {
    async fn probe(
        &self,
        targets: Vec<ProbeTarget>,
        progress: &dyn Progress,
        concurrency: usize,
        retries: usize,
    ) -> anyhow::Result<ControlFlow<(), Vec<Device>>> {
        let width: usize = concurrency.max(1);
        let mut pending = targets.into_iter();
        let mut tasks: JoinSet<Option<Device>> = JoinSet::new();
        let mut found: Vec<Device> = Vec::new();

        let flow: ControlFlow<()> = loop {
            while tasks.len() < width {
                let Some(target) = pending.next() else {
                    break;
                };
                let prober = self.prober.clone();
                tasks.spawn(async move { prober.probe_target(target, retries).await });
            }

            let Some(joined) = tasks.join_next().await else {
                break ControlFlow::Continue(());
            };

            let device: Option<Device> = match joined {
                Ok(device) => device,
                Err(e) => {
                    warn!("Probe task failed: {e}");
                    None
                }
            };

            if let Some(device) = &device {
                found.push(device.clone());
            }

            if progress.progress(1, device).is_break() {
                break ControlFlow::Break(());
            }
        };

        tasks.shutdown().await;
        self.prober.transport.release().await;

        Ok(match flow {
            ControlFlow::Continue(()) => ControlFlow::Continue(found),
            ControlFlow::Break(()) => ControlFlow::Break(()),
        })
    }

    fn get_units(&self, method: Method) -> Vec<UnitId> {
        self.prober.registry.units(method)
    }
}

impl Prober {
    async fn probe_target(&self, target: ProbeTarget, retries: usize) -> Option<Device> {
        for attempt in 0..=retries {
            if let Some(device) = self.identify(&target).await {
                return Some(device);
            }
            if attempt < retries {
                debug!("No answer from {target}, retrying");
            }
        }
        None
    }

    /// Opens one session to the target and walks the profiles that speak its
    /// method until one of them recognises the reply.
    async fn identify(&self, target: &ProbeTarget) -> Option<Device> {
        let method: Method = target.method();
        if self.registry.profiles_for(method).next().is_none() {
            return None;
        }

        let mut session: Session = match self.transport.open(target, self.timeout).await {
            Ok(session) => session,
            Err(e) => {
                debug!("{target}: {e}");
                return None;
            }
        };

        let mut device: Option<Device> = None;
        for profile in self.registry.profiles_for(method) {
            let started = Instant::now();
            match session.read_block(target.unit(), profile.block, self.timeout).await {
                Ok(reply) if profile.identifies(&reply) => {
                    device = Some(
                        Device::new(target.clone(), &profile.vendor, &profile.device_type)
                            .with_latency(started.elapsed(), profile.min_timeout),
                    );
                    break;
                }
                Ok(reply) => debug!("{target}: {} did not match {reply:?}", profile.vendor),
                Err(e) => debug!("{target}: {e}"),
            }
        }

        session.close().await;

        if let Some(device) = &device {
            success!("Found {}: {} at {target}", device.device_type, device.vendor);
        }
        device
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
