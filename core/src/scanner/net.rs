use std::ops::ControlFlow;
use std::sync::Arc;

use async_trait::async_trait;
use modscan_common::error::TargetError;
use modscan_common::modbus::{Method, UnitId};
use modscan_common::network::attachment::NetworkAttachment;
use modscan_common::network::blacklist::Blacklist;
use modscan_common::network::interface::NetworkEnumerator;
use modscan_common::target::{NetTarget, ProbeTarget};
use modscan_common::{info, warn};

use crate::engine::ProbeEngine;
use crate::scanner::{ScanState, ScanStrategy, Scanner};

const CONCURRENCY: usize = 4;
const RETRIES: usize = 0;

/// Probes every host of every local IPv4 subnet for one unit.
pub struct NetworkScan {
    engine: Arc<dyn ProbeEngine>,
    enumerator: Arc<dyn NetworkEnumerator>,
    method: Method,
    port: u16,
    unit: UnitId,
    blacklist: Blacklist,
}

pub type NetScanner = Scanner<NetworkScan>;

impl NetScanner {
    pub fn new(
        engine: Arc<dyn ProbeEngine>,
        enumerator: Arc<dyn NetworkEnumerator>,
        method: Method,
        port: u16,
        unit: UnitId,
        blacklist: Blacklist,
    ) -> anyhow::Result<Self> {
        if method.is_serial() {
            return Err(TargetError::NotNetwork(method.to_string()).into());
        }

        Ok(Scanner::with_strategy(NetworkScan {
            engine,
            enumerator,
            method,
            port,
            unit,
            blacklist,
        }))
    }
}

impl NetworkScan {
    fn targets(&self, attachment: &NetworkAttachment) -> Vec<ProbeTarget> {
        attachment
            .hosts()
            .map(|host| {
                ProbeTarget::Network(NetTarget {
                    method: self.method,
                    host,
                    port: self.port,
                    unit: self.unit,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ScanStrategy for NetworkScan {
    type Plan = Vec<NetworkAttachment>;

    fn prepare(&self) -> Option<(u64, Self::Plan)> {
        let networks: Vec<NetworkAttachment> = self.enumerator.get_networks(&self.blacklist);
        if networks.is_empty() {
            warn!("Unable to get network addresses");
            return None;
        }

        let total: u64 = networks.iter().map(NetworkAttachment::scan_size).sum();
        Some((total, networks))
    }

    async fn scan(&self, networks: Self::Plan, state: &ScanState) -> anyhow::Result<ControlFlow<()>> {
        for network in &networks {
            info!("Scanning {network}");

            let targets: Vec<ProbeTarget> = self.targets(network);
            if let ControlFlow::Break(()) = self.engine.probe(targets, state, CONCURRENCY, RETRIES).await? {
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
