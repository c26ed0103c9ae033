use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::TargetError;
use crate::network::attachment::NetworkAttachment;

/// Interfaces and subnets that must never be scanned.
///
/// Entries are either interface names (`eth1`) or IPv4 CIDR blocks
/// (`10.0.0.0/8`). A block excludes every attachment whose subnet lies inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    names: Vec<String>,
    networks: Vec<Ipv4Network>,
}

impl Blacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_interface(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn add_network(&mut self, network: Ipv4Network) {
        self.networks.push(network);
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.networks.is_empty()
    }

    pub fn excludes(&self, attachment: &NetworkAttachment) -> bool {
        if self.names.iter().any(|name| *name == attachment.interface) {
            return true;
        }

        let net = attachment.network;
        self.networks
            .iter()
            .any(|block| block.contains(net.network()) && net.prefix() >= block.prefix())
    }

    fn add_entry(&mut self, entry: &str) -> Result<(), TargetError> {
        let Some((ip_str, prefix_str)) = entry.split_once('/') else {
            if entry.parse::<Ipv4Addr>().is_ok() {
                self.add_network(single_host(entry)?);
            } else {
                self.add_interface(entry);
            }
            return Ok(());
        };

        let ip = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|_| TargetError::InvalidBlacklist(entry.to_string()))?;
        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|_| TargetError::InvalidBlacklist(entry.to_string()))?;
        let network = Ipv4Network::new(ip, prefix)
            .map_err(|_| TargetError::InvalidBlacklist(entry.to_string()))?;
        let normalized = Ipv4Network::new(network.network(), prefix)
            .map_err(|_| TargetError::InvalidBlacklist(entry.to_string()))?;

        self.add_network(normalized);
        Ok(())
    }
}

fn single_host(entry: &str) -> Result<Ipv4Network, TargetError> {
    let ip = entry
        .parse::<Ipv4Addr>()
        .map_err(|_| TargetError::InvalidBlacklist(entry.to_string()))?;
    Ipv4Network::new(ip, 32).map_err(|_| TargetError::InvalidBlacklist(entry.to_string()))
}

impl FromStr for Blacklist {
    type Err = TargetError;

    /// Parses a comma-separated list, e.g. `"eth1, 10.0.0.0/8"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut blacklist = Blacklist::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            blacklist.add_entry(part)?;
        }
        Ok(blacklist)
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
