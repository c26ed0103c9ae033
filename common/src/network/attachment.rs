use std::fmt;
use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

use crate::network::range::{self, Ipv4Range};

/// A local IPv4 address together with the subnet it is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkAttachment {
    pub interface: String,
    pub address: Ipv4Addr,
    pub network: Ipv4Network,
}

impl NetworkAttachment {
    pub fn new(interface: impl Into<String>, address: Ipv4Addr, prefix: u8) -> anyhow::Result<Self> {
        let network = Ipv4Network::new(address, prefix)?;
        Ok(Self {
            interface: interface.into(),
            address,
            network,
        })
    }

    pub fn num_addresses(&self) -> u64 {
        range::num_addresses(&self.network)
    }

    /// Expected probe count for progress display: the subnet size minus our
    /// own address and the network and broadcast addresses.
    pub fn scan_size(&self) -> u64 {
        self.num_addresses().saturating_sub(3)
    }

    /// Every usable host of the subnet except our own address.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> + use<> {
        let own = self.address;
        let usable: Ipv4Range = range::host_range(&self.network);
        usable.to_iter().filter(move |ip| *ip != own)
    }
}

impl fmt::Display for NetworkAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} via {} ({})",
            self.network.network(),
            self.network.prefix(),
            self.address,
            self.interface
        )
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
