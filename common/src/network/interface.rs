//! Enumerates the local IPv4 attachments a network scan should cover.

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::Ipv4Network;

use crate::network::attachment::NetworkAttachment;
use crate::network::blacklist::Blacklist;
use crate::utils::interface::NetworkInterfaceExtension;

/// Source of the local network attachments to scan.
pub trait NetworkEnumerator: Send + Sync {
    /// Returns the usable attachments minus those excluded by `blacklist`.
    /// An empty list means there is nothing to scan.
    fn get_networks(&self, blacklist: &Blacklist) -> Vec<NetworkAttachment>;
}

/// Reads attachments from the operating system through `pnet`.
pub struct InterfaceEnumerator;

impl NetworkEnumerator for InterfaceEnumerator {
    fn get_networks(&self, blacklist: &Blacklist) -> Vec<NetworkAttachment> {
        collect_attachments(&datalink::interfaces(), blacklist)
    }
}

/// Builds the attachment list from raw interfaces.
///
/// Only interfaces that are up and not loopback are considered, and only their
/// global-scope IPv4 addresses. Overlapping subnets are collapsed: a subnet
/// inside one already collected is dropped, and a wider subnet replaces the
/// narrower ones it covers.
pub fn collect_attachments(interfaces: &[NetworkInterface], blacklist: &Blacklist) -> Vec<NetworkAttachment> {
    let mut attachments: Vec<NetworkAttachment> = Vec::new();

    for intf in interfaces.iter().filter(|i| i.is_up() && !i.is_loopback()) {
        for net in intf.get_global_ipv4_nets() {
            let Ok(attachment) = NetworkAttachment::new(intf.name.clone(), net.ip(), net.prefix()) else {
                continue;
            };

            if blacklist.excludes(&attachment) {
                continue;
            }

            if attachments.iter().any(|known| covers(&known.network, &attachment.network)) {
                continue;
            }

            attachments.retain(|known| !covers(&attachment.network, &known.network));
            attachments.push(attachment);
        }
    }

    attachments
}

fn covers(outer: &Ipv4Network, inner: &Ipv4Network) -> bool {
    outer.prefix() <= inner.prefix() && outer.contains(inner.network())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
