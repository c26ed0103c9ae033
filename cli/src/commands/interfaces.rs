use modscan_common::config::Config;
use modscan_common::network::attachment::NetworkAttachment;
use modscan_common::network::blacklist::Blacklist;
use modscan_common::network::interface::{InterfaceEnumerator, NetworkEnumerator};

use crate::mprint;
use crate::terminal::{format, print};

pub fn interfaces(blacklist: Blacklist, cfg: &Config) {
    let networks: Vec<NetworkAttachment> = InterfaceEnumerator.get_networks(&blacklist);

    if networks.is_empty() {
        print::header("no usable networks", cfg.quiet);
        print::no_results();
        return;
    }

    for (idx, network) in networks.iter().enumerate() {
        print::tree_head(idx, &network.interface);
        print::as_tree_one_level(format::attachment_to_details(network));
        if idx + 1 != networks.len() {
            mprint!();
        }
    }
}
