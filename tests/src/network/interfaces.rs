#![cfg(test)]
use std::net::Ipv4Addr;

use modscan_common::network::attachment::NetworkAttachment;
use modscan_common::network::blacklist::Blacklist;
use modscan_common::network::interface::collect_attachments;
use pnet::datalink::{MacAddr, NetworkInterface};

use super::util::{ni, v4, v6};

/*************************************************************
                 Tests for attachment selection
**************************************************************/

#[test]
fn workstation_yields_every_ipv4_subnet() {
    let attachments: Vec<NetworkAttachment> = collect_attachments(&iface_all(), &Blacklist::new());
    let names: Vec<&str> = attachments.iter().map(|a| a.interface.as_str()).collect();

    assert_eq!(names, vec!["enp9s0", "tun0", "wlan0", "eth1", "docker0", "br0"]);
    assert_eq!(attachments[0].address, Ipv4Addr::new(192, 168, 0, 32));
    assert_eq!(attachments[0].scan_size(), 253);
}

#[test]
fn loopback_and_ipv6_only_interfaces_are_ignored() {
    let interfaces: Vec<NetworkInterface> = vec![lo(), ipv6leakintrf0(), veth1234()];
    let attachments = collect_attachments(&interfaces, &Blacklist::new());
    assert!(attachments.is_empty(), "Expected no attachment, received: {attachments:?}");
}

#[test]
fn blacklist_drops_names_and_blocks() {
    let blacklist: Blacklist = "docker0, 10.0.0.0/8".parse().unwrap();
    let attachments = collect_attachments(&iface_all(), &blacklist);
    let names: Vec<&str> = attachments.iter().map(|a| a.interface.as_str()).collect();

    assert_eq!(names, vec!["enp9s0", "wlan0", "br0"]);
}

#[test]
fn down_interfaces_are_skipped() {
    let mut eth = eth1();
    eth.flags = 0;
    let attachments = collect_attachments(&[eth, wlan0()], &Blacklist::new());

    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].interface, "wlan0");
}

#[test]
fn bridged_duplicate_subnet_is_scanned_once() {
    let bridge = ni("br1", 10, None, &[v4(192, 168, 1, 2, 24)], 69699);
    let attachments = collect_attachments(&[wlan0(), bridge], &Blacklist::new());

    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].interface, "wlan0");
}

/*************************************************************
                  Mock interfaces for testing
**************************************************************/

fn iface_all() -> Vec<NetworkInterface> {
    vec![
        lo(),
        enp9s0(),
        tun0(),
        ipv6leakintrf0(),
        wlan0(),
        eth1(),
        docker0(),
        veth1234(),
        br0(),
    ]
}

fn lo() -> NetworkInterface {
    ni(
        "lo",
        1,
        Some(MacAddr::new(0, 0, 0, 0, 0, 0)),
        &[v4(127, 0, 0, 1, 8), v6("::1", 128)],
        65609,
    )
}

fn enp9s0() -> NetworkInterface {
    ni(
        "enp9s0",
        2,
        Some(MacAddr::new(0xa8, 0xa1, 0x59, 0x13, 0x41, 0x46)),
        &[
            v4(192, 168, 0, 32, 24),
            v6("2a02:908:8c1:b880::b054", 128),
            v6("fe80::b3dd:5c39:7c29:48b6", 64),
        ],
        69699,
    )
}

fn tun0() -> NetworkInterface {
    ni(
        "tun0",
        5,
        None,
        &[v4(10, 96, 0, 57, 16), v6("fe80::c137:8964:5a63:efde", 64)],
        69841,
    )
}

fn ipv6leakintrf0() -> NetworkInterface {
    ni(
        "ipv6leakintrf0",
        6,
        Some(MacAddr::new(0xd2, 0x25, 0xd4, 0x9f, 0x18, 0xfd)),
        &[v6("fdeb:446c:912d:8da::", 64), v6("fe80::7f87:ff4a:9ad8:d2f0", 64)],
        65731,
    )
}

fn wlan0() -> NetworkInterface {
    ni(
        "wlan0",
        3,
        Some(MacAddr::new(0x34, 0xcf, 0xf6, 0x9a, 0x11, 0x22)),
        &[v4(192, 168, 1, 42, 24), v6("fe80::36cf:f6ff:fe9a:1122", 64)],
        69699,
    )
}

fn eth1() -> NetworkInterface {
    ni(
        "eth1",
        4,
        Some(MacAddr::new(0x52, 0x54, 0x00, 0x12, 0x34, 0x56)),
        &[v4(10, 0, 0, 15, 24)],
        69699,
    )
}

fn docker0() -> NetworkInterface {
    ni(
        "docker0",
        7,
        Some(MacAddr::new(0x02, 0x42, 0xac, 0x11, 0x00, 0x01)),
        &[v4(172, 17, 0, 1, 16)],
        69699,
    )
}

fn veth1234() -> NetworkInterface {
    ni(
        "veth1234",
        8,
        Some(MacAddr::new(0x1a, 0x2b, 0x3c, 0x4d, 0x5e, 0x6f)),
        &[v6("fe80::1a2b:3cff:fe4d:5e6f", 64)],
        69699,
    )
}

fn br0() -> NetworkInterface {
    ni(
        "br0",
        9,
        Some(MacAddr::new(0xde, 0xad, 0xbe, 0xef, 0x00, 0x01)),
        &[v4(192, 168, 100, 1, 24), v6("fd00:dead:beef::1", 64)],
        69699,
    )
}
