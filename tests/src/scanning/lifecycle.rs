#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use modscan_common::modbus::{Method, UnitId};
use modscan_common::network::attachment::NetworkAttachment;
use modscan_common::network::blacklist::Blacklist;
use modscan_common::target::ProbeTarget;
use modscan_core::{NetScanner, ScanSnapshot};

use crate::fakes::{ScriptedEngine, StaticNetworks};

fn host_of(target: &ProbeTarget) -> Ipv4Addr {
    match target {
        ProbeTarget::Network(net) => net.host,
        ProbeTarget::Serial(serial) => panic!("unexpected serial target {}", serial.device),
    }
}

fn net_scanner(engine: Arc<ScriptedEngine>, networks: Vec<NetworkAttachment>) -> NetScanner {
    NetScanner::new(
        engine,
        Arc::new(StaticNetworks(networks)),
        Method::Tcp,
        502,
        UnitId::new(1).unwrap(),
        Blacklist::new(),
    )
    .unwrap()
}

fn office_lan() -> NetworkAttachment {
    NetworkAttachment::new("eth0", Ipv4Addr::new(192, 168, 10, 5), 24).unwrap()
}

/// One /24 with three responding hosts.
#[tokio::test]
async fn class_c_scan_finds_three_devices() {
    let responding = [Ipv4Addr::new(192, 168, 10, 2), Ipv4Addr::new(192, 168, 10, 50), Ipv4Addr::new(192, 168, 10, 254)];
    let engine = Arc::new(ScriptedEngine::new(&[1], move |t| responding.contains(&host_of(t))));
    let scanner = net_scanner(engine, vec![office_lan()]);

    assert_eq!(scanner.running(), None);
    assert!(scanner.start());
    scanner.join().await;

    let snapshot: ScanSnapshot = scanner.snapshot();
    assert_eq!(snapshot.total, 253);
    assert_eq!(snapshot.done, 253);
    assert_eq!(snapshot.devices.len(), 3);
    assert_eq!(snapshot.running, Some(false));
}

#[tokio::test]
async fn polled_state_only_moves_forward() {
    let engine = Arc::new(ScriptedEngine::new(&[1], |t| host_of(t).octets()[3] % 16 == 0).with_delay(Duration::from_millis(1)));
    let small = NetworkAttachment::new("eth0", Ipv4Addr::new(10, 0, 0, 1), 26).unwrap();
    let scanner = net_scanner(engine.clone(), vec![small]);

    assert!(scanner.start());

    let mut last: ScanSnapshot = scanner.snapshot();
    assert_eq!(last.running, Some(true));
    while last.running == Some(true) {
        tokio::time::sleep(Duration::from_millis(2)).await;
        let now = scanner.snapshot();
        assert!(now.done >= last.done, "done went backwards");
        assert!(now.devices.len() >= last.devices.len(), "devices shrank");
        assert!(now.devices.starts_with(&last.devices), "devices were reordered");
        assert_eq!(now.total, last.total, "total changed mid-scan");
        last = now;
    }

    scanner.join().await;
    let issued: usize = engine.batches().iter().map(|b| b.targets.len()).sum();
    assert!(scanner.done() <= issued as u64);
    assert_eq!(scanner.devices().len(), 3);
}

#[tokio::test]
async fn stop_freezes_progress() {
    let engine = Arc::new(ScriptedEngine::new(&[1], |_| true).with_delay(Duration::from_millis(2)));
    let scanner = net_scanner(engine, vec![office_lan()]);

    assert!(scanner.start());
    while scanner.done() < 5 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    scanner.stop();
    let at_stop: u64 = scanner.done();
    assert_eq!(scanner.running(), Some(false));
    scanner.stop();

    scanner.join().await;
    assert!(scanner.done() <= at_stop + 1);
    assert!(scanner.done() < 253);
    assert_eq!(scanner.devices().len() as u64, scanner.done());
}

#[tokio::test]
async fn restart_after_stop_begins_from_zero() {
    let engine = Arc::new(ScriptedEngine::silent(&[1]).with_delay(Duration::from_millis(1)));
    let tiny = NetworkAttachment::new("eth0", Ipv4Addr::new(10, 0, 0, 1), 29).unwrap();
    let scanner = net_scanner(engine.clone(), vec![office_lan(), tiny]);

    assert!(scanner.start());
    while scanner.done() < 3 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    scanner.stop();
    scanner.join().await;

    assert!(scanner.start());
    assert_eq!(scanner.running(), Some(true));
    scanner.join().await;

    assert_eq!(scanner.done(), 253 + 5);
    assert_eq!(scanner.total(), 253 + 5);
    assert_eq!(scanner.running(), Some(false));
}

#[tokio::test]
async fn nothing_to_scan_leaves_scanner_idle() {
    let engine = Arc::new(ScriptedEngine::silent(&[1]));
    let scanner = NetScanner::new(
        engine.clone(),
        Arc::new(StaticNetworks(vec![office_lan()])),
        Method::Tcp,
        502,
        UnitId::new(1).unwrap(),
        "eth0".parse().unwrap(),
    )
    .unwrap();

    assert!(!scanner.start());
    assert_eq!(scanner.running(), None);
    assert!(engine.batches().is_empty());
}
