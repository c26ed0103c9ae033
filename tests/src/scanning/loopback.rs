#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use modscan_common::modbus::{Method, UnitId};
use modscan_common::network::attachment::NetworkAttachment;
use modscan_common::network::blacklist::Blacklist;
use modscan_common::network::interface::InterfaceEnumerator;
use modscan_core::{ModbusProbeEngine, NetScanner, ProfileRegistry};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::fakes::StaticNetworks;

const SUNSPEC_BASE: u16 = 40000;

/// Minimal Modbus TCP server: "SunS" at the SunSpec base, an illegal data
/// address exception for anything else.
async fn sunspec_stub() -> anyhow::Result<u16> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let port = listener.local_addr()?.port();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(serve(stream));
        }
    });

    Ok(port)
}

async fn serve(mut stream: TcpStream) {
    let mut request = [0u8; 12];
    while stream.read_exact(&mut request).await.is_ok() {
        let address = u16::from_be_bytes([request[8], request[9]]);
        let (tid, unit, function) = ([request[0], request[1]], request[6], request[7]);

        let response: Vec<u8> = if function == 0x03 && address == SUNSPEC_BASE {
            vec![tid[0], tid[1], 0, 0, 0, 7, unit, 0x03, 4, 0x53, 0x75, 0x6E, 0x53]
        } else {
            vec![tid[0], tid[1], 0, 0, 0, 3, unit, function | 0x80, 0x02]
        };

        if stream.write_all(&response).await.is_err() {
            break;
        }
    }
}

#[tokio::test]
async fn loopback_sunspec_device_is_identified() -> anyhow::Result<()> {
    let port = sunspec_stub().await?;

    // 127.0.0.0/30 seen from .2 leaves exactly one host to probe: the stub.
    let loopback = NetworkAttachment::new("lo", Ipv4Addr::new(127, 0, 0, 2), 30)?;
    let engine = Arc::new(ModbusProbeEngine::new(ProfileRegistry::builtin(), Duration::from_millis(500)));
    let scanner = NetScanner::new(
        engine,
        Arc::new(StaticNetworks(vec![loopback])),
        Method::Tcp,
        port,
        UnitId::new(3)?,
        Blacklist::new(),
    )?;

    assert!(scanner.start());
    assert_eq!(scanner.total(), 1);
    tokio::time::timeout(Duration::from_secs(10), scanner.join()).await?;

    let devices = scanner.devices();
    assert_eq!(scanner.done(), 1);
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].vendor, "SunSpec");
    assert_eq!(devices[0].unit(), UnitId::new(3)?);
    assert!(devices[0].timeout >= Duration::from_millis(500));
    Ok(())
}

/// Scans the real local networks; needs a LAN and takes a while.
#[tokio::test]
#[ignore]
async fn local_networks_scan_to_completion() {
    let engine = Arc::new(ModbusProbeEngine::default());
    let scanner = NetScanner::new(
        engine,
        Arc::new(InterfaceEnumerator),
        Method::Tcp,
        502,
        UnitId::new(1).unwrap(),
        Blacklist::new(),
    )
    .unwrap();

    if !scanner.start() {
        return;
    }
    scanner.join().await;

    assert_eq!(scanner.running(), Some(false));
    assert!(scanner.done() > 0);
}
