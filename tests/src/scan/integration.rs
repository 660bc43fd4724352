#![cfg(test)]
use std::collections::BTreeSet;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use portscout_common::config::{BannerPolicy, ScanConfig};
use portscout_common::network::port::PortSelection;
use portscout_common::scan::{HostScanOutcome, NetworkScanOutcome};
use portscout_core::PortScanner;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Binds an ephemeral port and answers every connection with `greeting`.
async fn greeting_listener(greeting: Option<String>) -> anyhow::Result<u16> {
    let listener: TcpListener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let port: u16 = listener.local_addr()?.port();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let greeting = greeting.clone();
            tokio::spawn(async move {
                if let Some(text) = greeting {
                    let _ = stream.write_all(text.as_bytes()).await;
                }
                tokio::time::sleep(Duration::from_secs(2)).await;
            });
        }
    });

    Ok(port)
}

/// A port that was just released, so nothing listens on it.
async fn closed_port() -> anyhow::Result<u16> {
    let listener: TcpListener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    Ok(listener.local_addr()?.port())
}

fn config(banner_ports: &[u16]) -> ScanConfig {
    ScanConfig::default()
        .with_timeout(Duration::from_millis(500))
        .with_banner(BannerPolicy {
            ports: banner_ports.iter().copied().collect::<BTreeSet<u16>>(),
            max_chars: 100,
        })
}

#[tokio::test]
async fn open_and_closed_ports_on_loopback() -> anyhow::Result<()> {
    let open: u16 = greeting_listener(None).await?;
    let closed: u16 = closed_port().await?;

    let scanner: PortScanner = PortScanner::new(config(&[]))?;
    let outcome: NetworkScanOutcome = scanner
        .scan("127.0.0.1", &PortSelection::Explicit(vec![open, closed]))
        .await?;

    assert_eq!(outcome.len(), 1);
    let host: &HostScanOutcome = outcome.get(&LOCALHOST).expect("localhost missing");
    assert_eq!(host.ports(), vec![open]);
    assert!(host.results()[0].banner.is_none());
    Ok(())
}

#[tokio::test]
async fn banner_is_captured_and_trimmed() -> anyhow::Result<()> {
    let port: u16 = greeting_listener(Some("220 portscout test FTP ready\r\n".to_string())).await?;

    let scanner: PortScanner = PortScanner::new(config(&[port]))?;
    let outcome = scanner
        .scan("127.0.0.1", &PortSelection::Explicit(vec![port]))
        .await?;

    let result = &outcome.get(&LOCALHOST).expect("localhost missing").results()[0];
    assert_eq!(result.banner.as_deref(), Some("220 portscout test FTP ready"));
    Ok(())
}

#[tokio::test]
async fn long_banner_is_truncated() -> anyhow::Result<()> {
    let port: u16 = greeting_listener(Some("x".repeat(300))).await?;

    let scanner: PortScanner = PortScanner::new(config(&[port]))?;
    let outcome = scanner
        .scan("127.0.0.1", &PortSelection::Explicit(vec![port]))
        .await?;

    let banner: String = outcome.get(&LOCALHOST).expect("localhost missing").results()[0]
        .banner
        .clone()
        .expect("banner missing");
    assert_eq!(banner, format!("{}...", "x".repeat(100)));
    Ok(())
}

#[tokio::test]
async fn silent_service_is_open_without_banner() -> anyhow::Result<()> {
    let port: u16 = greeting_listener(None).await?;

    let scanner: PortScanner = PortScanner::new(config(&[port]))?;
    let outcome = scanner
        .scan("127.0.0.1", &PortSelection::Explicit(vec![port]))
        .await?;

    let host = outcome.get(&LOCALHOST).expect("localhost missing");
    assert_eq!(host.ports(), vec![port]);
    assert!(host.results()[0].banner.is_none());
    Ok(())
}

#[tokio::test]
async fn single_address_block_scans_one_host() -> anyhow::Result<()> {
    let port: u16 = greeting_listener(None).await?;

    let scanner: PortScanner = PortScanner::new(config(&[]))?;
    let outcome = scanner
        .scan("127.0.0.1/32", &PortSelection::Explicit(vec![port]))
        .await?;

    assert_eq!(outcome.hosts().copied().collect::<Vec<IpAddr>>(), vec![LOCALHOST]);
    Ok(())
}

#[tokio::test]
async fn block_scan_reports_only_listening_hosts() -> anyhow::Result<()> {
    let port: u16 = greeting_listener(None).await?;

    let scanner: PortScanner = PortScanner::new(config(&[]))?;
    let outcome = scanner
        .scan("127.0.0.0/30", &PortSelection::Explicit(vec![port]))
        .await?;

    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.total_open_ports(), 1);
    assert!(outcome.get(&LOCALHOST).is_some());
    Ok(())
}

#[tokio::test]
async fn nothing_listening_is_an_empty_success() -> anyhow::Result<()> {
    let closed: u16 = closed_port().await?;

    let scanner: PortScanner = PortScanner::new(config(&[]))?;
    let outcome = scanner
        .scan("127.0.0.1", &PortSelection::Explicit(vec![closed]))
        .await?;

    assert!(outcome.is_empty());
    Ok(())
}

#[tokio::test]
async fn invalid_target_fails_before_probing() {
    let scanner = PortScanner::new(config(&[])).unwrap();
    assert!(scanner.scan("not-an-ip", &PortSelection::Common).await.is_err());
}
