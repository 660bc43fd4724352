//! TCP connect probing.
//!
//! A probe completes a full handshake with the target port. When the port is
//! covered by the [`BannerPolicy`] it then waits once, for at most the same
//! timeout, for whatever the service sends on its own.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use portscout_common::config::{BannerPolicy, ScanConfig};
use portscout_common::error::ScanError;
use portscout_common::scan::ScanResult;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use crate::scanner::{ProbeOutcome, Prober};
use crate::services;

const BANNER_READ_SIZE: usize = 1024;
const TRUNCATION_MARKER: &str = "...";

/// The real network [`Prober`].
#[derive(Debug, Clone)]
pub struct TcpProber {
    probe_timeout: Duration,
    banner: BannerPolicy,
}

impl TcpProber {
    pub fn new(probe_timeout: Duration, banner: BannerPolicy) -> Self {
        Self {
            probe_timeout,
            banner,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.timeout, config.banner.clone())
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, host: IpAddr, port: u16) -> Result<ProbeOutcome, ScanError> {
        if port == 0 {
            return Err(ScanError::InvalidPortSelection(
                "port 0 cannot be probed".into(),
            ));
        }

        let socket_addr: SocketAddr = SocketAddr::new(host, port);
        let Some(mut stream) = handshake_probe(socket_addr, self.probe_timeout).await else {
            return Ok(ProbeOutcome::NoResult);
        };

        let banner: Option<String> = if self.banner.applies_to(port) {
            read_banner(&mut stream, self.probe_timeout, self.banner.max_chars).await
        } else {
            None
        };

        let result = ScanResult::open(host, port, services::lookup(port)).with_banner(banner);
        Ok(ProbeOutcome::Open(result))
    }
}

/// Connects to `socket_addr`, giving up after `probe_timeout`.
///
/// Refused, unreachable and timed out connections all come back as `None`.
pub async fn handshake_probe(socket_addr: SocketAddr, probe_timeout: Duration) -> Option<TcpStream> {
    match timeout(probe_timeout, TcpStream::connect(socket_addr)).await {
        Ok(Ok(stream)) => {
            trace!("{socket_addr} accepted the connection");
            Some(stream)
        }
        Ok(Err(e)) => {
            trace!("{socket_addr} rejected the connection: {e}");
            None
        }
        Err(_elapsed) => {
            trace!("{socket_addr} timed out");
            None
        }
    }
}

/// Performs a single read on an established connection.
pub async fn read_banner(
    stream: &mut TcpStream,
    read_timeout: Duration,
    max_chars: usize,
) -> Option<String> {
    let mut buf = [0u8; BANNER_READ_SIZE];
    match timeout(read_timeout, stream.read(&mut buf)).await {
        Ok(Ok(n)) if n > 0 => sanitize_banner(&buf[..n], max_chars),
        _ => None,
    }
}

/// Decodes raw banner bytes for display.
///
/// Invalid UTF-8 is dropped, surrounding whitespace trimmed, and anything
/// past `max_chars` characters replaced by `...`. Returns `None` when nothing
/// printable is left.
pub fn sanitize_banner(bytes: &[u8], max_chars: usize) -> Option<String> {
    let decoded: String = String::from_utf8_lossy(bytes).replace(char::REPLACEMENT_CHARACTER, "");
    let trimmed: &str = decoded.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.chars().count() > max_chars {
        let mut truncated: String = trimmed.chars().take(max_chars).collect();
        truncated.push_str(TRUNCATION_MARKER);
        return Some(truncated);
    }

    Some(trimmed.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
