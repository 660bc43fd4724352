//! The central **abstraction** for port scanning.
//!
//! [`PortScanner`] is the coordinator: it expands the target, resolves the
//! port selection and then runs one [`Prober`] call per (host, port) pair.
//!
//! Work is bounded on two axes at once. At most `max_concurrent_hosts` hosts
//! are in progress, and each of them has at most `max_concurrent_ports` probes
//! in flight. A permit is taken *before* a task is spawned, so a /16 never
//! turns into 65k idle tasks and the number of open sockets never exceeds
//! `hosts × ports`.
//!
//! **Architectural Note:**
//! The coordinator only knows the [`Prober`] trait. The TCP implementation
//! lives in [`crate::network::tcp`]; tests plug in their own transports.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use portscout_common::config::ScanConfig;
use portscout_common::error::ScanError;
use portscout_common::network::port::PortSelection;
use portscout_common::network::range::HostBlock;
use portscout_common::network::target::ScanTarget;
use portscout_common::scan::{NetworkScanOutcome, ScanResult};
use portscout_common::{success, warn};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::debug;

use crate::expand;
use crate::network::tcp::TcpProber;

pub mod aggregate;

/// What a single probe found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A connection was established.
    Open(ScanResult),
    /// Closed, filtered, timed out or otherwise unreachable. These cannot be
    /// told apart and are all treated alike.
    NoResult,
}

/// Defines the strategy for probing transport-layer ports to identify active services.
///
/// Ordinary network conditions must come back as [`ProbeOutcome::NoResult`].
/// An `Err` is reserved for configuration faults and aborts the whole scan.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, host: IpAddr, port: u16) -> Result<ProbeOutcome, ScanError>;
}

/// Lifecycle of one scan invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Expanding,
    Probing,
    Aggregating,
    Done,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Idle => "idle",
            ScanPhase::Expanding => "expanding",
            ScanPhase::Probing => "probing",
            ScanPhase::Aggregating => "aggregating",
            ScanPhase::Done => "done",
        };
        f.write_str(name)
    }
}

type OpenPortCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Coordinates a connect scan over a whole target.
pub struct PortScanner {
    prober: Arc<dyn Prober>,
    config: ScanConfig,
    on_open_port: Option<OpenPortCallback>,
}

impl PortScanner {
    /// A scanner probing the real network with a [`TcpProber`].
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let prober = Arc::new(TcpProber::from_config(&config));
        Self::with_prober(config, prober)
    }

    /// A scanner using a custom transport.
    pub fn with_prober(config: ScanConfig, prober: Arc<dyn Prober>) -> Result<Self, ScanError> {
        config.validate()?;
        Ok(Self {
            prober,
            config,
            on_open_port: None,
        })
    }

    /// Registers a callback invoked with the running number of open ports
    /// every time a new one is found.
    pub fn on_open_port<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_open_port = Some(Arc::new(callback));
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Parses `target` and scans it. See [`PortScanner::scan_target`].
    pub async fn scan(
        &self,
        target: &str,
        selection: &PortSelection,
    ) -> Result<NetworkScanOutcome, ScanError> {
        let target: ScanTarget = target.parse()?;
        self.scan_target(&target, selection).await
    }

    /// Probes every selected port on every host of `target`.
    ///
    /// Fails only on an invalid target or port selection, both reported
    /// before any connection is attempted. A scan that finds nothing returns
    /// an empty outcome.
    pub async fn scan_target(
        &self,
        target: &ScanTarget,
        selection: &PortSelection,
    ) -> Result<NetworkScanOutcome, ScanError> {
        debug!(phase = %ScanPhase::Idle, %target, "scan requested");

        debug!(phase = %ScanPhase::Expanding, "expanding {target}");
        let hosts: HostBlock = expand::expand_target(target)?;
        let ports: Arc<[u16]> = selection.resolve()?.into();

        debug!(
            phase = %ScanPhase::Probing,
            hosts = %hosts.len(),
            ports = ports.len(),
            "probing {selection}"
        );
        let context = Arc::new(ScanContext {
            prober: self.prober.clone(),
            ports,
            max_concurrent_ports: self.config.max_concurrent_ports,
            open_ports: AtomicUsize::new(0),
            on_open_port: self.on_open_port.clone(),
        });

        let completed: Vec<(IpAddr, Vec<ScanResult>)> = if hosts.is_single() {
            let host: IpAddr = hosts.first();
            let results: Vec<ScanResult> = probe_host(context, host).await?;
            vec![(host, results)]
        } else {
            probe_block(context, hosts, self.config.max_concurrent_hosts).await?
        };

        debug!(phase = %ScanPhase::Aggregating, hosts = completed.len());
        let outcome: NetworkScanOutcome = aggregate::fold(completed);

        debug!(
            phase = %ScanPhase::Done,
            hosts = outcome.len(),
            open_ports = outcome.total_open_ports()
        );
        Ok(outcome)
    }
}

/// Read-only state shared by every task of one scan.
struct ScanContext {
    prober: Arc<dyn Prober>,
    ports: Arc<[u16]>,
    max_concurrent_ports: usize,
    open_ports: AtomicUsize,
    on_open_port: Option<OpenPortCallback>,
}

impl ScanContext {
    fn absorb(
        &self,
        host: IpAddr,
        joined: Result<Result<ProbeOutcome, ScanError>, JoinError>,
        open: &mut Vec<ScanResult>,
    ) -> Result<(), ScanError> {
        match joined {
            Ok(Ok(ProbeOutcome::Open(result))) => {
                let total: usize = self.open_ports.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(callback) = &self.on_open_port {
                    callback(total);
                }
                open.push(result);
            }
            Ok(Ok(ProbeOutcome::NoResult)) => {}
            Ok(Err(e)) => return Err(e),
            Err(e) => warn!("Probe task against {host} died: {e}"),
        }
        Ok(())
    }
}

/// Probes every port of one host, at most `max_concurrent_ports` at a time.
///
/// Results come back in completion order.
async fn probe_host(context: Arc<ScanContext>, host: IpAddr) -> Result<Vec<ScanResult>, ScanError> {
    let permits = Arc::new(Semaphore::new(context.max_concurrent_ports));
    let mut probes: JoinSet<Result<ProbeOutcome, ScanError>> = JoinSet::new();
    let mut open: Vec<ScanResult> = Vec::new();

    for &port in context.ports.iter() {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let prober = context.prober.clone();
        probes.spawn(async move {
            let outcome = prober.probe(host, port).await;
            drop(permit);
            outcome
        });

        while let Some(joined) = probes.try_join_next() {
            context.absorb(host, joined, &mut open)?;
        }
    }

    while let Some(joined) = probes.join_next().await {
        context.absorb(host, joined, &mut open)?;
    }

    Ok(open)
}

/// Probes every host of a block, at most `max_concurrent_hosts` at a time.
async fn probe_block(
    context: Arc<ScanContext>,
    hosts: HostBlock,
    max_concurrent_hosts: usize,
) -> Result<Vec<(IpAddr, Vec<ScanResult>)>, ScanError> {
    let permits = Arc::new(Semaphore::new(max_concurrent_hosts));
    let mut jobs: JoinSet<(IpAddr, Result<Vec<ScanResult>, ScanError>)> = JoinSet::new();
    let mut completed: Vec<(IpAddr, Vec<ScanResult>)> = Vec::new();

    for host in hosts.iter() {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let context = context.clone();
        jobs.spawn(async move {
            let results = probe_host(context, host).await;
            drop(permit);
            (host, results)
        });

        while let Some(joined) = jobs.try_join_next() {
            absorb_host(joined, &mut completed)?;
        }
    }

    while let Some(joined) = jobs.join_next().await {
        absorb_host(joined, &mut completed)?;
    }

    Ok(completed)
}

fn absorb_host(
    joined: Result<(IpAddr, Result<Vec<ScanResult>, ScanError>), JoinError>,
    completed: &mut Vec<(IpAddr, Vec<ScanResult>)>,
) -> Result<(), ScanError> {
    match joined {
        Ok((host, Ok(results))) => {
            if !results.is_empty() {
                let mut ports: Vec<u16> = results.iter().map(|r| r.port).collect();
                ports.sort_unstable();
                success!("Found open ports on {host}: {ports:?}");
                completed.push((host, results));
            }
        }
        Ok((_, Err(e))) => return Err(e),
        Err(e) => warn!("Host scan task died: {e}"),
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
