//! # Scan Results
//!
//! What a finished scan hands back to its caller.
//!
//! Only open ports are ever materialised. A closed or filtered port leaves no
//! trace, and a host without open ports is not part of the outcome at all.

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    Open,
}

impl PortStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortStatus::Open => "open",
        }
    }
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One port on which a TCP connection was established.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub host: IpAddr,
    pub port: u16,
    pub status: PortStatus,
    /// Catalog name of the service, `"Unknown"` if the port is not listed.
    pub service: String,
    pub banner: Option<String>,
}

impl ScanResult {
    pub fn open(host: IpAddr, port: u16, service: impl Into<String>) -> Self {
        Self {
            host,
            port,
            status: PortStatus::Open,
            service: service.into(),
            banner: None,
        }
    }

    pub fn with_banner(mut self, banner: Option<String>) -> Self {
        self.banner = banner;
        self
    }
}

/// Open ports of a single host, strictly ascending by port number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HostScanOutcome {
    results: Vec<ScanResult>,
}

impl HostScanOutcome {
    /// Sorts the results by port (stable) and keeps the first result seen
    /// for any repeated port.
    pub fn from_results(mut results: Vec<ScanResult>) -> Self {
        results.sort_by_key(|result| result.port);
        results.dedup_by_key(|result| result.port);
        Self { results }
    }

    pub fn results(&self) -> &[ScanResult] {
        &self.results
    }

    pub fn ports(&self) -> Vec<u16> {
        self.results.iter().map(|result| result.port).collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScanResult> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a HostScanOutcome {
    type Item = &'a ScanResult;
    type IntoIter = std::slice::Iter<'a, ScanResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Every host with at least one open port, ordered by address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NetworkScanOutcome {
    hosts: BTreeMap<IpAddr, HostScanOutcome>,
}

impl NetworkScanOutcome {
    /// Adds a host. Empty outcomes are ignored so that hosts without open
    /// ports never show up.
    pub fn insert(&mut self, host: IpAddr, outcome: HostScanOutcome) {
        if !outcome.is_empty() {
            self.hosts.insert(host, outcome);
        }
    }

    pub fn get(&self, host: &IpAddr) -> Option<&HostScanOutcome> {
        self.hosts.get(host)
    }

    pub fn hosts(&self) -> impl Iterator<Item = &IpAddr> {
        self.hosts.keys()
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, IpAddr, HostScanOutcome> {
        self.hosts.iter()
    }

    /// Number of hosts with open ports.
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn total_open_ports(&self) -> usize {
        self.hosts.values().map(HostScanOutcome::len).sum()
    }
}

impl<'a> IntoIterator for &'a NetworkScanOutcome {
    type Item = (&'a IpAddr, &'a HostScanOutcome);
    type IntoIter = std::collections::btree_map::Iter<'a, IpAddr, HostScanOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn host() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5))
    }

    #[test]
    fn host_outcome_sorts_and_deduplicates() {
        let outcome = HostScanOutcome::from_results(vec![
            ScanResult::open(host(), 443, "HTTPS"),
            ScanResult::open(host(), 22, "SSH").with_banner(Some("SSH-2.0".into())),
            ScanResult::open(host(), 22, "SSH"),
            ScanResult::open(host(), 80, "HTTP"),
        ]);

        assert_eq!(outcome.ports(), vec![22, 80, 443]);
        assert_eq!(outcome.results()[0].banner.as_deref(), Some("SSH-2.0"));
    }

    #[test]
    fn network_outcome_skips_empty_hosts() {
        let mut outcome = NetworkScanOutcome::default();
        outcome.insert(host(), HostScanOutcome::default());
        assert!(outcome.is_empty());

        outcome.insert(
            host(),
            HostScanOutcome::from_results(vec![ScanResult::open(host(), 80, "HTTP")]),
        );
        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.total_open_ports(), 1);
    }

    #[test]
    fn network_outcome_iterates_in_address_order() {
        let mut outcome = NetworkScanOutcome::default();
        for last in [9, 2, 5] {
            let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, last));
            outcome.insert(ip, HostScanOutcome::from_results(vec![ScanResult::open(ip, 80, "HTTP")]));
        }
        let order: Vec<String> = outcome.hosts().map(ToString::to_string).collect();
        assert_eq!(order, vec!["10.0.0.2", "10.0.0.5", "10.0.0.9"]);
    }

    #[test]
    fn serializes_as_host_map() {
        let mut outcome = NetworkScanOutcome::default();
        outcome.insert(
            host(),
            HostScanOutcome::from_results(vec![ScanResult::open(host(), 22, "SSH")]),
        );

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["10.0.0.5"][0]["port"], 22);
        assert_eq!(json["10.0.0.5"][0]["status"], "open");
        assert_eq!(json["10.0.0.5"][0]["service"], "SSH");
        assert!(json["10.0.0.5"][0]["banner"].is_null());
    }
}
