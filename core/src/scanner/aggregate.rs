//! Folds raw probe completions into a [`NetworkScanOutcome`].

use std::collections::BTreeMap;
use std::net::IpAddr;

use portscout_common::scan::{HostScanOutcome, NetworkScanOutcome, ScanResult};

/// Groups results by host, sorts each host by port and drops hosts without
/// open ports.
///
/// The input may arrive in any order and may mention a host more than once;
/// the output depends only on which (host, port) pairs are present.
pub fn fold<I>(completed: I) -> NetworkScanOutcome
where
    I: IntoIterator<Item = (IpAddr, Vec<ScanResult>)>,
{
    let mut grouped: BTreeMap<IpAddr, Vec<ScanResult>> = BTreeMap::new();
    for (host, results) in completed {
        grouped.entry(host).or_default().extend(results);
    }

    let mut outcome = NetworkScanOutcome::default();
    for (host, results) in grouped {
        outcome.insert(host, HostScanOutcome::from_results(results));
    }
    outcome
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
