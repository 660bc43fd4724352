//! Target expansion: from user input to the hosts a scan will touch.

use portscout_common::error::ScanError;
use portscout_common::network::range::HostBlock;
use portscout_common::network::target::ScanTarget;
use portscout_common::warn;

/// Blocks with more usable hosts than this get a warning before the scan
/// starts. A /24 (254 hosts) stays quiet.
pub const LARGE_SCAN_HOSTS: u128 = 254;

/// Parses and expands a target string such as `10.0.0.5` or `10.0.0.0/24`.
pub fn expand(target: &str) -> Result<HostBlock, ScanError> {
    let target: ScanTarget = target.parse()?;
    expand_target(&target)
}

/// Expands an already parsed target.
///
/// Large blocks are allowed, they are only reported.
pub fn expand_target(target: &ScanTarget) -> Result<HostBlock, ScanError> {
    let hosts: HostBlock = target.expand()?;
    let count: u128 = hosts.len();
    if count > LARGE_SCAN_HOSTS {
        warn!("Large network ({count} hosts). This may take a while...");
    }
    Ok(hosts)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
