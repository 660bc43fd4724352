//! # Scan Target Model
//!
//! Defines the possible inputs for a port scan.
//!
//! A target is either:
//! * A single IPv4/IPv6 address (e.g., `10.0.0.5`).
//! * A CIDR block (e.g., `192.168.1.0/24`, `fd00::/120`).
//!
//! Hostnames are rejected on purpose: parsing never touches the network.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::ScanError;
use crate::network::range::HostBlock;

/// Represents a distinct target to be scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanTarget {
    /// Scan a single specific host.
    Host { addr: IpAddr },
    /// Scan every usable host of a network block.
    Block { addr: IpAddr, prefix: u8 },
}

impl ScanTarget {
    /// Expands the target into the hosts that will be probed.
    pub fn expand(&self) -> Result<HostBlock, ScanError> {
        match *self {
            ScanTarget::Host { addr } => Ok(HostBlock::single(addr)),
            ScanTarget::Block {
                addr: IpAddr::V4(v4),
                prefix,
            } => HostBlock::ipv4(v4, prefix),
            ScanTarget::Block {
                addr: IpAddr::V6(v6),
                prefix,
            } => HostBlock::ipv6(v6, prefix),
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(self, ScanTarget::Block { .. })
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanTarget::Host { addr } => write!(f, "{addr}"),
            ScanTarget::Block { addr, prefix } => write!(f, "{addr}/{prefix}"),
        }
    }
}

impl FromStr for ScanTarget {
    type Err = ScanError;

    /// Parses a string into a `ScanTarget`.
    ///
    /// Supported formats:
    /// * **Host**: Single IPv4/IPv6 address (e.g., "192.168.1.5", "::1").
    /// * **CIDR**: "Network/Prefix" (e.g., "192.168.1.0/24").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(target) = parse_host(s) {
            return Ok(target);
        }

        if let Some(target) = parse_cidr(s)? {
            return Ok(target);
        }

        Err(ScanError::InvalidTargetFormat(format!(
            "'{s}' is neither an IP address nor an address/prefix block"
        )))
    }
}

/// Parses a single IP address.
fn parse_host(s: &str) -> Option<ScanTarget> {
    s.parse::<IpAddr>()
        .ok()
        .map(|addr| ScanTarget::Host { addr })
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr(s: &str) -> Result<Option<ScanTarget>, ScanError> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let addr = ip_str
        .parse::<IpAddr>()
        .map_err(|e| ScanError::InvalidTargetFormat(format!("invalid IP in CIDR '{ip_str}': {e}")))?;

    let prefix = prefix_str.parse::<u8>().map_err(|e| {
        ScanError::InvalidTargetFormat(format!("invalid prefix in CIDR '{prefix_str}': {e}"))
    })?;

    let max_prefix: u8 = if addr.is_ipv4() { 32 } else { 128 };
    if prefix > max_prefix {
        return Err(ScanError::InvalidTargetFormat(format!(
            "prefix /{prefix} is longer than /{max_prefix}"
        )));
    }

    Ok(Some(ScanTarget::Block { addr, prefix }))
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

    #[test]
    fn test_from_str_full_parsing() {
        assert!(matches!(
            ScanTarget::from_str("1.1.1.1"),
            Ok(ScanTarget::Host { .. })
        ));
        assert!(matches!(ScanTarget::from_str("::1"), Ok(ScanTarget::Host { .. })));
        assert!(matches!(
            ScanTarget::from_str(" 10.0.0.5 "),
            Ok(ScanTarget::Host { .. })
        ));

        assert_eq!(
            ScanTarget::from_str("10.0.0.0/24"),
            Ok(ScanTarget::Block {
                addr: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)),
                prefix: 24
            })
        );
        assert!(matches!(
            ScanTarget::from_str("fd00::/120"),
            Ok(ScanTarget::Block { prefix: 120, .. })
        ));
    }

    #[test]
    fn test_from_str_invalid() {
        for bad in [
            "not-an-ip",
            "",
            "example.com",
            "10.0.0.1/33",
            "10.0.0.256",
            "10.0.0.0/",
            "/24",
            "10.0.0.0/abc",
            "fd00::/129",
            "10.0.0.1-50",
        ] {
            assert!(
                matches!(ScanTarget::from_str(bad), Err(ScanError::InvalidTargetFormat(_))),
                "'{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn expand_counts() {
        let single: ScanTarget = "10.0.0.5".parse().unwrap();
        assert_eq!(single.expand().unwrap().len(), 1);

        let slash_32: ScanTarget = "10.0.0.5/32".parse().unwrap();
        assert_eq!(slash_32.expand().unwrap().len(), 1);

        let slash_30: ScanTarget = "10.0.0.0/30".parse().unwrap();
        assert_eq!(slash_30.expand().unwrap().len(), 2);

        let v6: ScanTarget = "fd00::/120".parse().unwrap();
        assert_eq!(v6.expand().unwrap().len(), 255);
    }

    #[test]
    fn display_round_trips_the_input_shape() {
        let block: ScanTarget = "192.168.1.0/24".parse().unwrap();
        assert_eq!(block.to_string(), "192.168.1.0/24");
        assert!(block.is_block());

        let host: ScanTarget = "10.0.0.5".parse().unwrap();
        assert_eq!(host.to_string(), "10.0.0.5");
        assert!(!host.is_block());
    }
}
