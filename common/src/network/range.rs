//! # Address Blocks
//!
//! Turns a single address or an `address/prefix` pair into the ordered,
//! finite sequence of hosts that a scan should probe.
//!
//! Blocks are never materialised up front: a [`HostBlock`] only stores its
//! first and last usable address, knows its length, and can be iterated any
//! number of times.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use pnet::ipnetwork::{Ipv4Network, Ipv6Network};

use crate::error::ScanError;

/// Inclusive range of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }
}

/// Creates the range covering an entire IPv4 network, network and broadcast
/// addresses included.
pub fn cidr_range(ip: Ipv4Addr, prefix: u8) -> Result<Ipv4Range, ScanError> {
    let network = Ipv4Network::new(ip, prefix)
        .map_err(|e| ScanError::InvalidTargetFormat(format!("{ip}/{prefix}: {e}")))?;
    Ok(Ipv4Range::new(network.network(), network.broadcast()))
}

/// The usable hosts of one target, in ascending address order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostBlock {
    first: IpAddr,
    last: IpAddr,
}

impl HostBlock {
    /// A block holding exactly one address.
    pub fn single(addr: IpAddr) -> Self {
        Self {
            first: addr,
            last: addr,
        }
    }

    /// Usable hosts of an IPv4 network.
    ///
    /// Network and broadcast addresses are dropped for prefixes up to /30.
    /// A /31 keeps both of its addresses and a /32 is the address itself.
    pub fn ipv4(ip: Ipv4Addr, prefix: u8) -> Result<Self, ScanError> {
        let range: Ipv4Range = cidr_range(ip, prefix)?;
        let mut start: u32 = u32::from(range.start_addr);
        let mut end: u32 = u32::from(range.end_addr);

        if prefix <= 30 {
            start += 1;
            end -= 1;
        }

        Ok(Self {
            first: IpAddr::V4(Ipv4Addr::from(start)),
            last: IpAddr::V4(Ipv4Addr::from(end)),
        })
    }

    /// Usable hosts of an IPv6 network.
    ///
    /// The subnet-router anycast address (the network address) is dropped for
    /// prefixes up to /126. IPv6 has no broadcast address.
    pub fn ipv6(ip: Ipv6Addr, prefix: u8) -> Result<Self, ScanError> {
        let network = Ipv6Network::new(ip, prefix)
            .map_err(|e| ScanError::InvalidTargetFormat(format!("{ip}/{prefix}: {e}")))?;

        let host_mask: u128 = u128::MAX.checked_shr(u32::from(prefix)).unwrap_or(0);
        let mut start: u128 = u128::from(network.network());
        let end: u128 = start | host_mask;

        if prefix <= 126 {
            start += 1;
        }

        Ok(Self {
            first: IpAddr::V6(Ipv6Addr::from(start)),
            last: IpAddr::V6(Ipv6Addr::from(end)),
        })
    }

    pub fn first(&self) -> IpAddr {
        self.first
    }

    pub fn last(&self) -> IpAddr {
        self.last
    }

    /// Number of hosts in the block. Always at least 1.
    pub fn len(&self) -> u128 {
        let (start, end) = self.bounds();
        end - start + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_single(&self) -> bool {
        self.first == self.last
    }

    /// Walks the block from the first to the last usable address.
    pub fn iter(&self) -> Hosts {
        let (next, last) = self.bounds();
        Hosts {
            next,
            last,
            is_v6: self.first.is_ipv6(),
            exhausted: false,
        }
    }

    fn bounds(&self) -> (u128, u128) {
        (to_u128(self.first), to_u128(self.last))
    }
}

impl IntoIterator for &HostBlock {
    type Item = IpAddr;
    type IntoIter = Hosts;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a [`HostBlock`].
#[derive(Debug, Clone)]
pub struct Hosts {
    next: u128,
    last: u128,
    is_v6: bool,
    exhausted: bool,
}

impl Iterator for Hosts {
    type Item = IpAddr;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let current: u128 = self.next;
        if current == self.last {
            self.exhausted = true;
        } else {
            self.next += 1;
        }

        Some(from_u128(current, self.is_v6))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let remaining: u128 = self.last - self.next + 1;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

fn to_u128(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(v4) => u128::from(u32::from(v4)),
        IpAddr::V6(v6) => u128::from(v6),
    }
}

fn from_u128(value: u128, is_v6: bool) -> IpAddr {
    if is_v6 {
        IpAddr::V6(Ipv6Addr::from(value))
    } else {
        // IPv4 blocks never leave the u32 space.
        IpAddr::V4(Ipv4Addr::from(value as u32))
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

    fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(a, b, c, d))
    }

    #[test]
    fn test_cidr_range() {
        let range = cidr_range(Ipv4Addr::new(192, 168, 1, 100), 24).unwrap();
        assert_eq!(range.start_addr, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(range.end_addr, Ipv4Addr::new(192, 168, 1, 255));
    }

    #[test]
    fn test_cidr_range_invalid_prefix() {
        let result = cidr_range(Ipv4Addr::new(192, 168, 1, 1), 33);
        assert!(matches!(result, Err(ScanError::InvalidTargetFormat(_))));
    }

    #[test]
    fn slash_30_has_two_usable_hosts() {
        let block = HostBlock::ipv4(Ipv4Addr::new(10, 0, 0, 0), 30).unwrap();
        let hosts: Vec<IpAddr> = block.iter().collect();
        assert_eq!(hosts, vec![v4(10, 0, 0, 1), v4(10, 0, 0, 2)]);
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn slash_31_keeps_both_addresses() {
        let block = HostBlock::ipv4(Ipv4Addr::new(10, 0, 0, 4), 31).unwrap();
        let hosts: Vec<IpAddr> = block.iter().collect();
        assert_eq!(hosts, vec![v4(10, 0, 0, 4), v4(10, 0, 0, 5)]);
    }

    #[test]
    fn slash_32_is_the_address_itself() {
        let block = HostBlock::ipv4(Ipv4Addr::new(10, 0, 0, 9), 32).unwrap();
        assert_eq!(block.len(), 1);
        assert!(block.is_single());
        assert_eq!(block.iter().collect::<Vec<_>>(), vec![v4(10, 0, 0, 9)]);
    }

    #[test]
    fn host_bits_are_ignored() {
        let a = HostBlock::ipv4(Ipv4Addr::new(10, 0, 0, 7), 30).unwrap();
        let b = HostBlock::ipv4(Ipv4Addr::new(10, 0, 0, 4), 30).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.first(), v4(10, 0, 0, 5));
        assert_eq!(a.last(), v4(10, 0, 0, 6));
    }

    #[test]
    fn slash_24_has_254_hosts_in_order() {
        let block = HostBlock::ipv4(Ipv4Addr::new(192, 168, 1, 0), 24).unwrap();
        assert_eq!(block.len(), 254);

        let hosts: Vec<IpAddr> = block.iter().collect();
        assert_eq!(hosts.len(), 254);
        assert_eq!(hosts[0], v4(192, 168, 1, 1));
        assert_eq!(hosts[253], v4(192, 168, 1, 254));
        assert!(hosts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn slash_0_is_lazy_and_counted() {
        let block = HostBlock::ipv4(Ipv4Addr::new(0, 0, 0, 0), 0).unwrap();
        assert_eq!(block.len(), (1u128 << 32) - 2);
        assert_eq!(block.iter().next(), Some(v4(0, 0, 0, 1)));
    }

    #[test]
    fn iteration_is_restartable() {
        let block = HostBlock::ipv4(Ipv4Addr::new(10, 1, 0, 0), 29).unwrap();
        let first_pass: Vec<IpAddr> = block.iter().collect();
        let second_pass: Vec<IpAddr> = (&block).into_iter().collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), 6);
        assert_eq!(block.iter().size_hint(), (6, Some(6)));
    }

    #[test]
    fn last_ipv4_address_does_not_overflow() {
        let block = HostBlock::ipv4(Ipv4Addr::new(255, 255, 255, 254), 31).unwrap();
        let hosts: Vec<IpAddr> = block.iter().collect();
        assert_eq!(hosts, vec![v4(255, 255, 255, 254), v4(255, 255, 255, 255)]);
    }

    #[test]
    fn ipv6_block_skips_subnet_router_anycast() {
        let block = HostBlock::ipv6("2001:db8::".parse().unwrap(), 126).unwrap();
        let hosts: Vec<IpAddr> = block.iter().collect();
        assert_eq!(hosts.len(), 3);
        assert_eq!(hosts[0], "2001:db8::1".parse::<IpAddr>().unwrap());
        assert_eq!(hosts[2], "2001:db8::3".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn ipv6_small_prefixes() {
        let slash_127 = HostBlock::ipv6("fd00::".parse().unwrap(), 127).unwrap();
        assert_eq!(slash_127.len(), 2);

        let slash_128 = HostBlock::ipv6("fd00::5".parse().unwrap(), 128).unwrap();
        assert_eq!(slash_128.len(), 1);
        assert_eq!(slash_128.first(), "fd00::5".parse::<IpAddr>().unwrap());

        assert!(HostBlock::ipv6("fd00::".parse().unwrap(), 129).is_err());
    }
}
