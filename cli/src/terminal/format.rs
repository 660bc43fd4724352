use std::net::{IpAddr, Ipv6Addr};

use colored::*;
use portscout_common::scan::ScanResult;

use crate::terminal::colors;

type Detail = (String, ColoredString);

const BANNER_PREVIEW_CHARS: usize = 48;

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    let first_byte: u8 = ipv6_addr.octets()[0];
    if (0x20..=0x3F).contains(&first_byte) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

/// Tree heading for a host, e.g. `10.0.0.5 (IPv4)`.
pub fn host_title(host: &IpAddr) -> String {
    let kind: &str = match host {
        IpAddr::V4(_) => "IPv4",
        IpAddr::V6(v6) => ipv6_to_type_str(v6),
    };
    let addr: ColoredString = match host {
        IpAddr::V4(_) => host.to_string().color(colors::IPV4_ADDR),
        IpAddr::V6(_) => host.to_string().color(colors::IPV6_ADDR),
    };
    format!("{addr} ({kind})")
}

/// One tree line per open port: `22/tcp....: SSH ⟨banner⟩`.
pub fn port_detail(result: &ScanResult) -> Detail {
    let key: String = format!("{}/tcp", result.port);
    let mut value: String = format!("{}", result.service.as_str().color(colors::SERVICE));
    if let Some(banner) = &result.banner {
        let preview: String = one_line(banner, BANNER_PREVIEW_CHARS);
        value.push_str(&format!(" {}", format!("⟨{preview}⟩").color(colors::BANNER)));
    }
    (key, value.normal())
}

pub fn advisory_detail(advisories: &[&str]) -> Option<Detail> {
    if advisories.is_empty() {
        return None;
    }
    let joined: String = advisories.join("; ");
    Some(("Notes".to_string(), joined.color(colors::ADVISORY)))
}

/// Collapses whitespace runs and caps the preview length.
fn one_line(text: &str, max_chars: usize) -> String {
    let collapsed: String = text.split_whitespace().collect::<Vec<&str>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
