//! Static exposure hints for open ports.
//!
//! These are reminders of what an exposed service commonly implies, keyed on
//! the port number and on obvious version strings in the banner. Nothing here
//! talks to the target.

use portscout_common::scan::ScanResult;

pub const BANNER_VERSION_DISCLOSURE: &str = "Service version disclosure in banner";

const VERSION_MARKERS: [&str; 4] = ["version", "v1.0", "v2.0", "v3.0"];

fn port_advisories(port: u16) -> &'static [&'static str] {
    match port {
        21 => &["FTP - Anonymous login possible", "FTP - Plain text authentication"],
        23 => &["Telnet - Unencrypted communication", "Telnet - Weak authentication"],
        25 => &["SMTP - Open relay possible", "SMTP - Information disclosure"],
        53 => &["DNS - Zone transfer possible", "DNS - Cache poisoning"],
        80 => &["HTTP - Potential web vulnerabilities", "HTTP - Information disclosure"],
        110 => &["POP3 - Plain text authentication"],
        143 => &["IMAP - Plain text authentication"],
        3306 => &["MySQL - Default credentials", "MySQL - Data exposure"],
        3389 => &["RDP - Brute force attacks", "RDP - Man-in-the-middle possible"],
        5432 => &["PostgreSQL - Default credentials", "PostgreSQL - Data exposure"],
        6379 => &["Redis - No authentication", "Redis - Remote code execution"],
        27017 => &["MongoDB - No authentication", "MongoDB - Data exposure"],
        _ => &[],
    }
}

/// Potential issues worth checking on an open port.
pub fn assess(result: &ScanResult) -> Vec<&'static str> {
    let mut advisories: Vec<&'static str> = port_advisories(result.port).to_vec();

    if let Some(banner) = &result.banner {
        let lower: String = banner.to_lowercase();
        if VERSION_MARKERS.iter().any(|marker| lower.contains(marker)) {
            advisories.push(BANNER_VERSION_DISCLOSURE);
        }
    }

    advisories
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
