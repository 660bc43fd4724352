use std::fmt;

use crate::error::ScanError;

/// Ports probed by a quick scan.
pub const COMMON_PORTS: [u16; 24] = [
    21, 22, 23, 25, 53, 80, 110, 111, 135, 139, 143, 443, 993, 995, 1723, 3306, 3389, 5432, 5900,
    6379, 8080, 8443, 9200, 27017,
];

/// Which ports to probe on every host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSelection {
    /// The curated [`COMMON_PORTS`] list.
    Common,
    /// Exactly these ports.
    Explicit(Vec<u16>),
    /// Every port in `start..=end`.
    Range { start: u16, end: u16 },
}

impl PortSelection {
    /// Validates the selection and turns it into an ascending, duplicate-free
    /// port list.
    pub fn resolve(&self) -> Result<Vec<u16>, ScanError> {
        let mut ports: Vec<u16> = match self {
            PortSelection::Common => COMMON_PORTS.to_vec(),
            PortSelection::Explicit(ports) => {
                if ports.is_empty() {
                    return Err(ScanError::InvalidPortSelection(
                        "an explicit port list needs at least one port".into(),
                    ));
                }
                ports.clone()
            }
            PortSelection::Range { start, end } => {
                if start > end {
                    return Err(ScanError::InvalidPortSelection(format!(
                        "range start {start} is greater than end {end}"
                    )));
                }
                (*start..=*end).collect()
            }
        };

        if ports.contains(&0) {
            return Err(ScanError::InvalidPortSelection(
                "port 0 is not a valid TCP port".into(),
            ));
        }

        ports.sort_unstable();
        ports.dedup();
        Ok(ports)
    }

    /// Short label used in reports: `quick`, `custom` or `range`.
    pub fn scan_type(&self) -> &'static str {
        match self {
            PortSelection::Common => "quick",
            PortSelection::Explicit(_) => "custom",
            PortSelection::Range { .. } => "range",
        }
    }
}

impl fmt::Display for PortSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSelection::Common => write!(f, "{} common ports", COMMON_PORTS.len()),
            PortSelection::Explicit(ports) => {
                let joined: Vec<String> = ports.iter().map(u16::to_string).collect();
                write!(f, "{}", joined.join(","))
            }
            PortSelection::Range { start, end } => write!(f, "{start}-{end}"),
        }
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
