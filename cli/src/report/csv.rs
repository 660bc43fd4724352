use anyhow::Result;
use ::csv::Writer;

use super::ScanReport;

pub(super) fn render(report: &ScanReport) -> Result<Vec<u8>> {
    let mut wtr = Writer::from_writer(vec![]);

    wtr.write_record(["ip", "port", "status", "service", "banner"])?;

    for target in &report.targets {
        for entry in &target.open_ports {
            let port: String = entry.port.to_string();
            wtr.write_record([
                target.ip.as_str(),
                port.as_str(),
                entry.status.as_str(),
                entry.service.as_str(),
                entry.banner.as_deref().unwrap_or_default(),
            ])?;
        }
    }

    let data: Vec<u8> = wtr.into_inner()?;
    Ok(data)
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
    use crate::report::tests::sample_report;

    #[test]
    fn one_row_per_open_port() {
        let bytes = render(&sample_report()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "ip,port,status,service,banner");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "192.168.1.10,22,open,SSH,SSH-2.0-OpenSSH_9.6 <test>");
        assert_eq!(lines[2], "192.168.1.10,6379,open,Redis,");
    }
}
