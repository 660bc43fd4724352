use anyhow::Result;

use super::ScanReport;

pub(super) fn render(report: &ScanReport) -> Result<Vec<u8>> {
    let json: String = serde_json::to_string_pretty(report)?;
    Ok(json.into_bytes())
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
    use serde_json::Value;

    #[test]
    fn json_has_metadata_and_targets() {
        let bytes = render(&sample_report()).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["scan_metadata"]["scan_type"], "quick");
        assert_eq!(value["scan_metadata"]["total_open_ports"], 3);
        assert_eq!(value["targets"][0]["ip"], "192.168.1.10");
        assert_eq!(value["targets"][0]["open_ports"][0]["port"], 22);
        assert_eq!(value["targets"][0]["open_ports"][0]["status"], "open");
        assert_eq!(value["targets"][0]["open_ports"][1]["banner"], Value::Null);
    }
}
