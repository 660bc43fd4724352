use std::fmt::Write;

use super::ScanReport;

const STYLE: &str = "body{font-family:monospace;margin:2em;background:#111;color:#ddd}\
table{border-collapse:collapse;margin-bottom:2em;width:100%}\
th,td{border:1px solid #444;padding:4px 8px;text-align:left}\
th{background:#222;color:#6f6}h2{color:#6cf}ul{color:#fc6}";

pub(super) fn render(report: &ScanReport) -> String {
    let meta = &report.scan_metadata;
    let mut html = String::new();

    // Writing to a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>portscout report: {target}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>portscout report</h1>\n\
         <p>Target: {target}<br>Scan type: {scan_type}<br>Generated: {timestamp}<br>\
         Hosts with open ports: {hosts}<br>Open ports: {ports}</p>\n",
        target = escape_html(&meta.target),
        scan_type = escape_html(meta.scan_type),
        timestamp = escape_html(&meta.timestamp),
        hosts = meta.total_hosts_scanned,
        ports = meta.total_open_ports,
    );

    for target in &report.targets {
        let _ = write!(
            html,
            "<h2>{}</h2>\n<table>\n<tr><th>Port</th><th>Status</th><th>Service</th><th>Banner</th></tr>\n",
            escape_html(&target.ip)
        );
        for entry in &target.open_ports {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                entry.port,
                entry.status,
                escape_html(&entry.service),
                escape_html(entry.banner.as_deref().unwrap_or("N/A")),
            );
        }
        html.push_str("</table>\n");

        if !target.potential_vulnerabilities.is_empty() {
            html.push_str("<ul>\n");
            for vuln in &target.potential_vulnerabilities {
                let _ = writeln!(html, "<li>{}</li>", escape_html(vuln));
            }
            html.push_str("</ul>\n");
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
