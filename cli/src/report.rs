//! Scan reports written to disk with `--export`.

mod csv;
mod html;
mod json;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use portscout_common::network::port::PortSelection;
use portscout_common::network::target::ScanTarget;
use portscout_common::scan::{NetworkScanOutcome, PortStatus};
use portscout_core::{advisory, services};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub scan_metadata: ScanMetadata,
    pub targets: Vec<TargetReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanMetadata {
    pub target: String,
    pub scan_type: &'static str,
    pub timestamp: String,
    pub total_hosts_scanned: usize,
    pub total_open_ports: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub ip: String,
    pub open_ports: Vec<PortEntry>,
    pub services_detected: Vec<String>,
    pub potential_vulnerabilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortEntry {
    pub port: u16,
    pub status: PortStatus,
    pub service: String,
    pub banner: Option<String>,
}

impl ScanReport {
    pub fn build(
        target: &ScanTarget,
        selection: &PortSelection,
        outcome: &NetworkScanOutcome,
        timestamp: DateTime<Local>,
    ) -> Self {
        let targets: Vec<TargetReport> = outcome
            .iter()
            .map(|(host, results)| {
                let open_ports: Vec<PortEntry> = results
                    .iter()
                    .map(|r| PortEntry {
                        port: r.port,
                        status: r.status,
                        service: r.service.clone(),
                        banner: r.banner.clone(),
                    })
                    .collect();

                let mut services_detected: Vec<String> = Vec::new();
                let mut potential_vulnerabilities: Vec<String> = Vec::new();
                for result in results {
                    if result.service != services::UNKNOWN_SERVICE
                        && !services_detected.contains(&result.service)
                    {
                        services_detected.push(result.service.clone());
                    }
                    for hint in advisory::assess(result) {
                        let line: String = format!("Port {}: {}", result.port, hint);
                        if !potential_vulnerabilities.contains(&line) {
                            potential_vulnerabilities.push(line);
                        }
                    }
                }

                TargetReport {
                    ip: host.to_string(),
                    open_ports,
                    services_detected,
                    potential_vulnerabilities,
                }
            })
            .collect();

        Self {
            scan_metadata: ScanMetadata {
                target: target.to_string(),
                scan_type: selection.scan_type(),
                timestamp: timestamp.to_rfc3339(),
                total_hosts_scanned: outcome.len(),
                total_open_ports: outcome.total_open_ports(),
            },
            targets,
        }
    }

    pub fn render(&self, format: ExportFormat) -> Result<Vec<u8>> {
        match format {
            ExportFormat::Json => json::render(self),
            ExportFormat::Csv => csv::render(self),
            ExportFormat::Html => Ok(html::render(self).into_bytes()),
        }
    }
}

/// `portscout_<target>_<YYYYmmdd_HHMMSS>.<ext>`, with `/` in the target
/// replaced by `_`.
pub fn default_filename(
    target: &ScanTarget,
    format: ExportFormat,
    now: DateTime<Local>,
) -> PathBuf {
    let target: String = target.to_string().replace(['/', ':'], "_");
    PathBuf::from(format!(
        "portscout_{}_{}.{}",
        target,
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

/// Renders `report` and writes it to `path`.
pub fn export(report: &ScanReport, format: ExportFormat, path: &Path) -> Result<()> {
    let bytes: Vec<u8> = report
        .render(format)
        .with_context(|| format!("failed to render {} report", format.extension()))?;
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
