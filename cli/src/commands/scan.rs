use std::net::IpAddr;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::Local;
use colored::*;
use portscout_common::config::{BannerPolicy, ScanConfig};
use portscout_common::network::port::PortSelection;
use portscout_common::scan::{HostScanOutcome, NetworkScanOutcome};
use portscout_common::{success, warn};
use portscout_core::{PortScanner, advisory};

use crate::commands::ScanArgs;
use crate::mprint;
use crate::report::{self, ScanReport};
use crate::terminal::{colors, format, print, spinner};

type Detail = (String, ColoredString);

const SETTINGS_KEY_WIDTH: usize = 8;

pub async fn scan(args: ScanArgs, q_level: u8) -> anyhow::Result<()> {
    let selection: PortSelection = args.ports.selection();
    let ports: Vec<u16> = selection.resolve()?;
    let config: ScanConfig = build_config(&args)?;

    if q_level == 0 {
        print_settings(&args, &selection, ports.len(), &config);
    }

    let scanner: PortScanner = PortScanner::new(config)
        .context("invalid scan settings")?
        .on_open_port(spinner::report_scan_progress);

    spinner::start();
    let start_time: Instant = Instant::now();

    let result = tokio::select! {
        outcome = scanner.scan_target(&args.target, &selection) => outcome,
        _ = tokio::signal::ctrl_c() => {
            spinner::finish();
            anyhow::bail!("Scan interrupted by user");
        }
    };
    spinner::finish();

    let outcome: NetworkScanOutcome = result?;
    scan_ends(&outcome, start_time.elapsed(), q_level);

    if let Some(export_format) = args.export {
        if outcome.is_empty() {
            warn!("Nothing to export, no open ports were found");
            return Ok(());
        }
        let report: ScanReport = ScanReport::build(&args.target, &selection, &outcome, Local::now());
        let path: PathBuf = args
            .output
            .unwrap_or_else(|| report::default_filename(&args.target, export_format, Local::now()));
        report::export(&report, export_format, &path)?;
        success!("Results exported to {}", path.display());
    }

    Ok(())
}

fn build_config(args: &ScanArgs) -> anyhow::Result<ScanConfig> {
    let timeout: Duration = ScanConfig::timeout_from_secs_f64(args.timeout)?;
    let mut config: ScanConfig = ScanConfig::default()
        .with_timeout(timeout)
        .with_max_concurrent_ports(args.threads);

    if let Some(hosts) = args.host_threads {
        config = config.with_max_concurrent_hosts(hosts);
    }
    if args.no_banner {
        config = config.with_banner(BannerPolicy::disabled());
    }
    config.validate()?;
    Ok(config)
}

fn print_settings(args: &ScanArgs, selection: &PortSelection, port_count: usize, config: &ScanConfig) {
    let ports: String = format!("{port_count} ({})", selection.scan_type());
    let threads: String = format!(
        "{} per host, {} hosts at once",
        config.max_concurrent_ports, config.max_concurrent_hosts
    );
    print::aligned_line("Target", SETTINGS_KEY_WIDTH, args.target.to_string());
    print::aligned_line("Ports", SETTINGS_KEY_WIDTH, ports);
    print::aligned_line("Timeout", SETTINGS_KEY_WIDTH, format!("{:.2}s", config.timeout.as_secs_f64()));
    print::aligned_line("Threads", SETTINGS_KEY_WIDTH, threads);
}

fn scan_ends(outcome: &NetworkScanOutcome, total_time: Duration, q_level: u8) {
    if outcome.is_empty() {
        no_open_ports(q_level);
        return;
    }

    if q_level > 0 {
        mprint!();
    }

    print::header("Scan Results", q_level);
    print_hosts(outcome, q_level);
    print_summary(outcome, total_time, q_level);
}

fn no_open_ports(q_level: u8) {
    print::header("NO OPEN PORTS DETECTED", q_level);
    print::no_results();
}

fn print_hosts(outcome: &NetworkScanOutcome, q_level: u8) {
    if q_level >= 2 {
        return;
    }
    let count: usize = outcome.len();
    for (idx, (host, results)) in outcome.iter().enumerate() {
        print_host_tree(idx, host, results);
        if idx + 1 != count {
            mprint!();
        }
    }
}

fn print_host_tree(idx: usize, host: &IpAddr, results: &HostScanOutcome) {
    print::tree_head(idx, &format::host_title(host));

    let mut details: Vec<Detail> = results.iter().map(format::port_detail).collect();

    let mut advisories: Vec<&str> = Vec::new();
    for result in results {
        for hint in advisory::assess(result) {
            if !advisories.contains(&hint) {
                advisories.push(hint);
            }
        }
    }
    if let Some(advisory_detail) = format::advisory_detail(&advisories) {
        details.push(advisory_detail);
    }

    print::as_tree_one_level(details);
}

fn print_summary(outcome: &NetworkScanOutcome, total_time: Duration, q_level: u8) {
    let open_ports: ColoredString = format!("{} open ports", outcome.total_open_ports()).bold().green();
    let hosts: ColoredString = format!("{} hosts", outcome.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!("Scan Complete: {open_ports} on {hosts} in {total_time}")
        .color(colors::TEXT_DEFAULT);

    match q_level {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => {
            mprint!();
            success!("{}", output)
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
