pub mod scan;
pub mod services;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use portscout_common::network::port::PortSelection;
use portscout_common::network::target::ScanTarget;

use crate::report::ExportFormat;

#[derive(Parser)]
#[command(name = "portscout")]
#[command(about = "A concurrent TCP connect port scanner.", version)]
pub struct CommandLine {
    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Reduce output (-q hides headers, -qq also hides per-host details)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a host or network block for open TCP ports
    #[command(alias = "s")]
    Scan(ScanArgs),
    /// List the built-in port to service catalog
    #[command(alias = "sv")]
    Services,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Target IP address or network block (e.g., 192.168.1.1 or 192.168.1.0/24)
    pub target: ScanTarget,

    #[command(flatten)]
    pub ports: PortArgs,

    /// Connection timeout in seconds
    #[arg(long, default_value_t = 2.0)]
    pub timeout: f64,

    /// Maximum probes in flight per host
    #[arg(short, long, default_value_t = 100)]
    pub threads: usize,

    /// Maximum hosts scanned at once [default: min(threads, 50)]
    #[arg(long)]
    pub host_threads: Option<usize>,

    /// Do not read service banners
    #[arg(long)]
    pub no_banner: bool,

    /// Export the results
    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Output file name [default: auto-generated]
    #[arg(short, long, requires = "export")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
#[group(multiple = false)]
pub struct PortArgs {
    /// Quick scan with common ports (the default)
    #[arg(long)]
    pub quick: bool,

    /// Custom port list (e.g., --ports 80 443 8080 or --ports 80,443)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub ports: Option<Vec<u16>>,

    /// Port range (e.g., --range 1 1000)
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub range: Option<Vec<u16>>,
}

impl PortArgs {
    pub fn selection(&self) -> PortSelection {
        if let Some(ports) = &self.ports {
            return PortSelection::Explicit(ports.clone());
        }
        if let Some([start, end]) = self.range.as_deref() {
            return PortSelection::Range {
                start: *start,
                end: *end,
            };
        }
        PortSelection::Common
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
