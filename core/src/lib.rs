//! # portscout core
//!
//! The scanning engine: a TCP connect prober, the service catalog it uses to
//! name open ports, and the coordinator that fans probes out over every
//! (host, port) pair of a target under two concurrency bounds.
//!
//! * [`services`]: port number to service name.
//! * [`network::tcp`]: the real [`scanner::Prober`], with banner capture.
//! * [`expand`]: target string to host sequence.
//! * [`scanner`]: the coordinator and result aggregation.
//! * [`advisory`]: static exposure hints for open ports.

pub mod advisory;
pub mod expand;
pub mod network;
pub mod scanner;
pub mod services;

pub use scanner::{PortScanner, ProbeOutcome, Prober};
