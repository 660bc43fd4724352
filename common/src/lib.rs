//! Shared domain models for `portscout`.
//!
//! Everything in here is plain data plus validation: what a scan target looks
//! like, which ports to probe, how a scan is configured and what it produces.
//! No sockets are opened from this crate.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod scan;

#[doc(hidden)]
pub use tracing as __tracing;
