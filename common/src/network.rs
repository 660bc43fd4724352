//! Addressing models: what to scan ([`target`]), the hosts a target expands
//! to ([`range`]) and which ports to probe on each of them ([`port`]).

pub mod port;
pub mod range;
pub mod target;
