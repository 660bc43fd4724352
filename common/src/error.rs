use thiserror::Error;

/// Errors that stop a scan before (or instead of) probing.
///
/// Socket-level conditions such as refused, reset or timed out connections are
/// never represented here: a probe that hits them simply produces no result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The target is neither an IP address nor an `address/prefix` block.
    #[error("invalid target format: {0}")]
    InvalidTargetFormat(String),

    /// The port selection is empty, inverted or contains port 0.
    #[error("invalid port selection: {0}")]
    InvalidPortSelection(String),

    /// A [`crate::config::ScanConfig`] value is out of range.
    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),
}
