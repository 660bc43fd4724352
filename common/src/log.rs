//! Logging macros shared by every crate in the workspace.
//!
//! They are thin wrappers over [`tracing`]. `success!` uses its own target so
//! the terminal formatter can render it differently from a plain `info!`.

/// Target used by [`success!`] events.
pub const SUCCESS_TARGET: &str = "portscout::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!($($arg)*)
    };
}
