//! Logging macros.
//!
//! Thin wrappers over [`tracing`] so library crates log through one vocabulary.
//! `success!` events carry the [`SUCCESS_TARGET`] target, which the terminal
//! formatter renders with its own symbol.

pub const SUCCESS_TARGET: &str = "modscan::success";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "modscan::success", $($arg)*)
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
