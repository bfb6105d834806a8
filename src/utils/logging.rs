//! Conditional logging macros for high-frequency code paths.
//!
//! A module that logs per frame defines its own switch, then uses the macros
//! exported at the crate root:
//!
//! ```rust,ignore
//! const ENABLE_LOGS: bool = false;
//! use crate::{log_info, log_warn};
//!
//! log_info!("frame accepted at {:.3}s", capture_time);
//! ```
//!
//! The check compiles to nothing when the module's `ENABLE_LOGS` is false,
//! so the frame path stays quiet without touching the global log filter.

/// Info-level logging gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn-level logging gated by the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}
