#![deny(missing_docs)]
//! Shared logging utilities for the ad preview workspace.
//!
//! This crate provides the `preview_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every message is
//! tagged with the preview batch the current thread is working on, so log
//! lines from a stale batch can be told apart from the current one.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Thread-local storage for the batch the current thread is processing.
    static CURRENT_BATCH: Cell<u64> = const { Cell::new(0) };
}

/// Sets the preview batch for the current thread.
/// The engine calls this before it starts work on a batch.
pub fn set_current_batch(batch: u64) {
    CURRENT_BATCH.with(|v| v.set(batch));
}

/// Retrieves the preview batch for the current thread.
/// Returns 0 if no batch has been set.
pub fn current_batch() -> u64 {
    CURRENT_BATCH.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current batch.
#[macro_export]
macro_rules! preview_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[batch {}] {}", $crate::current_batch(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current batch.
#[macro_export]
macro_rules! preview_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[batch {}] {}", $crate::current_batch(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current batch.
#[macro_export]
macro_rules! preview_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[batch {}] {}", $crate::current_batch(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current batch.
#[macro_export]
macro_rules! preview_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[batch {}] {}", $crate::current_batch(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current batch.
#[macro_export]
macro_rules! preview_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[batch {}] {}", $crate::current_batch(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have installed the logger already.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
