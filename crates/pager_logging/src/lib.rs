#![deny(missing_docs)]
//! Shared logging utilities for the pager workspace.
//!
//! This crate provides the `pager_*` logging macros used across the codebase,
//! a per-thread dispatch counter that the host loop stamps onto its log lines,
//! and a minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Number of messages dispatched into the controller on this thread.
    static DISPATCH_TICK: Cell<u64> = const { Cell::new(0) };
}

/// Advances the dispatch counter for the current thread and returns the new value.
/// The host loop calls this once per message handed to `update`.
pub fn next_dispatch_tick() -> u64 {
    DISPATCH_TICK.with(|v| {
        let next = v.get().wrapping_add(1);
        v.set(next);
        next
    })
}

/// Retrieves the dispatch counter for the current thread.
/// Returns 0 if nothing has been dispatched yet.
pub fn dispatch_tick() -> u64 {
    DISPATCH_TICK.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! pager_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! pager_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! pager_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! pager_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! pager_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_tick_counts_per_thread() {
        let start = dispatch_tick();
        assert_eq!(next_dispatch_tick(), start + 1);
        assert_eq!(next_dispatch_tick(), start + 2);
        assert_eq!(dispatch_tick(), start + 2);

        let other = std::thread::spawn(dispatch_tick).join().unwrap();
        assert_eq!(other, 0);
    }
}
