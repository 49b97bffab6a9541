//! Format-string entry points.
//!
//! These log through the process-wide instance, like the functions in
//! [`crate::facade`], and return the same `Result`.
//!
//! # Examples
//!
//! ```
//! use level_dispatch::prelude::*;
//! use level_dispatch::{debug, warning};
//!
//! Logger::builder()
//!     .level(Level::Debug)
//!     .sink(StderrSink::new())
//!     .silent(true)
//!     .init();
//!
//! let port = 8080;
//! debug!("listening on port {}", port).unwrap();
//! let _ = warning!("retry {} of {}", 3, 5);
//! ```

/// Log at an explicit level with format arguments.
///
/// ```
/// # use level_dispatch::prelude::*;
/// use level_dispatch::log;
/// # Logger::builder().sink(StderrSink::new()).silent(true).init();
/// let _ = log!(Level::Info, "processed {} items", 100);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        $crate::facade::log($level, format_args!($($arg)+))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// Exits the process when the logger's level is configured at Fatal.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Fatal, $($arg)+)
    };
}

/// Log a panic-level message.
///
/// Panics with the message when the logger's level is configured at Panic.
///
/// Named `panic_log!` because `panic!` belongs to the standard library.
#[macro_export]
macro_rules! panic_log {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Panic, $($arg)+)
    };
}
