//! Process-wide entry points
//!
//! Each function logs through the instance installed with
//! [`crate::init`] (or [`Logger::init`]). They return
//! [`LoggerError::NotInitialized`] when nothing is installed.
//!
//! Info has no dedicated entry point; use [`log`] with [`Level::Info`].
//!
//! # Example
//!
//! ```
//! use level_dispatch::prelude::*;
//! use level_dispatch::facade;
//!
//! Logger::builder()
//!     .level(Level::Debug)
//!     .sink(StderrSink::new())
//!     .silent(true)
//!     .init();
//!
//! facade::debug("cache warmed").unwrap();
//! facade::log(Level::Info, "info goes through the generic form").unwrap();
//! ```

use crate::core::{global, Level, Logger, LoggerError, Result};
use std::fmt::Display;

/// Install `logger` as the process-wide instance
pub fn init(logger: Logger) -> Logger {
    logger.init()
}

/// Dispatch `message` at `level` through the installed instance
pub fn log(level: Level, message: impl Display) -> Result<()> {
    let logger = global().ok_or(LoggerError::NotInitialized)?;
    logger.log_with(level, || message.to_string())
}

pub fn warning(message: impl Display) -> Result<()> {
    log(Level::Warning, message)
}

pub fn trace(message: impl Display) -> Result<()> {
    log(Level::Trace, message)
}

pub fn debug(message: impl Display) -> Result<()> {
    log(Level::Debug, message)
}

pub fn error(message: impl Display) -> Result<()> {
    log(Level::Error, message)
}

/// Gated as Fatal. With the level configured at Fatal this runs the Fatal
/// hooks, and the process exits with status 1
pub fn fatal(message: impl Display) -> Result<()> {
    log(Level::Fatal, message)
}

/// Gated as Panic. With the level configured at Panic this runs the Panic
/// hooks, and the last one panics with `message`
pub fn panic(message: impl Display) -> Result<()> {
    log(Level::Panic, message)
}
