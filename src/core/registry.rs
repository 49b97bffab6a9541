//! Process-wide logger instance
//!
//! Entry points in [`crate::facade`] log through the instance installed
//! here. Installing again replaces the previous instance.

use super::logger::Logger;
use parking_lot::RwLock;

static INSTANCE: RwLock<Option<Logger>> = parking_lot::const_rwlock(None);

/// Install `logger` as the process-wide instance and return a handle to it.
///
/// A second call overwrites the first; a warning is printed unless the new
/// logger is silent.
pub fn install(logger: Logger) -> Logger {
    let previous = INSTANCE.write().replace(logger.clone());
    if previous.is_some() && !logger.is_silent() {
        eprintln!("[LOGGER WARNING] Logger already initialized, replacing previous instance");
    }
    logger
}

/// Handle to the installed instance, if any
pub fn global() -> Option<Logger> {
    INSTANCE.read().clone()
}

pub fn is_initialized() -> bool {
    INSTANCE.read().is_some()
}
