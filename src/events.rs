//! Built-in terminal hooks for the two most severe levels

use crate::core::{Event, Fields};

/// Exit status used by [`FatalEvent`]
pub const FATAL_EXIT_CODE: i32 = 1;

/// Ends the process with a non-zero exit status. Never returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct FatalEvent;

impl Event for FatalEvent {
    fn fire(&self, _message: &str, _defaults: &Fields) {
        std::process::exit(FATAL_EXIT_CODE);
    }

    fn name(&self) -> &str {
        "fatal"
    }
}

/// Raises a panic carrying the logged message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicEvent;

impl Event for PanicEvent {
    fn fire(&self, message: &str, _defaults: &Fields) {
        panic!("{}", message);
    }

    fn name(&self) -> &str {
        "panic"
    }
}
