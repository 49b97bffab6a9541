//! # Level Dispatch
//!
//! A pluggable, level-filtered logging facade.
//!
//! Callers emit leveled messages; the engine picks the first available sink
//! from a prioritized list, merges default fields into the record, renders
//! it with the configured formatter, writes it, and then runs the hooks
//! registered for the logger's configured level.
//!
//! ## Features
//!
//! - **Sink fallback**: sinks are probed in registration order on every call
//! - **Timeouts**: an optional upper bound on how long a caller waits
//! - **Level hooks**: side effects per level; Fatal exits, Panic panics
//! - **Pluggable output**: stderr, file and Graylog (GELF) sinks; JSON and
//!   text formatters

pub mod core;
pub mod events;
pub mod facade;
pub mod formatters;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Dispatch, DispatchMetrics, Event, FieldValue, Fields, Formatter, Level, Logger,
        LoggerBuilder, LoggerError, Record, Result, Sink, TimestampFormat,
    };
    pub use crate::formatters::{JsonFormatter, TextFormatter};
    pub use crate::sinks::StderrSink;
}

pub use crate::core::{
    global, is_initialized, Dispatch, DispatchMetrics, Event, EventMap, FieldValue, Fields,
    Formatter, Level, Logger, LoggerBuilder, LoggerError, Record, Result, Sink, TimestampFormat,
};
pub use events::{FatalEvent, PanicEvent};
pub use facade::init;
pub use formatters::{JsonFormatter, TextFormatter};
pub use sinks::StderrSink;
