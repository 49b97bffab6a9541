//! Core engine types and traits

pub mod error;
pub mod event;
pub mod fields;
pub mod formatter;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod registry;
pub mod sink;
pub mod timestamp;

pub use error::{LoggerError, Result};
pub use event::{Event, EventMap};
pub use fields::{FieldValue, Fields};
pub use formatter::Formatter;
pub use level::Level;
pub use logger::{Dispatch, Logger, LoggerBuilder};
pub use metrics::DispatchMetrics;
pub use record::{base_record, merge_defaults, Record, DEFAULTS_PREFIX};
pub use registry::{global, install, is_initialized};
pub use sink::Sink;
pub use timestamp::TimestampFormat;
