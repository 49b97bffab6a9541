//! Sink implementations

pub mod stderr;

#[cfg(feature = "file")]
pub mod file;

#[cfg(feature = "network")]
pub mod gelf;

pub use stderr::StderrSink;

#[cfg(feature = "file")]
pub use file::FileSink;

#[cfg(feature = "network")]
pub use gelf::{Compression, GelfSink, Protocol};

pub use crate::core::Sink;
