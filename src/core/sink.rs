//! Sink trait for log output destinations

use super::error::Result;

/// A destination for fully formatted records.
///
/// The engine probes sinks in registration order on every dispatch and
/// writes to the first one that reports itself available.
pub trait Sink: Send + Sync {
    /// Report whether the sink can accept a record right now.
    ///
    /// An `Err` is treated the same as `Ok(false)` by the engine, except
    /// that it is reported on the diagnostic stream.
    fn probe(&mut self) -> Result<bool>;

    /// Write a rendered record. Failures stay inside the sink.
    fn write(&mut self, data: &[u8]);

    fn name(&self) -> &str;
}
