//! Dispatch engine
//!
//! One `log` call runs gate -> resolve sink -> merge -> render -> write ->
//! fire events. Everything after the gate runs under a single lock, so
//! concurrent callers serialize through the engine.

use super::{
    error::{LoggerError, Result},
    event::{Event, EventMap},
    fields::{FieldValue, Fields},
    formatter::Formatter,
    level::Level,
    metrics::DispatchMetrics,
    record::{base_record, merge_defaults},
    sink::Sink,
    timestamp::TimestampFormat,
};
use crate::formatters::JsonFormatter;
use crossbeam_channel::{bounded, RecvTimeoutError};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Capability seam for call sites that log without naming `Logger`
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, level: Level, message: String) -> Result<()>;

    fn enabled(&self, level: Level) -> bool;
}

/// State mutated by setters and read by every dispatch
struct Pipeline {
    defaults: Fields,
    sinks: Vec<Box<dyn Sink>>,
    formatter: Box<dyn Formatter>,
    events: EventMap,
}

struct Inner {
    level: RwLock<Level>,
    pipeline: Mutex<Pipeline>,
    timeout: Option<Duration>,
    event_chain: bool,
    silent: bool,
    timestamp_format: TimestampFormat,
    metrics: DispatchMetrics,
}

/// Level-filtered logger with sink fallback and level-scoped events.
///
/// Cloning is cheap; clones share the same engine.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Logger at `Info` with no sinks and the JSON formatter
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use level_dispatch::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .level(Level::Debug)
    ///     .default_field("service", "api")
    ///     .sink(StderrSink::new())
    ///     .formatter(JsonFormatter::new())
    ///     .build();
    /// assert!(logger.enabled(Level::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn level(&self) -> Level {
        *self.inner.level.read()
    }

    pub fn set_level(&self, level: Level) {
        *self.inner.level.write() = level;
    }

    /// Replace the default fields merged into every record
    pub fn set_defaults(&self, defaults: Fields) {
        self.inner.pipeline.lock().defaults = defaults;
    }

    pub fn defaults(&self) -> Fields {
        self.inner.pipeline.lock().defaults.clone()
    }

    /// Append a sink; earlier sinks have priority
    pub fn add_sink(&self, sink: Box<dyn Sink>) {
        self.inner.pipeline.lock().sinks.push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.inner.pipeline.lock().sinks.len()
    }

    pub fn set_formatter(&self, formatter: Box<dyn Formatter>) {
        self.inner.pipeline.lock().formatter = formatter;
    }

    /// Register a hook for `level`.
    ///
    /// At Panic and Fatal the hook is placed before the built-in
    /// terminator, so the terminator always runs last.
    pub fn set_event(&self, level: Level, event: Box<dyn Event>) {
        self.inner.pipeline.lock().events.insert(level, event);
    }

    /// Names of the hooks registered for `level`, in firing order
    pub fn event_names(&self, level: Level) -> Vec<String> {
        self.inner
            .pipeline
            .lock()
            .events
            .get(level)
            .iter()
            .map(|e| e.name().to_string())
            .collect()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    /// Configured but not acted on: every hook for a level always runs.
    pub fn event_chain(&self) -> bool {
        self.inner.event_chain
    }

    pub fn is_silent(&self) -> bool {
        self.inner.silent
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.inner.metrics
    }

    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        level.enabled_under(self.level())
    }

    /// Dispatch one message.
    ///
    /// `level` only decides whether the message passes the gate. The record
    /// is labelled with the logger's configured level, and the hooks for
    /// that level are the ones that fire.
    ///
    /// Returns `Ok(())` without side effects when `level` is gated out.
    /// With a timeout configured the dispatch runs on its own thread and
    /// the caller stops waiting once the timeout elapses; the thread is
    /// left to finish on its own.
    pub fn log(&self, level: Level, message: impl Into<String>) -> Result<()> {
        self.log_with(level, || message.into())
    }

    /// Gate once, then build the message only if it passed
    pub(crate) fn log_with<F>(&self, level: Level, message: F) -> Result<()>
    where
        F: FnOnce() -> String,
    {
        if !self.enabled(level) {
            self.inner.metrics.record_gated();
            return Ok(());
        }

        let message = message();
        match self.inner.timeout {
            Some(timeout) if !timeout.is_zero() => self.dispatch_with_timeout(message, timeout),
            _ => self.inner.dispatch(&message),
        }
    }

    fn dispatch_with_timeout(&self, message: String, timeout: Duration) -> Result<()> {
        let (sender, receiver) = bounded(1);
        let inner = Arc::clone(&self.inner);

        thread::Builder::new()
            .name("log-dispatch".to_string())
            .spawn(move || {
                let outcome =
                    panic::catch_unwind(AssertUnwindSafe(|| inner.dispatch(&message)));
                if let Err(unclaimed) = sender.send(outcome) {
                    // Caller already returned a timeout
                    if let Err(payload) = unclaimed.into_inner() {
                        inner.diagnostic(format_args!(
                            "[LOGGER ERROR] Abandoned dispatch panicked: {}",
                            panic_message(payload.as_ref())
                        ));
                    }
                }
            })?;

        match receiver.recv_timeout(timeout) {
            Ok(Ok(result)) => result,
            Ok(Err(payload)) => panic::resume_unwind(payload),
            Err(RecvTimeoutError::Timeout) => {
                self.inner.metrics.record_timed_out();
                Err(LoggerError::Timeout(timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(LoggerError::other(
                "Dispatch worker exited without reporting a result",
            )),
        }
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Trace, message)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Debug, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Info, message)
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Warning, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Error, message)
    }

    /// Gated like any Fatal message; the hooks that run are those of the
    /// configured level.
    #[inline]
    pub fn fatal(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Fatal, message)
    }

    /// Gated like any Panic message; the hooks that run are those of the
    /// configured level.
    #[inline]
    pub fn panic(&self, message: impl Into<String>) -> Result<()> {
        self.log(Level::Panic, message)
    }

    /// Install this logger as the process-wide instance
    pub fn init(self) -> Logger {
        super::registry::install(self)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("timeout", &self.inner.timeout)
            .field("silent", &self.inner.silent)
            .finish_non_exhaustive()
    }
}

impl Dispatch for Logger {
    fn dispatch(&self, level: Level, message: String) -> Result<()> {
        self.log(level, message)
    }

    fn enabled(&self, level: Level) -> bool {
        Logger::enabled(self, level)
    }
}

impl Inner {
    /// Everything after the gate. Holds the pipeline lock throughout.
    fn dispatch(&self, message: &str) -> Result<()> {
        let mut guard = self.pipeline.lock();
        let level = *self.level.read();
        let Pipeline {
            defaults,
            sinks,
            formatter,
            events,
        } = &mut *guard;

        let index = self.resolve_sink(sinks)?;

        let record = merge_defaults(
            base_record(self.timestamp_format.now(), level.label(), message),
            defaults,
        );

        let rendered = formatter.render(level.label(), &record).inspect_err(|_| {
            self.metrics.record_render_failed();
        })?;

        let sink = &mut sinks[index];
        match panic::catch_unwind(AssertUnwindSafe(|| sink.write(&rendered))) {
            Ok(()) => {
                self.metrics.record_written();
            }
            Err(payload) => {
                self.metrics.record_write_panic();
                self.diagnostic(format_args!(
                    "[LOGGER CRITICAL] Sink #{} ({}) panicked during write: {}",
                    index,
                    sink.name(),
                    panic_message(payload.as_ref())
                ));
            }
        }

        events.fire(level, message, defaults);
        Ok(())
    }

    /// First sink that reports itself available, in registration order.
    /// Probe errors and panics count as unavailable.
    fn resolve_sink(&self, sinks: &mut [Box<dyn Sink>]) -> Result<usize> {
        for (index, sink) in sinks.iter_mut().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| sink.probe())) {
                Ok(Ok(true)) => return Ok(index),
                Ok(Ok(false)) => {
                    self.diagnostic(format_args!(
                        "[LOGGER WARNING] Sink #{} ({}) unavailable, trying next",
                        index,
                        sink.name()
                    ));
                }
                Ok(Err(e)) => {
                    self.metrics.record_probe_failure();
                    self.diagnostic(format_args!(
                        "[LOGGER ERROR] Sink #{} ({}) probe failed: {}",
                        index,
                        sink.name(),
                        e
                    ));
                }
                Err(payload) => {
                    self.metrics.record_probe_failure();
                    self.diagnostic(format_args!(
                        "[LOGGER CRITICAL] Sink #{} ({}) panicked during probe: {}",
                        index,
                        sink.name(),
                        panic_message(payload.as_ref())
                    ));
                }
            }
        }

        self.metrics.record_no_sink();
        Err(LoggerError::NoAvailableSink)
    }

    fn diagnostic(&self, args: fmt::Arguments<'_>) {
        if !self.silent {
            eprintln!("{}", args);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use level_dispatch::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .level(Level::Warning)
///     .sink(StderrSink::new())
///     .formatter(TextFormatter::new())
///     .timeout(Duration::from_millis(250))
///     .silent(true)
///     .build();
/// assert_eq!(logger.timeout(), Some(Duration::from_millis(250)));
/// ```
pub struct LoggerBuilder {
    level: Level,
    defaults: Fields,
    sinks: Vec<Box<dyn Sink>>,
    formatter: Option<Box<dyn Formatter>>,
    events: Vec<(Level, Box<dyn Event>)>,
    event_chain: bool,
    timeout: Option<Duration>,
    silent: bool,
    timestamp_format: TimestampFormat,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            defaults: Fields::new(),
            sinks: Vec::new(),
            formatter: None,
            events: Vec::new(),
            event_chain: false,
            timeout: None,
            silent: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Most verbose level that still gets through
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.defaults.insert(key.into(), value.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn defaults(mut self, defaults: Fields) -> Self {
        self.defaults = defaults;
        self
    }

    /// Append a sink; earlier sinks have priority
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn event<E: Event + 'static>(mut self, level: Level, event: E) -> Self {
        self.events.push((level, Box::new(event)));
        self
    }

    /// Stored and reported by [`Logger::event_chain`]; hooks still all run
    #[must_use = "builder methods return a new value"]
    pub fn event_chain(mut self, chain: bool) -> Self {
        self.event_chain = chain;
        self
    }

    /// Upper bound on how long `log` waits. Zero disables the timeout.
    #[must_use = "builder methods return a new value"]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() { None } else { Some(timeout) };
        self
    }

    /// Suppress the engine's own diagnostics on stderr
    #[must_use = "builder methods return a new value"]
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn build(self) -> Logger {
        let mut events = EventMap::new();
        for (level, event) in self.events {
            events.insert(level, event);
        }

        let formatter = self
            .formatter
            .unwrap_or_else(|| Box::new(JsonFormatter::new()));

        Logger {
            inner: Arc::new(Inner {
                level: RwLock::new(self.level),
                pipeline: Mutex::new(Pipeline {
                    defaults: self.defaults,
                    sinks: self.sinks,
                    formatter,
                    events,
                }),
                timeout: self.timeout,
                event_chain: self.event_chain,
                silent: self.silent,
                timestamp_format: self.timestamp_format,
                metrics: DispatchMetrics::new(),
            }),
        }
    }

    /// Build and install as the process-wide instance
    pub fn init(self) -> Logger {
        self.build().init()
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
