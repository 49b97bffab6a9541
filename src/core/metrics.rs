//! Dispatch metrics
//!
//! Counters for how each dispatch ended. Useful for spotting sinks that
//! flap or a timeout that is set too tight.

use std::sync::atomic::{AtomicU64, Ordering};

/// Outcome counters for the dispatch engine
///
/// # Example
///
/// ```
/// use level_dispatch::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
/// metrics.record_written();
/// metrics.record_no_sink();
///
/// assert_eq!(metrics.written(), 1);
/// assert_eq!(metrics.dropped(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Records written to a sink
    written: AtomicU64,

    /// Messages below the configured level
    gated: AtomicU64,

    /// Dispatches aborted because no sink was available
    no_sink: AtomicU64,

    /// Dispatches aborted by a formatter error
    render_failed: AtomicU64,

    /// Callers that stopped waiting on a slow dispatch
    timed_out: AtomicU64,

    /// Sink probes that returned an error
    probe_failures: AtomicU64,

    /// Sink writes that panicked
    write_panics: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            written: AtomicU64::new(0),
            gated: AtomicU64::new(0),
            no_sink: AtomicU64::new(0),
            render_failed: AtomicU64::new(0),
            timed_out: AtomicU64::new(0),
            probe_failures: AtomicU64::new(0),
            write_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn gated(&self) -> u64 {
        self.gated.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn no_sink(&self) -> u64 {
        self.no_sink.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn render_failed(&self) -> u64 {
        self.render_failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn timed_out(&self) -> u64 {
        self.timed_out.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn probe_failures(&self) -> u64 {
        self.probe_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_panics(&self) -> u64 {
        self.write_panics.load(Ordering::Relaxed)
    }

    /// Messages that passed the gate but were never written
    pub fn dropped(&self) -> u64 {
        self.no_sink() + self.render_failed() + self.write_panics()
    }

    #[inline]
    pub fn record_written(&self) -> u64 {
        self.written.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_gated(&self) -> u64 {
        self.gated.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_no_sink(&self) -> u64 {
        self.no_sink.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_render_failed(&self) -> u64 {
        self.render_failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_timed_out(&self) -> u64 {
        self.timed_out.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_probe_failure(&self) -> u64 {
        self.probe_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_panic(&self) -> u64 {
        self.write_panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of passed messages that were dropped, as a percentage
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped() as f64;
        let total = self.written() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.written.store(0, Ordering::Relaxed);
        self.gated.store(0, Ordering::Relaxed);
        self.no_sink.store(0, Ordering::Relaxed);
        self.render_failed.store(0, Ordering::Relaxed);
        self.timed_out.store(0, Ordering::Relaxed);
        self.probe_failures.store(0, Ordering::Relaxed);
        self.write_panics.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            written: AtomicU64::new(self.written()),
            gated: AtomicU64::new(self.gated()),
            no_sink: AtomicU64::new(self.no_sink()),
            render_failed: AtomicU64::new(self.render_failed()),
            timed_out: AtomicU64::new(self.timed_out()),
            probe_failures: AtomicU64::new(self.probe_failures()),
            write_panics: AtomicU64::new(self.write_panics()),
        }
    }
}
