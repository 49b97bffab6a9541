//! Shared test doubles for the integration tests

#![allow(dead_code)]

use level_dispatch::prelude::*;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Serializes tests that install the process-wide logger
pub static GLOBAL_LOCK: Mutex<()> = parking_lot::const_mutex(());

#[derive(Default)]
pub struct SinkState {
    pub available: AtomicBool,
    pub probes: AtomicUsize,
    pub writes: Mutex<Vec<Vec<u8>>>,
    in_write: AtomicBool,
    pub overlapped: AtomicBool,
}

impl SinkState {
    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Decode every write as a JSON object
    pub fn json_writes(&self) -> Vec<serde_json::Value> {
        self.writes
            .lock()
            .iter()
            .map(|w| serde_json::from_slice(w).expect("record is JSON"))
            .collect()
    }
}

/// In-memory sink whose state stays observable after the logger owns it
pub struct MemorySink {
    state: Arc<SinkState>,
    write_delay: Option<Duration>,
}

impl MemorySink {
    pub fn new(available: bool) -> (Self, Arc<SinkState>) {
        let state = Arc::new(SinkState::default());
        state.set_available(available);
        (
            Self {
                state: Arc::clone(&state),
                write_delay: None,
            },
            state,
        )
    }

    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = Some(delay);
        self
    }
}

impl Sink for MemorySink {
    fn probe(&mut self) -> Result<bool> {
        self.state.probes.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.available.load(Ordering::SeqCst))
    }

    fn write(&mut self, data: &[u8]) {
        if self.state.in_write.swap(true, Ordering::SeqCst) {
            self.state.overlapped.store(true, Ordering::SeqCst);
        }
        if let Some(delay) = self.write_delay {
            std::thread::sleep(delay);
        }
        self.state.writes.lock().push(data.to_vec());
        self.state.in_write.store(false, Ordering::SeqCst);
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// JSON formatter that counts how often it renders
pub struct CountingFormatter {
    inner: JsonFormatter,
    pub renders: Arc<AtomicUsize>,
}

impl CountingFormatter {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let renders = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner: JsonFormatter::new(),
                renders: Arc::clone(&renders),
            },
            renders,
        )
    }
}

impl Formatter for CountingFormatter {
    fn render(&self, level: &str, record: &Record) -> Result<Vec<u8>> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        self.inner.render(level, record)
    }

    fn name(&self) -> &str {
        "counting"
    }
}
