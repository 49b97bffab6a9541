//! Stderr sink

use crate::core::{Result, Sink};
use std::io::Write;

/// Writes each record as one line on stderr. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl StderrSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StderrSink {
    fn probe(&mut self) -> Result<bool> {
        Ok(true)
    }

    fn write(&mut self, data: &[u8]) {
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(data);
        let _ = stderr.write_all(b"\n");
        let _ = stderr.flush();
    }

    fn name(&self) -> &str {
        "stderr"
    }
}
