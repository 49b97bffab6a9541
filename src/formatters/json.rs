//! JSON formatter for structured output

use crate::core::{Formatter, LoggerError, Record, Result};

/// Renders a record as a single JSON object
///
/// Compatible with log aggregation tools like ELK, Loki, Graylog, etc.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Multi-line indented output
    pub fn new_pretty() -> Self {
        Self { pretty: true }
    }
}

impl Formatter for JsonFormatter {
    fn render(&self, _level: &str, record: &Record) -> Result<Vec<u8>> {
        let rendered = if self.pretty {
            serde_json::to_vec_pretty(record)
        } else {
            serde_json::to_vec(record)
        };
        rendered.map_err(|e| LoggerError::render(self.name(), e.to_string()))
    }

    fn name(&self) -> &str {
        "json"
    }
}
