//! Human-readable `key="value"` formatter

use crate::core::{Formatter, Record, Result};
use chrono::Local;

/// Renders `key="value" ` pairs sorted by key, each followed by a space,
/// optionally prefixed by the local time (`2025/01/08 10:30:45-> `).
///
/// Newlines, carriage returns and tabs in values are escaped so one record
/// always stays on one line.
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    timestamp: bool,
    colors: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self {
            timestamp: false,
            colors: false,
        }
    }

    /// Prefix each record with the local wall-clock time
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Color the `level` value (requires the `console` feature)
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    fn escape_value(value: &str) -> String {
        value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    #[cfg(feature = "console")]
    fn paint(&self, level: &str, value: String) -> String {
        use colored::Colorize;

        if !self.colors {
            return value;
        }
        match level.parse::<crate::core::Level>() {
            Ok(parsed) => value.color(parsed.color()).to_string(),
            Err(_) => value,
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, _level: &str, value: String) -> String {
        value
    }
}

impl Formatter for TextFormatter {
    fn render(&self, level: &str, record: &Record) -> Result<Vec<u8>> {
        let mut out = String::new();
        if self.timestamp {
            out.push_str(&Local::now().format("%Y/%m/%d %H:%M:%S-> ").to_string());
        }

        for (key, value) in record {
            let mut value = Self::escape_value(value);
            if key == "level" {
                value = self.paint(level, value);
            }
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&value);
            out.push_str("\" ");
        }

        Ok(out.into_bytes())
    }

    fn name(&self) -> &str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::base_record;

    fn render(formatter: &TextFormatter, record: &Record) -> String {
        String::from_utf8(formatter.render("warning", record).unwrap()).unwrap()
    }

    #[test]
    fn test_sorted_pairs() {
        let mut record = base_record("t0".into(), "warning", "disk low");
        record.insert("app".into(), "api".into());

        let out = render(&TextFormatter::new(), &record);
        assert_eq!(
            out,
            r#"app="api" level="warning" msg="disk low" time="t0" "#
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let record = base_record("t0".into(), "warning", "line1\nERROR \"fake\"");
        let out = render(&TextFormatter::new(), &record);

        assert_eq!(out.lines().count(), 1);
        assert!(out.contains(r#"msg="line1\nERROR \"fake\"""#));
    }

    #[test]
    fn test_timestamp_prefix() {
        let record = base_record("t0".into(), "warning", "m");
        let out = render(&TextFormatter::new().with_timestamp(true), &record);

        let (prefix, rest) = out.split_once("-> ").expect("timestamp separator");
        assert_eq!(prefix.len(), "2025/01/08 10:30:45".len());
        assert!(rest.starts_with("level="));
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_colors_only_touch_level() {
        colored::control::set_override(true);
        let record = base_record("t0".into(), "warning", "m");
        let out = render(&TextFormatter::new().with_colors(true), &record);
        colored::control::unset_override();

        assert!(out.contains("\u{1b}["));
        assert!(out.contains(r#"msg="m""#));
    }
}
