//! Stamps for the record's `time` field

use chrono::{DateTime, Local, SecondsFormat, Utc};
use std::fmt::Write;

/// How the `time` field of each record is written
///
/// # Examples
///
/// ```
/// use level_dispatch::TimestampFormat;
///
/// let stamp = TimestampFormat::Utc.now();
/// assert!(stamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// RFC 3339 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Utc,

    /// RFC 3339 in the local zone with milliseconds:
    /// `2025-01-08T11:30:45.123+01:00`
    Local,

    /// Milliseconds since the Unix epoch
    EpochMillis,

    /// strftime pattern applied to the UTC time. An invalid pattern falls
    /// back to [`TimestampFormat::Utc`].
    Pattern(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn stamp(&self, at: DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Utc => at.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Local => at
                .with_timezone(&Local)
                .to_rfc3339_opts(SecondsFormat::Millis, false),
            TimestampFormat::EpochMillis => at.timestamp_millis().to_string(),
            TimestampFormat::Pattern(pattern) => {
                let mut out = String::new();
                match write!(out, "{}", at.format(pattern)) {
                    Ok(()) => out,
                    Err(_) => TimestampFormat::Utc.stamp(at),
                }
            }
        }
    }

    /// Stamp for the current instant
    #[must_use]
    pub fn now(&self) -> String {
        self.stamp(Utc::now())
    }
}
