//! Severity levels
//!
//! Levels are ordered from most to least severe. The engine's configured
//! level acts as a verbosity ceiling: a message passes the gate when its
//! level is at or below the ceiling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    Panic = 0,
    Fatal = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Trace = 6,
}

impl Level {
    /// Every level, most severe first
    pub const ALL: [Level; 7] = [
        Level::Panic,
        Level::Fatal,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Level::Panic => "panic",
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }

    /// Numeric rank; lower is more severe
    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// True when a message at `self` passes a gate configured at `ceiling`
    #[inline]
    pub fn enabled_under(&self, ceiling: Level) -> bool {
        *self <= ceiling
    }

    /// Levels whose event chain always ends with a process-ending hook
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Level::Panic | Level::Fatal)
    }

    #[cfg(feature = "console")]
    pub fn color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Panic => BrightMagenta,
            Level::Fatal => BrightRed,
            Level::Error => Red,
            Level::Warning => Yellow,
            Level::Info => Green,
            Level::Debug => Blue,
            Level::Trace => BrightBlack,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "panic" => Ok(Level::Panic),
            "fatal" => Ok(Level::Fatal),
            "error" => Ok(Level::Error),
            "warning" | "warn" => Ok(Level::Warning),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Level::Panic < Level::Fatal);
        assert!(Level::Fatal < Level::Error);
        assert!(Level::Error < Level::Warning);
        assert!(Level::Warning < Level::Info);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn test_gate_ceiling() {
        assert!(Level::Debug.enabled_under(Level::Debug));
        assert!(Level::Panic.enabled_under(Level::Debug));
        assert!(!Level::Trace.enabled_under(Level::Debug));
    }

    #[test]
    fn test_labels_and_parse() {
        for level in Level::ALL {
            assert_eq!(level.label().parse::<Level>(), Ok(level));
        }
        assert_eq!("WARN".parse::<Level>(), Ok(Level::Warning));
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_terminal_levels() {
        let terminal: Vec<_> = Level::ALL.iter().filter(|l| l.is_terminal()).collect();
        assert_eq!(terminal, vec![&Level::Panic, &Level::Fatal]);
    }
}
