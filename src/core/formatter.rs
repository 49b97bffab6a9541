//! Formatter trait for rendering merged records

use super::{error::Result, record::Record};

/// Renders a merged record into output bytes
pub trait Formatter: Send + Sync {
    /// Render `record` logged at the level labelled `level`
    fn render(&self, level: &str, record: &Record) -> Result<Vec<u8>>;

    fn name(&self) -> &str;
}
