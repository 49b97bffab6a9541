//! File sink implementation

use crate::core::{Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one record per line to a file.
///
/// Each write is flushed so a record is on disk before any Fatal hook
/// ends the process. A failed write closes the file; the next probe
/// tries to reopen it.
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let writer = Some(Self::open(&path)?);
        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(path: &Path) -> Result<BufWriter<File>> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(BufWriter::new(file))
    }
}

impl Sink for FileSink {
    fn probe(&mut self) -> Result<bool> {
        if self.writer.is_none() {
            self.writer = Some(Self::open(&self.path)?);
        }
        Ok(true)
    }

    fn write(&mut self, data: &[u8]) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        let result = writer
            .write_all(data)
            .and_then(|_| writer.write_all(b"\n"))
            .and_then(|_| writer.flush());
        if result.is_err() {
            self.writer = None;
        }
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_appends_lines() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.log");

        let mut sink = FileSink::new(&log_path)?;
        assert!(sink.probe()?);
        sink.write(b"first");
        sink.write(b"second");

        let content = fs::read_to_string(&log_path)?;
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["first", "second"]);
        Ok(())
    }

    #[test]
    fn test_probe_reopens_closed_writer() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("reopen.log");

        let mut sink = FileSink::new(&log_path)?;
        sink.writer = None;
        assert!(sink.probe()?);
        sink.write(b"after reopen");

        assert!(fs::read_to_string(&log_path)?.contains("after reopen"));
        Ok(())
    }

    #[test]
    fn test_probe_fails_for_missing_directory() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("gone").join("app.log");
        assert!(FileSink::new(&log_path).is_err());

        let mut sink = FileSink {
            path: log_path,
            writer: None,
        };
        assert!(sink.probe().is_err());
        Ok(())
    }
}
