//! Hourly append-only log files.
//!
//! Each event is appended to `<dir>/<YYYY-MM-DDTHH>.log` (UTC), one line per
//! event. Used as the writer for the JSON error layer in [`crate::tracing`].

use chrono::{DateTime, Utc};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;

/// Opens the log file for the current hour on every event.
#[derive(Debug, Clone)]
pub struct HourlyLogWriter {
    dir: PathBuf,
}

impl HourlyLogWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Log file path for the hour containing `now`.
    pub fn path_for(&self, now: DateTime<Utc>) -> PathBuf {
        self.dir.join(format!("{}.log", now.format("%Y-%m-%dT%H")))
    }

    fn open(&self) -> io::Result<File> {
        std::fs::create_dir_all(&self.dir)?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path_for(Utc::now()))
    }
}

/// Writer for a single event. Writes are discarded if the file could not be opened.
#[derive(Debug)]
pub struct HourlyLogFile(Option<File>);

impl Write for HourlyLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.0 {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.0 {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for HourlyLogWriter {
    type Writer = HourlyLogFile;

    fn make_writer(&'a self) -> Self::Writer {
        match self.open() {
            Ok(file) => HourlyLogFile(Some(file)),
            Err(e) => {
                // Logging about a logging failure would recurse; stderr only.
                eprintln!("Failed to write to log file in {}: {}", self.dir.display(), e);
                HourlyLogFile(None)
            }
        }
    }
}
