use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// NOTE - Default file name of the mission journal
pub const DEFAULT_LOG_FILE: &str = "mission_log.txt";

/// Number of recent lines kept in memory for the status screen.
const TAIL_LINES: usize = 8;

/// Append-only mission journal.
///
/// Each event becomes one line in the log file (if one is attached), is
/// echoed to stdout when `echo` is on, and stays in a short rolling tail
/// for display.
pub struct EventLog {
    file: Option<(PathBuf, File)>,
    echo: bool,
    tail: VecDeque<String>,
    written: usize,
}

impl EventLog {
    /// Journal kept in memory only, nothing printed.
    pub fn in_memory() -> Self {
        Self {
            file: None,
            echo: false,
            tail: VecDeque::with_capacity(TAIL_LINES),
            written: 0,
        }
    }

    /// Opens `path` for appending; existing lines are kept.
    pub fn to_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            file: Some((path, file)),
            ..Self::in_memory()
        })
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|(path, _)| path.as_path())
    }

    /// Records one event line.
    ///
    /// A failed file write is reported through `tracing` and the mission
    /// carries on.
    pub fn record(&mut self, line: impl Into<String>) {
        let line = line.into();

        if let Some((path, file)) = self.file.as_mut() {
            if let Err(e) = writeln!(file, "{}", line).and_then(|_| file.flush()) {
                warn!(path = %path.display(), error = %e, "could not append to mission log");
            }
        }
        if self.echo {
            println!("{}", line);
        }

        if self.tail.len() == TAIL_LINES {
            self.tail.pop_front();
        }
        self.tail.push_back(line);
        self.written += 1;
    }

    /// Most recent lines, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.tail.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.tail.back().map(String::as_str)
    }

    /// Total number of lines recorded since creation.
    pub fn len(&self) -> usize {
        self.written
    }

    pub fn is_empty(&self) -> bool {
        self.written == 0
    }
}

/// Installs the diagnostics subscriber on stderr, filtered by `RUST_LOG`
/// (defaults to `warn`). Calling it twice is harmless.
pub fn init_diagnostics() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn tail_keeps_only_recent_lines() {
        let mut log = EventLog::in_memory();
        for i in 0..20 {
            log.record(format!("event {i}"));
        }
        let recent: Vec<&str> = log.recent().collect();
        assert_eq!(recent.len(), TAIL_LINES);
        assert_eq!(recent[0], "event 12");
        assert_eq!(log.last(), Some("event 19"));
        assert_eq!(log.len(), 20);
    }

    #[test]
    fn file_log_appends_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.txt");

        let mut first = EventLog::to_file(&path).unwrap();
        first.record("Planet: Mars");
        drop(first);

        let mut second = EventLog::to_file(&path).unwrap();
        second.record("Time: 0h");
        assert_eq!(second.path(), Some(path.as_path()));

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Planet: Mars\nTime: 0h\n");
    }
}
