//! Plain file writer for the logger

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;
use crate::logger::error::LoggerError;

/// Shared handle to the log file, one guard per event
#[derive(Clone)]
pub(crate) struct FileWriter {
    file: Arc<Mutex<File>>,
}

impl FileWriter {
    pub(crate) fn open(config: &FileConfig) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = open_log_file(&config.path, config.append)?;
        Ok(Self {
            file: Arc::new(Mutex::new(file)),
        })
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = FileWriterGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        // A panic while holding the lock leaves the file usable
        let guard = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        FileWriterGuard { guard }
    }
}

pub(crate) struct FileWriterGuard<'a> {
    guard: MutexGuard<'a, File>,
}

impl Write for FileWriterGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.guard.flush()
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::LogFormat;
    use tempfile::TempDir;

    fn file_config(dir: &TempDir, append: bool) -> FileConfig {
        FileConfig {
            enabled: true,
            path: dir.path().join("nested/dir/notifier.log"),
            append,
            format: LogFormat::Json,
        }
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true);

        let writer = FileWriter::open(&config).unwrap();
        writer.make_writer().write_all(b"first line\n").unwrap();

        let contents = std::fs::read_to_string(&config.path).unwrap();
        assert_eq!(contents, "first line\n");
    }

    #[test]
    fn test_append_and_truncate_modes() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true);

        FileWriter::open(&config)
            .unwrap()
            .make_writer()
            .write_all(b"one\n")
            .unwrap();
        FileWriter::open(&config)
            .unwrap()
            .make_writer()
            .write_all(b"two\n")
            .unwrap();
        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "one\ntwo\n");

        let truncating = file_config(&dir, false);
        FileWriter::open(&truncating)
            .unwrap()
            .make_writer()
            .write_all(b"three\n")
            .unwrap();
        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "three\n");
    }
}
