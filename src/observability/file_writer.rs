//! Append-only line writer for trace files with size-based rotation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the trace file grows past 10 MB.
const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Thread-safe JSON-lines writer.
///
/// The file is opened lazily on the first write and kept open afterwards.
/// When it grows past the size limit it is renamed to
/// `<name>.<YYYYMMDDTHHMMSS>` and a fresh file is started; only the most recent
/// backup survives.
pub struct FileWriter {
    path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer for `path` that rotates at the default size.
    ///
    /// Nothing is opened until the first [`write_line`](Self::write_line).
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self::with_max_bytes(path, DEFAULT_MAX_BYTES)
    }

    /// Creates a writer that rotates once the file reaches `max_bytes`.
    ///
    /// # Parameters
    ///
    /// * `path` - Destination file; its directory must already exist
    /// * `max_bytes` - Size threshold checked before each write
    #[must_use]
    pub fn with_max_bytes(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened, rotated, or written, or if the lock
    /// was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self.file.lock().map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("trace writer lock poisoned: {e}"))
        })?;

        if self.needs_rotation() {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }
        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file unavailable"))?;

        writeln!(handle, "{line}")?;
        handle.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|metadata| metadata.len() > self.max_bytes)
    }

    fn rotate(&self) -> io::Result<()> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".{stamp}"));

        if let Some(previous) = self.previous_backup()? {
            let _ = fs::remove_file(previous);
        }
        fs::rename(&self.path, PathBuf::from(backup))
    }

    fn previous_backup(&self) -> io::Result<Option<PathBuf>> {
        let name = self.path.file_name().and_then(|n| n.to_str());
        let (Some(dir), Some(name)) = (self.path.parent(), name) else {
            return Ok(None);
        };
        let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
        let prefix = format!("{name}.");

        Ok(fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .find(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            }))
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines_across_writes() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(dir.path().join("trace.jsonl"));

        writer.write_line(r#"{"name":"a"}"#).unwrap();
        writer.write_line(r#"{"name":"b"}"#).unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "{\"name\":\"a\"}\n{\"name\":\"b\"}\n");
    }

    #[test]
    fn rotates_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");
        let writer = FileWriter::with_max_bytes(path.clone(), 8);

        writer.write_line("first line over limit").unwrap();
        writer.write_line("second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        let backups: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.path() != path)
            .collect();
        assert_eq!(backups.len(), 1);
    }
}
