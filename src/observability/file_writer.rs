//! Append-only trace file with numbered backups.
//!
//! When the live file would grow past its size limit, backups shift up by one
//! (`.1` becomes `.2` and so on), the oldest falls off the end, and the live
//! file becomes `.1`:
//!
//! ```text
//! marquee-otlp.json     ← live
//! marquee-otlp.json.1   ← newest backup
//! marquee-otlp.json.2
//! marquee-otlp.json.3   ← oldest kept
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size limit of the live file (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
const MAX_BACKUP_FILES: usize = 3;

struct Inner {
    file: Option<File>,
    /// Bytes in the live file, tracked to avoid a `stat` per write.
    size: u64,
}

/// Thread-safe rotating line writer.
pub struct FileWriter {
    path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    inner: Mutex<Inner>,
}

impl FileWriter {
    /// Writer with the default limits. Nothing is opened until the first write.
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            max_backups,
            inner: Mutex::new(Inner { file: None, size: 0 }),
        }
    }

    /// Appends `line` plus a newline, rotating first if it wouldn't fit.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from opening, renaming or writing, and reports
    /// a poisoned lock as [`io::ErrorKind::Other`].
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer lock poisoned: {e}")))?;

        if inner.file.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            inner.size = file.metadata().map(|m| m.len()).unwrap_or(0);
            inner.file = Some(file);
        }

        let incoming = line.len() as u64 + 1;
        if inner.size > 0 && inner.size + incoming > self.max_bytes {
            inner.file = None;
            self.rotate()?;
            inner.file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
            inner.size = 0;
        }

        let Some(file) = inner.file.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };
        writeln!(file, "{line}")?;
        file.flush()?;
        inner.size += incoming;
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return remove_if_exists(&self.path);
        }

        remove_if_exists(&self.backup_path(self.max_backups))?;
        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    fn test_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();
        assert_eq!(read(&path), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn test_rotation_shifts_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        // Each line is 10 bytes with its newline; two fit per file.
        let writer = FileWriter::with_limits(path.clone(), 20, 2);

        for i in 0..7 {
            writer.write_line(&format!("line-{i:04}")).unwrap();
        }

        assert_eq!(read(&path), "line-0006\n");
        assert_eq!(read(&dir.path().join("trace.json.1")), "line-0004\nline-0005\n");
        assert_eq!(read(&dir.path().join("trace.json.2")), "line-0002\nline-0003\n");
        assert!(!dir.path().join("trace.json.3").exists());
    }

    #[test]
    fn test_existing_file_size_counts_toward_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        fs::write(&path, "previous-run\n").unwrap();

        let writer = FileWriter::with_limits(path.clone(), 20, 1);
        writer.write_line("next-run!").unwrap();

        assert_eq!(read(&path), "next-run!\n");
        assert_eq!(read(&dir.path().join("trace.json.1")), "previous-run\n");
    }

    #[test]
    fn test_oversized_line_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_limits(path.clone(), 4, 1);

        writer.write_line("much longer than four bytes").unwrap();
        assert_eq!(read(&path), "much longer than four bytes\n");
    }
}
