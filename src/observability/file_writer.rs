//! Rotating file writer with size-based rotation and numbered backups.
//!
//! Trace lines are appended to one file. Once it grows past the configured
//! size it is shifted to `<file>.1`, older backups move up by one, and the
//! oldest beyond the retention limit is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Default maximum file size before rotation (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of backup files kept after rotation.
pub const DEFAULT_MAX_BACKUPS: usize = 3;

/// When to rotate and how many old files to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    /// Zero discards the old file instead of keeping a backup.
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }
}

/// Thread-safe rotating file writer.
///
/// The file is opened lazily on the first write, so construction never fails.
pub struct FileWriter {
    file_path: PathBuf,
    policy: RotationPolicy,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    #[must_use]
    pub const fn new(file_path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            file_path,
            policy,
            writer: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is too big.
    ///
    /// # Errors
    ///
    /// Fails on rotation, open, write or flush errors, or if the lock is
    /// poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("mutex poisoned: {e}")))?;

        if self.needs_rotation() {
            *writer = None;
            self.rotate()?;
        }

        let file = match writer.as_mut() {
            Some(file) => file,
            None => writer.insert(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            ),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn needs_rotation(&self) -> bool {
        fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.policy.max_bytes)
    }

    /// Path of the `index`-th backup, e.g. `bookshelf-otlp.json.2`.
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    /// Shifts `file.N-1 → file.N` down to `file → file.1`, dropping the oldest.
    fn rotate(&self) -> io::Result<()> {
        if self.policy.max_backups == 0 {
            return remove_if_exists(&self.file_path);
        }

        remove_if_exists(&self.backup_path(self.policy.max_backups))?;
        for index in (1..self.policy.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }

        if self.file_path.exists() {
            fs::rename(&self.file_path, self.backup_path(1))?;
        }
        Ok(())
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
            .field("file_path", &self.file_path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer_in(dir: &tempfile::TempDir, max_bytes: u64, max_backups: usize) -> FileWriter {
        FileWriter::new(
            dir.path().join("trace.json"),
            RotationPolicy { max_bytes, max_backups },
        )
    }

    fn read(path: PathBuf) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(&dir, DEFAULT_MAX_BYTES, DEFAULT_MAX_BACKUPS);
        writer.write_line("one").unwrap();
        writer.write_line("two").unwrap();

        assert_eq!(read(dir.path().join("trace.json")), "one\ntwo\n");
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(&dir, 4, 2);

        for line in ["first", "second", "third", "fourth"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(read(dir.path().join("trace.json")), "fourth\n");
        assert_eq!(read(dir.path().join("trace.json.1")), "third\n");
        assert_eq!(read(dir.path().join("trace.json.2")), "second\n");
        assert!(!dir.path().join("trace.json.3").exists());
    }

    #[test]
    fn zero_backups_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(&dir, 4, 0);
        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();

        assert_eq!(read(dir.path().join("trace.json")), "second\n");
        assert!(!dir.path().join("trace.json.1").exists());
    }
}
