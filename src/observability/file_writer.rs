//! Append-only JSON lines file with size-based rotation.
//!
//! When the live file grows past [`RotationPolicy::max_bytes`] it is shifted
//! to `<name>.1`, pushing older backups to `.2`, `.3` and so on. Backups past
//! [`RotationPolicy::max_backups`] are deleted.

use crate::domain::error::Result;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// When to rotate and how many rotated files to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    /// 10 MB, three backups.
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

/// Rotating JSON lines writer, opened lazily on first write.
///
/// # Thread Safety
///
/// The open handle sits behind a `Mutex`, so a shared `FileWriter` can be
/// written from several threads. Each record is written and flushed while the
/// lock is held, so lines never interleave.
///
/// # Rotation Strategy
///
/// 1. Before each write, check the live file's size on disk
/// 2. If it has grown past `max_bytes`, close the handle and rotate:
///    - delete `<name>.{max_backups}`
///    - rename `<name>.{n}` to `<name>.{n+1}`, highest first
///    - rename `<name>` to `<name>.1`
/// 3. Reopen `<name>` in append mode and write the record
///
/// With `max_backups == 0` the live file is deleted and started afresh.
pub struct FileWriter {
    path: PathBuf,
    policy: RotationPolicy,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer. No file is touched until the first record.
    ///
    /// # Parameters
    ///
    /// * `path` - Live file; backups are written next to it with `.N` suffixes
    /// * `policy` - Size threshold and number of backups to keep
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            file: Mutex::new(None),
        }
    }

    /// Serializes `record` as one JSON line, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, rotation or the write fails.
    pub fn write_record<T: Serialize>(&self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;

        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        if self.is_full() {
            *file = None;
            self.rotate()?;
        }

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        if let Some(handle) = file.as_mut() {
            writeln!(handle, "{line}")?;
            handle.flush()?;
        }
        Ok(())
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|metadata| metadata.len() > self.policy.max_bytes)
    }

    /// Path of backup number `index` (1 is the newest).
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.max_backups == 0 {
            return remove_if_exists(&self.path);
        }

        remove_if_exists(&self.backup_path(self.policy.max_backups))?;
        for index in (1..self.policy.max_backups).rev() {
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
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::new(path.clone(), RotationPolicy::default());

        writer.write_record(&json!({"n": 1})).unwrap();
        writer.write_record(&json!({"n": 2})).unwrap();

        assert_eq!(lines(&path), vec![r#"{"n":1}"#, r#"{"n":2}"#]);
    }

    #[test]
    fn rotates_and_keeps_limited_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let policy = RotationPolicy {
            max_bytes: 1,
            max_backups: 2,
        };
        let writer = FileWriter::new(path.clone(), policy);

        for n in 1..=4 {
            writer.write_record(&json!({ "n": n })).unwrap();
        }

        assert_eq!(lines(&path), vec![r#"{"n":4}"#]);
        assert_eq!(lines(&writer.backup_path(1)), vec![r#"{"n":3}"#]);
        assert_eq!(lines(&writer.backup_path(2)), vec![r#"{"n":2}"#]);
        assert!(!writer.backup_path(3).exists());
    }

    #[test]
    fn zero_backups_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let policy = RotationPolicy {
            max_bytes: 1,
            max_backups: 0,
        };
        let writer = FileWriter::new(path.clone(), policy);

        writer.write_record(&json!("a")).unwrap();
        writer.write_record(&json!("b")).unwrap();

        assert_eq!(lines(&path), vec![r#""b""#]);
        assert!(!writer.backup_path(1).exists());
    }
}
