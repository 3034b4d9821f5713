//! File-backed key-value storage with atomic writes.
//!
//! One file per key under a root directory. Writes go through a temporary
//! file, fsync, and an atomic rename, so a crash mid-write never leaves a
//! torn record behind.

use crate::paths::NeonkitPaths;
use neonkit_core::{KeyValueStorage, NeonkitError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// A [`KeyValueStorage`] that stores each key as a file on disk.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: Advisory file locking prevents concurrent writers
/// - **Durability**: Explicit fsync before rename
///
/// Keys are filename-encoded (see [`encode_key`]), so any key the draft
/// layer produces maps to exactly one file and two distinct keys never
/// collide.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates a store rooted at `root`. The directory is created lazily
    /// on first write.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Creates a store rooted at the platform default draft directory
    /// (e.g. `~/.local/share/neonkit/drafts`).
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(NeonkitPaths::draft_dir()?))
    }

    /// The root directory holding the record files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(NeonkitError::invalid_key("storage key must be non-empty"));
        }
        Ok(self.root.join(format!("{}.json", encode_key(key))))
    }

    fn temp_path(path: &Path) -> Result<PathBuf> {
        let parent = path
            .parent()
            .ok_or_else(|| NeonkitError::storage("entry path has no parent directory"))?;
        let file_name = path
            .file_name()
            .ok_or_else(|| NeonkitError::storage("entry path has no file name"))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.root)?;

        let _lock = FileLock::acquire(&path)?;

        // Write to a temporary file in the same directory, then rename
        // over the target.
        let tmp_path = Self::temp_path(&path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(value.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Encodes an arbitrary key into a safe, collision-free filename stem.
///
/// ASCII alphanumerics, `.`, `-`, and `_` pass through; every other byte
/// becomes `%XX`. The encoding is injective, so distinct keys always map
/// to distinct files.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' | b'_' => {
                encoded.push(byte as char)
            }
            _ => {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    encoded
}

/// A file lock guard that automatically releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    /// Acquires an exclusive lock guarding `path`.
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| NeonkitError::storage(format!("failed to acquire lock: {e}")))?;
        }

        #[cfg(not(unix))]
        {
            // No advisory locking on non-Unix systems. Acceptable for a
            // single-user client process.
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped. Remove the
        // lock file on a best-effort basis.
        let _ = fs::remove_file(&self.lock_path);
    }
}
