//! Durable key-value storage backing the session.
//!
//! DESIGN
//! ======
//! Storage is a flat string map with synchronous reads and writes, the same
//! contract a browser's local storage offers. Multi-entry writes and reads
//! happen inside one critical section so callers never observe half of a
//! two-key update.
//!
//! TRADE-OFFS
//! ==========
//! `FileStorage` rewrites the whole map on every change (temp file + rename).
//! The map holds two entries, so the cost is negligible and a crash leaves
//! either the old file or the new one, never a mix.

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Errors produced while persisting storage entries.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The entry map could not be serialized.
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Synchronous string key-value store.
pub trait KeyValueStorage: Send + Sync {
    /// Read several keys at once. The result has one slot per key, in order.
    fn get_entries(&self, keys: &[&str]) -> Vec<Option<String>>;

    /// Write all entries as one unit.
    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Remove all keys as one unit. Missing keys are ignored.
    fn remove_entries(&self, keys: &[&str]) -> Result<(), StorageError>;

    /// Read a single key.
    fn get(&self, key: &str) -> Option<String> {
        self.get_entries(&[key]).pop().flatten()
    }
}

fn lock(entries: &Mutex<BTreeMap<String, String>>) -> MutexGuard<'_, BTreeMap<String, String>> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read_keys(map: &BTreeMap<String, String>, keys: &[&str]) -> Vec<Option<String>> {
    keys.iter().map(|k| map.get(*k).cloned()).collect()
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local storage. Used for ephemeral sessions and as a test double.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_entries(&self, keys: &[&str]) -> Vec<Option<String>> {
        read_keys(&lock(&self.entries), keys)
    }

    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries);
        for (k, v) in entries {
            map.insert((*k).to_owned(), (*v).to_owned());
        }
        Ok(())
    }

    fn remove_entries(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries);
        for k in keys {
            map.remove(*k);
        }
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// JSON-file storage. The file holds a single object of string values.
///
/// Entries are cached in memory. Writes reach the cache only after the file
/// has been replaced, so a failed write leaves the previous entries in
/// place. Removals clear the cache first and keep that state even when the
/// file cannot be rewritten. The file is created with owner-only
/// permissions on unix.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open the storage file, creating an empty map if it does not exist.
    ///
    /// An unreadable JSON payload is treated as empty storage and logged;
    /// the next write replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => parse_entries(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "discarding unreadable storage file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path: path.display().to_string(), source }),
        };
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io { path: self.path.display().to_string(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(map).map_err(|e| StorageError::Encode(e.to_string()))?;

        let tmp = self.temp_path();
        if let Err(e) = write_private(&tmp, json.as_bytes()) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(e));
        }
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            io_err(e)
        })
    }

    /// Sibling temp file, unique per process and per write.
    fn temp_path(&self) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(format!(".{}.{seq}.tmp", std::process::id()));
        PathBuf::from(tmp)
    }
}

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Write `bytes` to a new file readable only by the owner (0600 on unix).
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn parse_entries(raw: &str) -> Result<BTreeMap<String, String>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(raw)
}

impl KeyValueStorage for FileStorage {
    fn get_entries(&self, keys: &[&str]) -> Vec<Option<String>> {
        read_keys(&lock(&self.entries), keys)
    }

    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries);
        let mut next = map.clone();
        for (k, v) in entries {
            next.insert((*k).to_owned(), (*v).to_owned());
        }
        self.persist(&next)?;
        *map = next;
        Ok(())
    }

    fn remove_entries(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = lock(&self.entries);
        for k in keys {
            map.remove(*k);
        }
        self.persist(&map)
    }
}
