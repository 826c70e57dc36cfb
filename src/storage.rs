//! The key-value storage port and its two implementations.
//!
//! The port mirrors the external browser-profile store: string keys, string
//! values, no transactions across keys. `MemoryStore` backs the server state
//! and tests; `FileStore` keeps the same surface on a JSON file for local
//! runs that should survive a restart.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Get/set/delete over named string values. Writes are best-effort: failures
/// are reported through the `Result` but callers keep their in-memory state
/// either way.
pub trait StoragePort: Send + Sync {
  fn get(&self, key: &str) -> Option<String>;
  fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
  fn delete(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
  #[error("storage write failed: {0}")]
  Write(#[from] std::io::Error),
}

/// Plain in-memory store.
#[derive(Default)]
pub struct MemoryStore {
  values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl StoragePort for MemoryStore {
  fn get(&self, key: &str) -> Option<String> {
    self.values.lock().ok()?.get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
    if let Ok(mut values) = self.values.lock() {
      values.insert(key.to_string(), value.to_string());
    }
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<(), StorageError> {
    if let Ok(mut values) = self.values.lock() {
      values.remove(key);
    }
    Ok(())
  }
}

/// File-backed store: one JSON object, rewritten on every mutation.
pub struct FileStore {
  path: PathBuf,
  values: Mutex<HashMap<String, String>>,
}

impl FileStore {
  /// Open (or create) the store at `path`. An unreadable or malformed file
  /// starts the store empty rather than failing.
  pub fn open(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let values = match std::fs::read_to_string(&path) {
      Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(target: "storage", path = %path.display(), error = %e, "Malformed store file; starting empty");
        HashMap::new()
      }),
      Err(_) => HashMap::new(),
    };
    Self { path, values: Mutex::new(values) }
  }

  fn flush(&self, values: &HashMap<String, String>) -> Result<(), StorageError> {
    let raw = serde_json::to_string_pretty(values).unwrap_or_else(|_| "{}".into());
    std::fs::write(&self.path, raw)?;
    Ok(())
  }
}

impl StoragePort for FileStore {
  fn get(&self, key: &str) -> Option<String> {
    self.values.lock().ok()?.get(key).cloned()
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
    let mut values = match self.values.lock() {
      Ok(v) => v,
      Err(_) => return Ok(()),
    };
    values.insert(key.to_string(), value.to_string());
    self.flush(&values)
  }

  fn delete(&self, key: &str) -> Result<(), StorageError> {
    let mut values = match self.values.lock() {
      Ok(v) => v,
      Err(_) => return Ok(()),
    };
    values.remove(key);
    self.flush(&values)
  }
}
