//! Preference persistence
//!
//! A durable, synchronous key-value store for page preferences. The only
//! key the engine writes today is [`THEME_KEY`]; absence is meaningful (the
//! system signal takes over). Writes are best-effort: a failing backend is
//! logged at debug level and the session carries on in memory, which is the
//! storage-disabled browser contract.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Storage key for the persisted color scheme.
pub const THEME_KEY: &str = "theme";

/// Failure writing or encoding the preference file. Never surfaces past the
/// store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference encoding failed: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Synchronous key-value preference storage.
pub trait PreferenceStore: Send {
    /// Read a stored value; `None` if never set or cleared externally.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, best-effort. Implementations log failures and return.
    fn set(&mut self, key: &str, value: &str);

    /// Clear a stored value.
    fn remove(&mut self, key: &str);
}

/// In-memory store, the substitutable fake for tests and for hosts with
/// storage disabled.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: FxHashMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// File-backed store: one flat TOML table at a caller-supplied path.
///
/// The file is read once at open; an unreadable or corrupt file is treated
/// as empty. Every write rewrites the file; write failures are logged and
/// swallowed so the in-memory view stays authoritative for the session.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(values) => values,
                Err(err) => {
                    tracing::debug!(path = %path.display(), %err, "corrupt preference file, starting empty");
                    BTreeMap::new()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), %err, "unreadable preference file, starting empty");
                }
                BTreeMap::new()
            }
        };

        Self { path, values }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = toml::to_string(&self.values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Err(err) = self.persist() {
            tracing::debug!(path = %self.path.display(), %err, "preference write failed");
        }
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        if let Err(err) = self.persist() {
            tracing::debug!(path = %self.path.display(), %err, "preference write failed");
        }
    }
}
