//! String key-value stores backing the session cache.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session store at {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode session value for {context}: {source}")]
    Encode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A per-session string store: `get`, `set` and `remove` by key, nothing else.
pub trait SessionStore {
    /// # Errors
    ///
    /// Returns [`SessionError`] when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// # Errors
    ///
    /// Returns [`SessionError`] when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;

    /// # Errors
    ///
    /// Returns [`SessionError`] when the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// In-process store. Lives as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object (`{"key": "value", ...}`) in a file.
///
/// The file is re-read on every `get` so separate CLI invocations see each
/// other's writes. Writes go to a temp file in the same directory which then
/// replaces the original.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), SessionError> {
        let encoded = serde_json::to_string_pretty(values).map_err(|e| SessionError::Encode {
            context: self.path.display().to_string(),
            source: e,
        })?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| self.io_error(e))?;
        tmp.write_all(encoded.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path)
            .map(|_| ())
            .map_err(|e| self.io_error(e.error))
    }

    /// Loads for a write. A corrupt file is replaced rather than blocking
    /// every future write.
    fn load_for_write(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match self.load() {
            Err(SessionError::Corrupt { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "replacing corrupt session file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut values = self.load_for_write()?;
        values.insert(key.to_owned(), value.to_owned());
        self.save(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        let mut values = self.load_for_write()?;
        if values.remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));
        assert_eq!(store.get("zeptoValidatedLocations").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut writer = FileStore::new(&path);
        writer.set("a", "[1]").unwrap();
        writer.set("b", "[2]").unwrap();

        let reader = FileStore::new(&path);
        assert_eq!(reader.get("a").unwrap().as_deref(), Some("[1]"));
        assert_eq!(reader.get("b").unwrap().as_deref(), Some("[2]"));

        writer.remove("a").unwrap();
        assert_eq!(reader.get("a").unwrap(), None);
    }

    #[test]
    fn file_store_reports_corrupt_file_on_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("k"),
            Err(SessionError::Corrupt { .. })
        ));
    }

    #[test]
    fn file_store_write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{\"k\": 5}").unwrap();

        let mut store = FileStore::new(&path);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
