//! Key-value stores for persisting the session between restarts.

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::Error;

/// A small string key-value store.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Get the value saved under `key`, or `None` if nothing is saved.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Save `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Remove the value saved under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), Error>;
}

impl<T: KeyValueStore> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.as_ref().get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.as_ref().set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.as_ref().remove(key)
    }
}

/// A store that keeps its entries in a JSON object on disk.
///
/// The whole file is read and rewritten on every call.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file is created on the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_owned(),
            lock: Mutex::new(()),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, Error> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(error) => return Err(storage_error(&self.path, error)),
        };

        serde_json::from_str(&text).map_err(|error| storage_error(&self.path, error))
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), Error> {
        let text =
            serde_json::to_string_pretty(entries).map_err(|error| storage_error(&self.path, error))?;

        std::fs::write(&self.path, text).map_err(|error| storage_error(&self.path, error))
    }

    fn update(&self, change: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::SessionStorage("session file lock poisoned".to_owned()))?;
        let mut entries = self.read_entries()?;
        change(&mut entries);
        self.write_entries(&entries)
    }
}

fn storage_error(path: &Path, error: impl Display) -> Error {
    Error::SessionStorage(format!("{}: {error}", path.display()))
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::SessionStorage("session file lock poisoned".to_owned()))?;

        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

/// A store that only lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, Error> {
        self.entries
            .lock()
            .map_err(|_| Error::SessionStorage("memory store lock poisoned".to_owned()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.entries()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.entries()?.remove(key);
        Ok(())
    }
}
