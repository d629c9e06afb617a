//! File-backed storage.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use tracing::warn;

use crate::domain::storage::{KeyValueStorage, errors::StorageError};

type Entries = BTreeMap<String, String>;

/// Storage kept as a single JSON object on disk, one member per key.
///
/// Writes go to a sibling temporary file first and are renamed into place, so
/// a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Storage backed by the JSON file at `path`, created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling of `path` with `.tmp` appended, never `path` itself.
    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();

        staging.push(".tmp");

        PathBuf::from(staging)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.lock
            .lock()
            .map_err(|poisoned| StorageError::Poisoned(poisoned.to_string()))
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Entries::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            fs::create_dir_all(parent)?;
        }

        let staging = self.staging_path();

        fs::write(&staging, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&staging, &self.path)?;

        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock()?;

        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock()?;

        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StorageError::Serialization(source)) => {
                warn!(path = %self.path.display(), "discarding unreadable storage file: {source}");

                Entries::new()
            }
            Err(error) => return Err(error),
        };

        entries.insert(key.to_string(), value.to_string());

        self.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_file_reads_as_empty() -> TestResult {
        let dir = tempdir()?;
        let storage = FileStorage::new(dir.path().join("storage.json"));

        assert_eq!(storage.get("@RocketShoes:cart")?, None);

        Ok(())
    }

    #[test]
    fn values_survive_a_new_instance() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("storage.json");

        FileStorage::new(&path).set("@RocketShoes:cart", "[]")?;
        FileStorage::new(&path).set("theme", "dark")?;

        let reopened = FileStorage::new(&path);

        assert_eq!(reopened.get("@RocketShoes:cart")?.as_deref(), Some("[]"));
        assert_eq!(reopened.get("theme")?.as_deref(), Some("dark"));
        assert!(
            !dir.path().join("nested").join("storage.json.tmp").exists(),
            "staging file should be renamed away"
        );

        Ok(())
    }

    #[test]
    fn corrupt_file_fails_reads() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("storage.json");

        fs::write(&path, "{ not json")?;

        let result = FileStorage::new(&path).get("@RocketShoes:cart");

        assert!(
            matches!(result, Err(StorageError::Serialization(_))),
            "expected Serialization error, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn corrupt_file_is_replaced_on_write() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("storage.json");

        fs::write(&path, "{ not json")?;

        let storage = FileStorage::new(&path);

        storage.set("@RocketShoes:cart", "[]")?;

        assert_eq!(storage.get("@RocketShoes:cart")?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn path_ending_in_tmp_still_stages_elsewhere() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("cart.tmp");
        let storage = FileStorage::new(&path);

        assert_eq!(storage.staging_path(), dir.path().join("cart.tmp.tmp"));

        storage.set("@RocketShoes:cart", "[]")?;
        storage.set("theme", "dark")?;

        assert_eq!(storage.get("@RocketShoes:cart")?.as_deref(), Some("[]"));
        assert_eq!(storage.get("theme")?.as_deref(), Some("dark"));
        assert!(
            !storage.staging_path().exists(),
            "staging file should be renamed away"
        );

        Ok(())
    }
}
