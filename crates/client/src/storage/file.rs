//! Local storage backed by one JSON file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{LocalStorage, StorageError};

/// Directory-backed storage: one file per key.
///
/// The directory is created on first write. Writes go through a temporary
/// file and a rename so a crash never leaves a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path_for(key)?) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "boutique-storage-{name}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn test_values_survive_a_new_handle() {
        let dir = scratch_dir("persist");
        let storage = FileStorage::new(&dir);

        assert_eq!(storage.get_item("auth_token").unwrap(), None);
        storage.set_item("auth_token", "abc").unwrap();
        storage.set_item("auth_token", "def").unwrap();

        let reopened = FileStorage::new(&dir);
        assert_eq!(
            reopened.get_item("auth_token").unwrap().as_deref(),
            Some("def")
        );

        reopened.remove_item("auth_token").unwrap();
        reopened.remove_item("auth_token").unwrap();
        assert_eq!(storage.get_item("auth_token").unwrap(), None);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let storage = FileStorage::new(scratch_dir("keys"));
        let err = storage.set_item("../escape", "x").unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert!(storage.get_item("").is_err());
    }
}
