use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use workout_tracker_lib::store::{KeyValueStore, StoreError};

/// Key-value store keeping one file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens the store, creating `dir` if it doesn't exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .map_err(|err| StoreError::Io(format!("Failed to create store directory {:?}: {err}", dir)))?;
        }

        tracing::debug!("Opened file store at {:?}", dir);
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let file_name: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();

        if file_name.is_empty() {
            return Err(StoreError::Io(format!("Illegal store key: {key:?}")));
        }

        Ok(self.dir.join(format!("{file_name}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(format!("Failed to read {:?}: {err}", path))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        // Write next to the target and rename, so a crash never leaves half a record
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|err| match err.kind() {
            ErrorKind::StorageFull => StoreError::QuotaExceeded(format!("{:?}", path)),
            _ => StoreError::Io(format!("Failed to write {:?}: {err}", tmp)),
        })?;
        fs::rename(&tmp, &path).map_err(|err| StoreError::Io(format!("Failed to replace {:?}: {err}", path)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(format!("Failed to remove {:?}: {err}", path))),
        }
    }
}
