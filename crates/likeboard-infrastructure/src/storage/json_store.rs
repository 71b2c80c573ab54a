//! Atomic JSON key-value file.
//!
//! The whole store is one JSON object of string values. Every mutation takes
//! an exclusive file lock, re-reads the file, applies the change and writes it
//! back through a temp file + rename.

use likeboard_core::LikeboardError;
use likeboard_core::storage::KeyValueStore;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

type Entries = BTreeMap<String, String>;

/// Errors that can occur during JSON store operations.
#[derive(Debug)]
pub enum JsonStoreError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing or serialization error.
    ParseError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for JsonStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonStoreError::IoError(e) => write!(f, "I/O error: {}", e),
            JsonStoreError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            JsonStoreError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for JsonStoreError {}

impl From<std::io::Error> for JsonStoreError {
    fn from(e: std::io::Error) -> Self {
        JsonStoreError::IoError(e)
    }
}

impl From<serde_json::Error> for JsonStoreError {
    fn from(e: serde_json::Error) -> Self {
        JsonStoreError::ParseError(e)
    }
}

impl From<JsonStoreError> for LikeboardError {
    fn from(e: JsonStoreError) -> Self {
        LikeboardError::storage(e.to_string())
    }
}

/// File-backed [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads all entries. A missing or empty file is an empty store.
    fn load(&self) -> Result<Entries, JsonStoreError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &Entries) -> Result<(), JsonStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = create_private(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Locked read-modify-write.
    fn update<F>(&self, f: F) -> Result<(), JsonStoreError>
    where
        F: FnOnce(&mut Entries) -> bool,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut entries = self.load()?;
        if f(&mut entries) {
            self.save(&entries)?;
        }

        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf, JsonStoreError> {
        let invalid = |msg: &str| {
            let kind = std::io::ErrorKind::InvalidInput;
            JsonStoreError::IoError(std::io::Error::new(kind, msg.to_string()))
        };
        let parent = self.path.parent().ok_or_else(|| invalid("Path has no parent directory"))?;
        let file_name = self.path.file_name().ok_or_else(|| invalid("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> likeboard_core::Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> likeboard_core::Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })?;
        tracing::debug!(key, path = %self.path.display(), "Stored session entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> likeboard_core::Result<()> {
        self.update(|entries| entries.remove(key).is_some())?;
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> likeboard_core::Result<()> {
        self.update(|entries| {
            let mut changed = false;
            for key in keys {
                changed |= entries.remove(*key).is_some();
            }
            changed
        })?;
        Ok(())
    }
}

/// Creates a fresh file that only the owner can read, since the store holds a
/// bearer token. A stale file from an interrupted write is replaced, so its
/// permissions never carry over.
fn create_private(path: &Path) -> Result<File, JsonStoreError> {
    if path.exists() {
        fs::remove_file(path)?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    Ok(options.open(path)?)
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, JsonStoreError> {
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
                .map_err(|e| JsonStoreError::LockError(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("session.json"));

        assert_eq!(store.get("authToken").unwrap(), None);

        store.set("authToken", "abc").unwrap();
        store.set("user", r#"{"id":1}"#).unwrap();
        assert_eq!(store.get("authToken").unwrap(), Some("abc".to_string()));

        store.remove("authToken").unwrap();
        assert_eq!(store.get("authToken").unwrap(), None);
        assert_eq!(store.get("user").unwrap(), Some(r#"{"id":1}"#.to_string()));
    }

    #[test]
    fn test_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("session.json");

        JsonFileStore::new(path.clone()).set("authToken", "abc").unwrap();

        let reopened = JsonFileStore::new(path);
        assert_eq!(reopened.get("authToken").unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_remove_all_clears_both_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("session.json"));
        store.set("authToken", "abc").unwrap();
        store.set("user", "{}").unwrap();

        store.remove_all(&["authToken", "user"]).unwrap();

        assert_eq!(store.get("authToken").unwrap(), None);
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn test_no_temp_or_lock_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let store = JsonFileStore::new(path.clone());

        store.set("authToken", "abc").unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".session.json.tmp").exists());
        assert!(!temp_dir.path().join("session.lock").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        // Leftover from an interrupted write, world-readable.
        let stale = temp_dir.path().join(".session.json.tmp");
        fs::write(&stale, "{}").unwrap();
        fs::set_permissions(&stale, fs::Permissions::from_mode(0o644)).unwrap();

        JsonFileStore::new(path.clone()).set("authToken", "abc").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!stale.exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(path);
        let result = store.get("authToken");
        assert!(matches!(result, Err(LikeboardError::Storage(_))));
    }
}
