//! Session-scoped storage of the current upload.
//!
//! The pipeline never touches storage directly; callers persist the
//! [`UploadedFile`] through a [`SessionStore`] and read it back when the
//! analytics view loads.

use crate::error::{CoreError, CoreResult};
use crate::upload::UploadedFile;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;

/// Key under which the most recent upload is stored.
pub const CURRENT_FILE_KEY: &str = "currentFile";

/// A string key-value store scoped to one user session.
pub trait SessionStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn load(&self, key: &str) -> CoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> CoreResult<()>;

    /// Persist `file` as the session's current upload.
    fn save_current_file(&self, file: &UploadedFile) -> CoreResult<()> {
        self.save(CURRENT_FILE_KEY, &serde_json::to_string(file)?)
    }

    /// The session's current upload, if one was saved.
    fn load_current_file(&self) -> CoreResult<Option<UploadedFile>> {
        match self.load(CURRENT_FILE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

/// In-process store, dropped with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::Store("session store lock poisoned".to_string())
}

impl SessionStore for MemoryStore {
    fn load(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

/// Store keeping one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> CoreResult<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    /// Directory holding the store's files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> CoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(CoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SessionStore for FileStore {
    fn load(&self, key: &str) -> CoreResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes to a temporary file in the store directory, then renames it
    /// over `<key>.json`, so readers see either the old or the new document.
    fn save(&self, key: &str, value: &str) -> CoreResult<()> {
        let path = self.path_for(key)?;
        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(value.as_bytes())?;
        staged.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        match std::fs::remove_file(self.path_for(key)?) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartsheet_sheet::{CellValue, FileInfo, Table};

    fn uploaded() -> UploadedFile {
        let table = Table::from_grid(
            "Sheet1",
            vec![
                vec!["Month".into(), "Sales".into()],
                vec!["Jan".into(), 100.into()],
                vec!["Feb".into(), CellValue::Null],
                vec!["Mar".into(), "250".into(), 1.5.into(), true.into()],
            ],
        )
        .unwrap();
        UploadedFile::new(&FileInfo::new("sales.xlsx", None, 4096), table, "user-1")
    }

    fn exercise(store: &dyn SessionStore) {
        assert_eq!(store.load("k").unwrap(), None);
        store.save("k", "v1").unwrap();
        store.save("k", "v2").unwrap();
        assert_eq!(store.load("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.load("k").unwrap(), None);

        assert!(store.load_current_file().unwrap().is_none());
        let file = uploaded();
        store.save_current_file(&file).unwrap();
        assert_eq!(store.load_current_file().unwrap(), Some(file));
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("session")).unwrap();
        exercise(&store);
        assert!(store.dir().join("currentFile.json").exists());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let file = uploaded();
        FileStore::open(dir.path()).unwrap().save_current_file(&file).unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load_current_file().unwrap(), Some(file));
    }

    #[test]
    fn test_file_store_reads_never_see_partial_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let old = "a".repeat(4 * 1024 * 1024);
        let new = "b".repeat(4 * 1024 * 1024);
        store.save("k", &old).unwrap();

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for i in 0..40 {
                    let value = if i % 2 == 0 { &new } else { &old };
                    store.save("k", value).unwrap();
                }
            });
            for _ in 0..400 {
                let loaded = store.load("k").unwrap().unwrap();
                assert!(loaded == old || loaded == new, "read {} bytes", loaded.len());
            }
        });

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        for key in ["", "../escape", "a/b", "dot.ted"] {
            assert!(matches!(store.save(key, "x"), Err(CoreError::InvalidKey(_))), "{key}");
        }
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let store = MemoryStore::new();
        store.save(CURRENT_FILE_KEY, "{not json").unwrap();
        assert!(matches!(store.load_current_file(), Err(CoreError::Json(_))));
    }
}
