//! JSON Store
//!
//! Load/save of a whole record collection to one file. A missing file or a
//! file containing only whitespace is an empty collection.
//!
//! Every operation on a store holds its mutex for the whole
//! load → mutate → save sequence, so two requests touching the same
//! collection cannot lose each other's writes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage errors (file unreadable/unwritable, malformed JSON)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Read a collection file
pub fn read_records<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(text).map_err(|e| StoreError::json(path, e))
}

/// Write a collection file in full (pretty-printed, UTF-8 kept literal)
///
/// The content goes to a sibling temp file first and is renamed over the
/// target, so readers never see a half-written collection.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> StoreResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }

    let content = serde_json::to_string_pretty(records).map_err(|e| StoreError::json(path, e))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content).map_err(|e| StoreError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

/// One collection file guarded by its own lock
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the whole collection
    pub fn load<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        let _guard = self.lock.lock();
        read_records(&self.path)
    }

    /// Overwrite the whole collection
    pub fn save<T: Serialize>(&self, records: &[T]) -> StoreResult<()> {
        let _guard = self.lock.lock();
        write_records(&self.path, records)
    }

    /// Load, apply `mutate`, save; all under the lock.
    ///
    /// If loading fails nothing is written. The guard is released on every
    /// return path.
    pub fn update<T, R, F>(&self, mutate: F) -> StoreResult<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> R,
    {
        let _guard = self.lock.lock();
        let mut records = read_records(&self.path)?;
        let result = mutate(&mut records);
        write_records(&self.path, &records)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.into(),
            text: text.into(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("missing.json"));
        let notes: Vec<Note> = store.load().unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.json");
        fs::write(&path, "  \n\t ").unwrap();

        let notes: Vec<Note> = JsonStore::new(&path).load().unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("notes.json"));
        let notes = vec![note("1", "Hyvää päivää"), note("2", "kiitos")];

        store.save(&notes).unwrap();
        let loaded: Vec<Note> = store.load().unwrap();
        assert_eq!(loaded, notes);
    }

    #[test]
    fn test_save_keeps_non_ascii_and_indents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        write_records(&path, &[note("1", "Lisätiedot")]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Lisätiedot"));
        assert!(raw.contains("\n  {"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/notes.json");
        write_records(&path, &[note("1", "x")]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{\"id\": ").unwrap();

        let result: StoreResult<Vec<Note>> = JsonStore::new(&path).load();
        assert!(matches!(result, Err(StoreError::Json { .. })));
    }

    #[test]
    fn test_update_does_not_write_when_load_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonStore::new(&path);
        let result = store.update(|notes: &mut Vec<Note>| notes.push(note("1", "x")));
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_concurrent_updates_do_not_lose_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::new(dir.path().join("notes.json")));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        store
                            .update(|notes: &mut Vec<Note>| {
                                notes.push(note(&format!("{t}-{i}"), "x"))
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let notes: Vec<Note> = store.load().unwrap();
        assert_eq!(notes.len(), 200);
    }
}
