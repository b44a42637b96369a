//! JSON file store

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use core_kernel::{KeyValueStore, PortError, StorageOp};

use crate::error::StorageError;

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a single JSON object
///
/// Entries are cached in memory after [`FileStore::open`]; every write goes
/// through a full-file replace so batches are all-or-nothing.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileStore {
    /// Opens the store, treating a missing file as empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = load(&path)?;
        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened session file");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Opens the store, replacing a corrupt file with an empty one
    ///
    /// Used at startup so an unreadable session file signs the user out
    /// instead of blocking every command. I/O errors still propagate.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        match Self::open(path.clone()) {
            Err(StorageError::Corrupt { source, .. }) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %source,
                    "Session file is corrupt, starting signed out"
                );
                let entries = Entries::new();
                persist(&path, &entries)?;
                Ok(Self {
                    path,
                    entries: Mutex::new(entries),
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn commit(&self, ops: &[StorageOp]) -> Result<(), StorageError> {
        let mut entries = self.lock();

        let mut next = entries.clone();
        for op in ops {
            match op {
                StorageOp::Set { key, value } => {
                    next.insert(key.clone(), value.clone());
                }
                StorageOp::Delete { key } => {
                    next.remove(key);
                }
            }
        }

        if next == *entries {
            return Ok(());
        }

        persist(&self.path, &next)?;
        *entries = next;
        tracing::debug!(path = %self.path.display(), ops = ops.len(), "Committed storage batch");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        self.commit(&[StorageOp::set(key, value)])?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), PortError> {
        self.commit(&[StorageOp::delete(key)])?;
        Ok(())
    }

    fn apply(&self, ops: &[StorageOp]) -> Result<(), PortError> {
        self.commit(ops)?;
        Ok(())
    }
}

fn load(path: &Path) -> Result<Entries, StorageError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
        Err(e) => return Err(StorageError::io(path, e)),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Entries::new());
    }

    serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn persist(path: &Path, entries: &Entries) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }

    let body = serde_json::to_vec_pretty(entries)?;
    let tmp = temp_path(path);

    let write = || -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&body)?;
        file.sync_all()
    };
    if let Err(e) = write() {
        let _ = fs::remove_file(&tmp);
        return Err(StorageError::io(&tmp, e));
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StorageError::io(path, e)
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "store".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_is_sibling() {
        let tmp = temp_path(Path::new("/var/lib/claims/session.json"));
        assert_eq!(tmp, PathBuf::from("/var/lib/claims/session.json.tmp"));
    }
}
