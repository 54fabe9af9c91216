//! Known-user state — the only durable state the agent owns.
//!
//! Persists a [`StateFile`] JSON document at the configured path. Writes go
//! to a `.tmp` sibling first and are renamed over the canonical file, so a
//! crash mid-write never leaves a torn document behind.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use collwarden_core::KnownUsers;

use crate::error::{read_err, write_err, SyncError};

/// On-disk state payload.
///
/// `updated_at` is absent in files written before it existed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StateFile {
    pub known_user_ids: KnownUsers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Load/save access to the state file at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next save is staged in.
    pub fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Load the known users.
    ///
    /// Returns an empty set if the file does not exist yet. The containing
    /// directory is created if missing.
    pub fn load(&self) -> Result<KnownUsers, SyncError> {
        Ok(self.load_file()?.known_user_ids)
    }

    /// Load the full state document.
    pub fn load_file(&self) -> Result<StateFile, SyncError> {
        if let Some(dir) = self.dir() {
            std::fs::create_dir_all(dir).map_err(|e| read_err(dir, e))?;
        }
        if !self.path.exists() {
            return Ok(StateFile::default());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|e| read_err(&self.path, e))?;
        serde_json::from_str(&contents).map_err(|source| SyncError::StateCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the persisted known users atomically.
    ///
    /// Writes to `<path>.tmp` then renames to `<path>`.
    pub fn save(&self, known: &KnownUsers) -> Result<(), SyncError> {
        if let Some(dir) = self.dir() {
            std::fs::create_dir_all(dir).map_err(|e| write_err(dir, e))?;
        }

        let state = StateFile {
            known_user_ids: known.clone(),
            updated_at: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&state)
            .map_err(|e| write_err(&self.path, std::io::Error::other(e)))?;

        let tmp = self.tmp_path();
        std::fs::write(&tmp, json).map_err(|e| write_err(&tmp, e))?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(write_err(&self.path, e));
        }
        Ok(())
    }

    fn dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use collwarden_core::UserId;
    use tempfile::TempDir;

    use super::*;

    fn users(ids: &[i64]) -> KnownUsers {
        ids.iter().copied().map(UserId).collect()
    }

    #[test]
    fn empty_when_file_missing_and_dir_created() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path().join("data").join("user_state.json"));
        let known = store.load().unwrap();
        assert!(known.is_empty());
        assert!(tmp.path().join("data").is_dir());
    }

    #[test]
    fn roundtrip_save_load() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path().join("user_state.json"));
        store.save(&users(&[7, 1, 3])).unwrap();

        assert_eq!(store.load().unwrap(), users(&[1, 3, 7]));
        assert!(store.load_file().unwrap().updated_at.is_some());
    }

    #[test]
    fn ids_written_sorted() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path().join("user_state.json"));
        store.save(&users(&[9, 2, 5])).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["known_user_ids"], serde_json::json!([2, 5, 9]));
    }

    #[test]
    fn tmp_file_cleaned_up_after_save() {
        let tmp = TempDir::new().unwrap();
        let store = StateStore::new(tmp.path().join("user_state.json"));
        store.save(&users(&[1])).unwrap();
        assert_eq!(store.tmp_path(), tmp.path().join("user_state.json.tmp"));
        assert!(
            !store.tmp_path().exists(),
            "tmp file should be removed after atomic rename"
        );
    }

    #[test]
    fn load_file_without_updated_at() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user_state.json");
        std::fs::write(&path, "{\n  \"known_user_ids\": [1, 2]\n}").unwrap();

        let state = StateStore::new(&path).load_file().unwrap();
        assert_eq!(state.known_user_ids, users(&[1, 2]));
        assert_eq!(state.updated_at, None);
    }

    #[test]
    fn corrupt_file_is_reported_not_repaired() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user_state.json");
        std::fs::write(&path, "{\"known_user_ids\": [1, 2").unwrap();

        let err = StateStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SyncError::StateCorrupt { .. }), "got: {err}");
        assert!(err.is_fatal());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"known_user_ids\": [1, 2",
            "corrupt file must be left untouched"
        );
    }

    #[test]
    fn wrong_shape_is_corrupt() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("user_state.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let err = StateStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SyncError::StateCorrupt { .. }), "got: {err}");
    }

    #[test]
    fn save_into_unwritable_location_fails_with_write_error() {
        let tmp = TempDir::new().unwrap();
        // A regular file where the parent directory should be.
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let store = StateStore::new(blocker.join("user_state.json"));

        let err = store.save(&users(&[1])).unwrap_err();
        assert!(matches!(err, SyncError::StateWriteFailed { .. }), "got: {err}");
        assert!(!err.is_fatal());
    }
}
