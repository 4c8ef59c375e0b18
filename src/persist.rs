//! State Persistence
//!
//! Reads and writes the `AppState` snapshot. Storage sits behind
//! `StateStorage` so the merge rules can be exercised without a browser.

use serde_json::Value;
use thiserror::Error;

use crate::config::STORAGE_KEY;
use crate::store::AppState;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("local storage access failed: {0}")]
    Access(String),
    #[error("stored snapshot is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("stored snapshot is not a JSON object")]
    NotAnObject,
    #[error("stored snapshot does not match the state shape: {0}")]
    Shape(#[source] serde_json::Error),
    #[error("failed to serialize state: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// String key-value storage
pub trait StateStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Access(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl StateStorage for BrowserStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }
}

/// Parse a stored snapshot, backfilling top-level keys from the defaults.
///
/// Only missing top-level keys are filled; a present nested object such as
/// `taskVisibility` is taken as stored.
pub fn merge_with_defaults(raw: &str) -> Result<AppState, StorageError> {
    let parsed: Value = serde_json::from_str(raw).map_err(StorageError::Parse)?;
    let Value::Object(mut saved) = parsed else {
        return Err(StorageError::NotAnObject);
    };

    let defaults = serde_json::to_value(AppState::default()).map_err(StorageError::Serialize)?;
    if let Value::Object(defaults) = defaults {
        for (key, value) in defaults {
            saved.entry(key).or_insert(value);
        }
    }

    serde_json::from_value(Value::Object(saved)).map_err(StorageError::Shape)
}

/// Snapshot under `STORAGE_KEY`, if any
pub fn try_load(storage: &impl StateStorage) -> Result<Option<AppState>, StorageError> {
    match storage.read(STORAGE_KEY)? {
        Some(raw) if !raw.is_empty() => merge_with_defaults(&raw).map(Some),
        _ => Ok(None),
    }
}

/// Initial state: the stored snapshot, or the defaults when there is none
/// or it cannot be used.
pub fn load_state(storage: &impl StateStorage) -> AppState {
    match try_load(storage) {
        Ok(Some(state)) => {
            tracing::info!(tasks = state.tasks.len(), "restored saved state");
            state
        }
        Ok(None) => AppState::default(),
        Err(error) => {
            tracing::warn!(%error, "ignoring saved state");
            AppState::default()
        }
    }
}

pub fn save_state(storage: &impl StateStorage, state: &AppState) -> Result<(), StorageError> {
    let json = serde_json::to_string(state).map_err(StorageError::Serialize)?;
    storage.write(STORAGE_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskStatus, TaskVisibility};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        entries: RefCell<HashMap<String, String>>,
        broken: bool,
    }

    impl MemoryStorage {
        fn with(raw: &str) -> Self {
            let storage = Self::default();
            storage.entries.borrow_mut().insert(STORAGE_KEY.to_string(), raw.to_string());
            storage
        }
    }

    impl StateStorage for MemoryStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.broken {
                return Err(StorageError::Unavailable);
            }
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.broken {
                return Err(StorageError::Unavailable);
            }
            self.entries.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_missing_snapshot_gives_defaults() {
        assert_eq!(load_state(&MemoryStorage::default()), AppState::default());
    }

    #[test]
    fn test_malformed_snapshot_gives_defaults() {
        for raw in ["{not json", "null", "42", "[1,2]", r#"{"tasks": "nope"}"#] {
            assert_eq!(load_state(&MemoryStorage::with(raw)), AppState::default(), "input {}", raw);
        }
    }

    #[test]
    fn test_unavailable_storage_gives_defaults() {
        let storage = MemoryStorage { broken: true, ..Default::default() };
        assert_eq!(load_state(&storage), AppState::default());
        assert!(save_state(&storage, &AppState::default()).is_err());
    }

    #[test]
    fn test_partial_snapshot_is_backfilled() {
        let raw = r#"{
            "tasks": [{"id": 1, "tag": "@a", "title": "x", "status": 1, "archived": false}],
            "darkMode": true,
            "customCSS": "body { color: red; }",
            "somethingElse": 5
        }"#;
        let state = load_state(&MemoryStorage::with(raw));

        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].status, TaskStatus::Done);
        assert!(state.dark_mode);
        assert_eq!(state.custom_css, "body { color: red; }");

        let defaults = AppState::default();
        assert_eq!(state.show_quick_help, defaults.show_quick_help);
        assert_eq!(state.task_visibility, defaults.task_visibility);
        assert_eq!(state.last_sync, 0);
    }

    #[test]
    fn test_one_bad_task_keeps_rest_of_snapshot() {
        let raw = r#"{
            "tasks": [
                {"id": 1, "tag": "@a", "title": "kept", "status": 1},
                {"id": 2, "title": "no tag", "status": 3},
                {"id": 3, "tag": "@a", "title": "bad status", "status": 42}
            ],
            "darkMode": true
        }"#;
        let state = merge_with_defaults(raw).unwrap();

        let ids: Vec<u32> = state.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(state.tasks[1].tag, crate::config::DEFAULT_TAG);
        assert!(state.dark_mode);
    }

    #[test]
    fn test_every_default_key_present_after_merge() {
        let state = merge_with_defaults(r#"{"showToday": true}"#).unwrap();
        let merged = serde_json::to_value(&state).unwrap();
        let defaults = serde_json::to_value(AppState::default()).unwrap();

        let merged = merged.as_object().unwrap();
        for key in defaults.as_object().unwrap().keys() {
            assert!(merged.contains_key(key), "missing {}", key);
        }
        assert_eq!(merged["showToday"], serde_json::json!(true));
    }

    #[test]
    fn test_nested_visibility_is_not_deep_merged() {
        let state = merge_with_defaults(r#"{"taskVisibility": {"done": false}}"#).unwrap();
        assert_eq!(
            state.task_visibility,
            TaskVisibility { done: false, flagged: false, wait: false, wip: false }
        );
    }

    #[test]
    fn test_save_then_load_keeps_state() {
        let storage = MemoryStorage::default();
        let mut state = AppState::default();
        state.auth_token = "token".into();
        state.last_sync = 1_700_000_000_000;
        state.history.push("c 1");

        save_state(&storage, &state).unwrap();
        let raw = storage.entries.borrow().get(STORAGE_KEY).cloned().unwrap();
        assert!(raw.contains("\"customCSS\""));
        assert!(raw.contains("\"lastSync\":1700000000000"));

        assert_eq!(load_state(&storage), state);
    }
}
