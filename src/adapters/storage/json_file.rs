//! JSON file history store
//!
//! Keeps each user's history as one JSON array on disk:
//! `{base_dir}/{category}/{user_id}.json`.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::preference::PreferenceSnapshot;
use crate::ports::{within_history_window, PreferenceHistoryStore, StorageError};

/// Filesystem-backed preference history.
///
/// Appends are read-modify-write; a process-wide lock serialises them and
/// the file is replaced atomically through a temporary sibling.
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    base_dir: PathBuf,
    category: String,
    write_lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    pub fn new(base_dir: impl AsRef<Path>, category: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            category: category.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of a user's history file.
    ///
    /// The category must be a single directory name under the base dir.
    pub fn history_path(&self, user_id: &UserId) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(&self.category).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(StorageError::InvalidPath(format!(
                "history category '{}' is not a single directory name",
                self.category
            )));
        }

        Ok(self
            .base_dir
            .join(&self.category)
            .join(format!("{}.json", user_id.as_str())))
    }

    async fn ensure_dir_exists(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("Failed to create directory", e))?;
        }
        Ok(())
    }

    /// Full stored history; a missing file is an empty history.
    async fn read_all(&self, user_id: &UserId) -> Result<Vec<PreferenceSnapshot>, StorageError> {
        let path = self.history_path(user_id)?;
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("Failed to read history", e)),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            StorageError::Serialization(format!("{}: {}", path.display(), e))
        })
    }
}

fn io_error(context: &str, e: std::io::Error) -> StorageError {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        StorageError::PermissionDenied(format!("{}: {}", context, e))
    } else {
        StorageError::Io(format!("{}: {}", context, e))
    }
}

#[async_trait]
impl PreferenceHistoryStore for JsonFileHistoryStore {
    async fn get_preference_history(
        &self,
        user_id: &UserId,
        days: u32,
    ) -> Result<Vec<PreferenceSnapshot>, StorageError> {
        let now = Timestamp::now();
        let history = self.read_all(user_id).await?;
        Ok(history
            .into_iter()
            .filter(|s| within_history_window(s, now, days))
            .collect())
    }

    async fn save_preference_evolution(
        &self,
        user_id: &UserId,
        snapshot: PreferenceSnapshot,
    ) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let path = self.history_path(user_id)?;
        self.ensure_dir_exists(&path).await?;

        let mut history = self.read_all(user_id).await?;
        history.push(snapshot);

        let json = serde_json::to_string_pretty(&history)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .await
            .map_err(|e| io_error("Failed to write temporary file", e))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| io_error("Failed to rename file", e))?;

        tracing::debug!(
            user_id = %user_id,
            points = history.len(),
            path = %path.display(),
            "Saved preference history"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preference::{PaceLevel, PreferenceSet};
    use tempfile::TempDir;

    fn test_user_id() -> UserId {
        UserId::new("viewer-42").unwrap()
    }

    fn snapshot(days_ago: i64, level: PaceLevel) -> PreferenceSnapshot {
        PreferenceSnapshot::new(
            Timestamp::now().minus_days(days_ago),
            PreferenceSet::new().with_pace(level),
        )
    }

    #[tokio::test]
    async fn missing_file_is_empty_history() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileHistoryStore::new(temp_dir.path(), "preference_history");

        let history = store
            .get_preference_history(&test_user_id(), 90)
            .await
            .unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn save_appends_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileHistoryStore::new(temp_dir.path(), "preference_history");
        let user_id = test_user_id();

        store
            .save_preference_evolution(&user_id, snapshot(2, PaceLevel::Slow))
            .await
            .unwrap();
        store
            .save_preference_evolution(&user_id, snapshot(1, PaceLevel::Fast))
            .await
            .unwrap();

        let path = store.history_path(&user_id).unwrap();
        assert!(path.ends_with("preference_history/viewer-42.json"));
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let history = store.get_preference_history(&user_id, 90).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history[1].preferences.pace.as_ref().unwrap().preferred_pace,
            PaceLevel::Fast
        );
    }

    #[tokio::test]
    async fn history_is_limited_to_window() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileHistoryStore::new(temp_dir.path(), "preference_history");
        let user_id = test_user_id();

        store
            .save_preference_evolution(&user_id, snapshot(120, PaceLevel::Slow))
            .await
            .unwrap();
        store
            .save_preference_evolution(&user_id, snapshot(10, PaceLevel::Fast))
            .await
            .unwrap();

        assert_eq!(store.get_preference_history(&user_id, 90).await.unwrap().len(), 1);
        assert_eq!(store.get_preference_history(&user_id, 365).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn reads_loosely_shaped_history() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileHistoryStore::new(temp_dir.path(), "preference_history");
        let user_id = test_user_id();
        let recent = Timestamp::now().minus_days(1).to_rfc3339();

        let raw = format!(
            r#"[
                {{"analyzed_at": "{}", "preferences": {{"pace": {{"preferred_pace": "fast"}}, "genre": 7}}}},
                {{"timestamp": "not-a-date", "preferences": null}}
            ]"#,
            recent
        );
        let path = store.history_path(&user_id).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, raw).unwrap();

        let history = store.get_preference_history(&user_id, 90).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].preferences.genre.is_none());
        assert_eq!(
            history[0].preferences.pace.as_ref().unwrap().preferred_pace,
            PaceLevel::Fast
        );
        assert!(history[1].captured_at().is_none());
    }

    #[tokio::test]
    async fn corrupt_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileHistoryStore::new(temp_dir.path(), "preference_history");
        let user_id = test_user_id();

        let path = store.history_path(&user_id).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let result = store.get_preference_history(&user_id, 90).await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[tokio::test]
    async fn record_with_both_time_keys_does_not_fail_history() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileHistoryStore::new(temp_dir.path(), "preference_history");
        let user_id = test_user_id();
        let newer = Timestamp::now().minus_days(1).to_rfc3339();
        let older = Timestamp::now().minus_days(2).to_rfc3339();

        let raw = format!(
            r#"[
                {{"analyzed_at": "{older}", "preferences": {{"pace": {{"preferred_pace": "slow"}}}}}},
                {{"timestamp": "{newer}", "analyzed_at": "{older}", "preferences": {{"pace": {{"preferred_pace": "fast"}}}}}}
            ]"#
        );
        let path = store.history_path(&user_id).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, raw).unwrap();

        let history = store.get_preference_history(&user_id, 90).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history[0].captured_at(),
            Some(Timestamp::parse_flexible(&older).unwrap())
        );
        assert_eq!(
            history[1].captured_at(),
            Some(Timestamp::parse_flexible(&newer).unwrap())
        );

        // The extra key survives a rewrite.
        store
            .save_preference_evolution(&user_id, snapshot(0, PaceLevel::Moderate))
            .await
            .unwrap();
        let history = store.get_preference_history(&user_id, 90).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].analyzed_at.as_deref(), Some(older.as_str()));
    }

    #[tokio::test]
    async fn escaping_category_is_invalid_path() {
        let temp_dir = TempDir::new().unwrap();
        let user_id = test_user_id();

        for category in ["../outside", "", "nested/dir", "/abs"] {
            let store = JsonFileHistoryStore::new(temp_dir.path(), category);
            assert!(
                matches!(store.history_path(&user_id), Err(StorageError::InvalidPath(_))),
                "{:?}",
                category
            );
            let result = store
                .save_preference_evolution(&user_id, snapshot(0, PaceLevel::Fast))
                .await;
            assert!(matches!(result, Err(StorageError::InvalidPath(_))));
            let result = store.get_preference_history(&user_id, 90).await;
            assert!(matches!(result, Err(StorageError::InvalidPath(_))));
        }
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
