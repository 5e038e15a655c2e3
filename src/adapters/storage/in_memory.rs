//! In-memory history store
//!
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::preference::PreferenceSnapshot;
use crate::ports::{within_history_window, PreferenceHistoryStore, StorageError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    histories: Arc<RwLock<HashMap<UserId, Vec<PreferenceSnapshot>>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a user's whole history.
    pub async fn seed(&self, user_id: &UserId, history: Vec<PreferenceSnapshot>) {
        self.histories.write().await.insert(user_id.clone(), history);
    }

    /// Stored snapshots for a user regardless of age.
    pub async fn snapshot_count(&self, user_id: &UserId) -> usize {
        self.histories
            .read()
            .await
            .get(user_id)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl PreferenceHistoryStore for InMemoryHistoryStore {
    async fn get_preference_history(
        &self,
        user_id: &UserId,
        days: u32,
    ) -> Result<Vec<PreferenceSnapshot>, StorageError> {
        let now = Timestamp::now();
        let histories = self.histories.read().await;
        Ok(histories
            .get(user_id)
            .map(|history| {
                history
                    .iter()
                    .filter(|s| within_history_window(s, now, days))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn save_preference_evolution(
        &self,
        user_id: &UserId,
        snapshot: PreferenceSnapshot,
    ) -> Result<(), StorageError> {
        self.histories
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .push(snapshot);
        Ok(())
    }
}
