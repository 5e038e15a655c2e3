//! PreferenceHistoryStore port for persisted preference snapshots

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::preference::PreferenceSnapshot;

/// Errors that can occur while reading or writing history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        let code = match &err {
            StorageError::Serialization(_) => ErrorCode::SerializationError,
            _ => ErrorCode::StorageError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Append-only history of preference snapshots, one log per user
#[async_trait]
pub trait PreferenceHistoryStore: Send + Sync {
    /// Snapshots in stored order, limited to the last `days` days.
    ///
    /// Snapshots whose timestamp cannot be parsed are kept; callers decide
    /// what to do with them.
    async fn get_preference_history(
        &self,
        user_id: &UserId,
        days: u32,
    ) -> Result<Vec<PreferenceSnapshot>, StorageError>;

    /// Appends a snapshot to the user's history.
    async fn save_preference_evolution(
        &self,
        user_id: &UserId,
        snapshot: PreferenceSnapshot,
    ) -> Result<(), StorageError>;
}

/// True when `snapshot` belongs in a `days` window ending at `now`.
///
/// Unparseable timestamps are retained.
pub fn within_history_window(
    snapshot: &PreferenceSnapshot,
    now: crate::domain::foundation::Timestamp,
    days: u32,
) -> bool {
    match snapshot.captured_at() {
        Some(ts) => ts >= now.minus_days(i64::from(days)),
        None => true,
    }
}
