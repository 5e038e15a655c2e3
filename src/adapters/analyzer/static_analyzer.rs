//! Static preference analyzer
//!
//! Serves preference sets registered up front instead of deriving them from
//! viewing activity. Backs the CLI and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::preference::PreferenceSet;
use crate::ports::PreferenceAnalyzer;

#[derive(Debug, Clone, Default)]
pub struct StaticPreferenceAnalyzer {
    preferences: Arc<RwLock<HashMap<UserId, PreferenceSet>>>,
}

impl StaticPreferenceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the preferences returned for `user_id`.
    pub async fn register(&self, user_id: UserId, preferences: PreferenceSet) {
        self.preferences.write().await.insert(user_id, preferences);
    }

    /// Builds an analyzer answering for one user from a JSON preference file.
    ///
    /// Unknown top-level keys are ignored, so analyzer output carrying extra
    /// fields such as `status` loads as-is.
    pub async fn from_json_file(
        user_id: UserId,
        path: impl AsRef<Path>,
    ) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::NotFound,
                format!("Cannot read preferences file {}: {}", path.display(), e),
            )
        })?;
        let preferences: PreferenceSet = serde_json::from_str(&raw).map_err(|e| {
            DomainError::new(
                ErrorCode::SerializationError,
                format!("Invalid preferences file {}: {}", path.display(), e),
            )
        })?;

        let analyzer = Self::new();
        analyzer.register(user_id, preferences).await;
        Ok(analyzer)
    }
}

#[async_trait]
impl PreferenceAnalyzer for StaticPreferenceAnalyzer {
    async fn analyze_user_preferences(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PreferenceSet>, DomainError> {
        Ok(self.preferences.read().await.get(user_id).cloned())
    }
}
