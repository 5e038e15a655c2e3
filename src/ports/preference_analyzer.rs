//! PreferenceAnalyzer port for current viewer preferences

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::preference::PreferenceSet;

/// Source of a viewer's present-day preferences
#[async_trait]
pub trait PreferenceAnalyzer: Send + Sync {
    /// Current preferences, or `None` when they cannot be determined.
    async fn analyze_user_preferences(
        &self,
        user_id: &UserId,
    ) -> Result<Option<PreferenceSet>, DomainError>;
}
