//! GetEvolutionSummary - Query handler for a windowed evolution summary.

use std::sync::Arc;
use tracing::info;

use crate::domain::evolution::{EvolutionSummarizer, EvolutionSummary};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::PreferenceHistoryStore;

/// Query for a viewer's evolution summary.
#[derive(Debug, Clone)]
pub struct GetEvolutionSummaryQuery {
    pub user_id: UserId,
    /// Look-back window; the handler default applies when `None`.
    pub time_range_days: Option<u32>,
}

/// Handler for evolution summaries.
pub struct GetEvolutionSummaryHandler {
    store: Arc<dyn PreferenceHistoryStore>,
    summarizer: EvolutionSummarizer,
    default_range_days: u32,
    history_days: u32,
}

impl GetEvolutionSummaryHandler {
    pub fn new(
        store: Arc<dyn PreferenceHistoryStore>,
        summarizer: EvolutionSummarizer,
        default_range_days: u32,
        history_days: u32,
    ) -> Self {
        Self {
            store,
            summarizer,
            default_range_days,
            history_days,
        }
    }

    pub async fn handle(
        &self,
        query: GetEvolutionSummaryQuery,
    ) -> Result<EvolutionSummary, DomainError> {
        let days = query.time_range_days.unwrap_or(self.default_range_days);
        info!(user_id = %query.user_id, days, "Building preference evolution summary");

        // Never load less than the requested window.
        let history = self
            .store
            .get_preference_history(&query.user_id, self.history_days.max(days))
            .await?;

        Ok(self
            .summarizer
            .summarize(&query.user_id, &history, days, Timestamp::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::preference::{PreferenceSet, PreferenceSnapshot};
    use crate::ports::StorageError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ───────────────────────────────────────────────────────────────
    // Mock store
    // ───────────────────────────────────────────────────────────────

    struct MockStore {
        history: Vec<PreferenceSnapshot>,
        requested_days: Mutex<Vec<u32>>,
    }

    impl MockStore {
        fn new(history: Vec<PreferenceSnapshot>) -> Self {
            Self {
                history,
                requested_days: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PreferenceHistoryStore for MockStore {
        async fn get_preference_history(
            &self,
            _user_id: &UserId,
            days: u32,
        ) -> Result<Vec<PreferenceSnapshot>, StorageError> {
            self.requested_days.lock().unwrap().push(days);
            Ok(self.history.clone())
        }

        async fn save_preference_evolution(
            &self,
            _user_id: &UserId,
            _snapshot: PreferenceSnapshot,
        ) -> Result<(), StorageError> {
            unimplemented!()
        }
    }

    fn handler(store: Arc<MockStore>) -> GetEvolutionSummaryHandler {
        GetEvolutionSummaryHandler::new(store, EvolutionSummarizer::default(), 90, 90)
    }

    fn query(days: Option<u32>) -> GetEvolutionSummaryQuery {
        GetEvolutionSummaryQuery {
            user_id: UserId::new("viewer-9").unwrap(),
            time_range_days: days,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn empty_history_is_no_data() {
        let summary = handler(Arc::new(MockStore::new(Vec::new())))
            .handle(query(None))
            .await
            .unwrap();
        assert!(matches!(summary, EvolutionSummary::NoData { .. }));
    }

    #[tokio::test]
    async fn default_range_applies() {
        let history = vec![PreferenceSnapshot::new(
            Timestamp::now().minus_days(1),
            PreferenceSet::new(),
        )];
        let summary = handler(Arc::new(MockStore::new(history)))
            .handle(query(None))
            .await
            .unwrap();
        let details = summary.details().unwrap();
        assert_eq!(details.time_range_days, 90);
        assert_eq!(details.history_points, 1);
    }

    #[tokio::test]
    async fn narrow_range_excludes_older_snapshots() {
        let history = vec![PreferenceSnapshot::new(
            Timestamp::now().minus_days(20),
            PreferenceSet::new(),
        )];
        let summary = handler(Arc::new(MockStore::new(history)))
            .handle(query(Some(7)))
            .await
            .unwrap();
        assert!(matches!(summary, EvolutionSummary::NoDataInRange { .. }));
    }

    #[tokio::test]
    async fn wide_range_loads_enough_history() {
        let store = Arc::new(MockStore::new(Vec::new()));
        handler(store.clone()).handle(query(Some(365))).await.unwrap();
        handler(store.clone()).handle(query(Some(30))).await.unwrap();
        assert_eq!(*store.requested_days.lock().unwrap(), vec![365, 90]);
    }
}
