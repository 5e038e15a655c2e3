//! DetectShift - Query handler for current trend and predicted shift.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::evolution::{ShiftDetector, ShiftReport};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::PreferenceHistoryStore;

/// Query to detect preference shifts for a viewer.
#[derive(Debug, Clone)]
pub struct DetectShiftQuery {
    pub user_id: UserId,
}

/// Handler for detecting preference shifts.
pub struct DetectShiftHandler {
    store: Arc<dyn PreferenceHistoryStore>,
    detector: ShiftDetector,
    history_days: u32,
}

impl DetectShiftHandler {
    pub fn new(
        store: Arc<dyn PreferenceHistoryStore>,
        detector: ShiftDetector,
        history_days: u32,
    ) -> Self {
        Self {
            store,
            detector,
            history_days,
        }
    }

    pub async fn handle(&self, query: DetectShiftQuery) -> Result<ShiftReport, DomainError> {
        info!(user_id = %query.user_id, "Detecting preference shifts");

        let history = self
            .store
            .get_preference_history(&query.user_id, self.history_days)
            .await?;
        debug!(user_id = %query.user_id, points = history.len(), "Loaded preference history");

        Ok(self.detector.detect(&history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evolution::{ForecastReport, TrendReport};
    use crate::domain::foundation::{ErrorCode, Timestamp};
    use crate::domain::preference::{PaceLevel, PreferenceSet, PreferenceSnapshot};
    use crate::ports::StorageError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ───────────────────────────────────────────────────────────────
    // Mock store
    // ───────────────────────────────────────────────────────────────

    struct MockStore {
        history: Vec<PreferenceSnapshot>,
        requested_days: Mutex<Option<u32>>,
        fail: bool,
    }

    impl MockStore {
        fn with_history(history: Vec<PreferenceSnapshot>) -> Self {
            Self {
                history,
                requested_days: Mutex::new(None),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::with_history(Vec::new())
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
            *self.requested_days.lock().unwrap() = Some(days);
            if self.fail {
                return Err(StorageError::Io("disk unavailable".to_string()));
            }
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

    fn query() -> DetectShiftQuery {
        DetectShiftQuery {
            user_id: UserId::new("viewer-7").unwrap(),
        }
    }

    fn pace_history(n: usize) -> Vec<PreferenceSnapshot> {
        let start = Timestamp::now().minus_days(n as i64);
        (0..n)
            .map(|i| {
                PreferenceSnapshot::new(
                    start.plus_days(i as i64),
                    PreferenceSet::new().with_pace(PaceLevel::Fast),
                )
            })
            .collect()
    }

    // ───────────────────────────────────────────────────────────────
    // Tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn empty_history_is_insufficient_on_both_paths() {
        let handler = DetectShiftHandler::new(
            Arc::new(MockStore::with_history(Vec::new())),
            ShiftDetector::default(),
            90,
        );
        let report = handler.handle(query()).await.unwrap();
        assert_eq!(report.current_trend, TrendReport::InsufficientData);
        assert_eq!(report.predicted_shift, ForecastReport::InsufficientData);
    }

    #[tokio::test]
    async fn requests_configured_history_window() {
        let store = Arc::new(MockStore::with_history(pace_history(3)));
        let handler = DetectShiftHandler::new(store.clone(), ShiftDetector::default(), 45);

        let report = handler.handle(query()).await.unwrap();
        assert!(report.current_trend.analysis().is_some());
        assert_eq!(*store.requested_days.lock().unwrap(), Some(45));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let handler =
            DetectShiftHandler::new(Arc::new(MockStore::failing()), ShiftDetector::default(), 90);
        let err = handler.handle(query()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
