//! TrackPreferenceEvolution - Command handler that snapshots current preferences.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::evolution::{ShiftDetector, ShiftReport};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::preference::{PreferenceSet, PreferenceSnapshot};
use crate::ports::{PreferenceAnalyzer, PreferenceHistoryStore};

/// Command to record a viewer's current preferences.
#[derive(Debug, Clone)]
pub struct TrackPreferenceEvolutionCommand {
    pub user_id: UserId,
}

/// Result of tracking: what was recorded and the shifts detected beforehand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPreferenceEvolutionResult {
    pub tracked_at: Timestamp,
    pub current_preferences: PreferenceSet,
    pub shifts: ShiftReport,
}

/// Handler for tracking preference evolution.
///
/// Shifts are detected on the stored history before the new snapshot is
/// appended, and the report is stored alongside it.
pub struct TrackPreferenceEvolutionHandler {
    analyzer: Arc<dyn PreferenceAnalyzer>,
    store: Arc<dyn PreferenceHistoryStore>,
    detector: ShiftDetector,
    history_days: u32,
}

impl TrackPreferenceEvolutionHandler {
    pub fn new(
        analyzer: Arc<dyn PreferenceAnalyzer>,
        store: Arc<dyn PreferenceHistoryStore>,
        detector: ShiftDetector,
        history_days: u32,
    ) -> Self {
        Self {
            analyzer,
            store,
            detector,
            history_days,
        }
    }

    pub async fn handle(
        &self,
        cmd: TrackPreferenceEvolutionCommand,
    ) -> Result<TrackPreferenceEvolutionResult, DomainError> {
        let user_id = &cmd.user_id;
        info!(user_id = %user_id, "Tracking preference evolution");

        // 1. Current preferences
        let Some(current_preferences) = self.analyzer.analyze_user_preferences(user_id).await?
        else {
            warn!(user_id = %user_id, "Current preferences unavailable");
            return Err(DomainError::new(
                ErrorCode::PreferencesUnavailable,
                "Current preferences unavailable",
            )
            .with_detail("user_id", user_id.as_str()));
        };

        // 2. Shifts over stored history
        let history = self
            .store
            .get_preference_history(user_id, self.history_days)
            .await?;
        let shifts = self.detector.detect(&history);

        // 3. Append snapshot
        let tracked_at = Timestamp::now();
        let snapshot = PreferenceSnapshot::new(tracked_at, current_preferences.clone())
            .with_shifts(shifts.clone());

        if let Err(e) = self.store.save_preference_evolution(user_id, snapshot).await {
            error!(user_id = %user_id, error = %e, "Failed to save preference evolution");
            return Err(e.into());
        }
        info!(user_id = %user_id, "Preference evolution saved");

        Ok(TrackPreferenceEvolutionResult {
            tracked_at,
            current_preferences,
            shifts,
        })
    }
}
