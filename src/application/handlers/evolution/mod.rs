//! Preference evolution handlers.
//!
//! Commands:
//! - `TrackPreferenceEvolutionCommand` - snapshot current preferences with detected shifts
//!
//! Queries:
//! - `DetectShiftQuery` - recent trend plus forecast
//! - `GetEvolutionSummaryQuery` - ranked changes over a time window

mod detect_shift;
mod get_evolution_summary;
mod track_evolution;

pub use detect_shift::{DetectShiftHandler, DetectShiftQuery};
pub use get_evolution_summary::{GetEvolutionSummaryHandler, GetEvolutionSummaryQuery};
pub use track_evolution::{
    TrackPreferenceEvolutionCommand, TrackPreferenceEvolutionHandler,
    TrackPreferenceEvolutionResult,
};

use std::sync::Arc;

use crate::domain::evolution::{EvolutionSummarizer, ShiftDetector};
use crate::ports::{PreferenceAnalyzer, PreferenceHistoryStore};

/// Evolution handlers wired to shared ports.
///
/// Built once at startup and passed to whatever drives the application.
#[derive(Clone)]
pub struct EvolutionHandlers {
    pub detect_shift: Arc<DetectShiftHandler>,
    pub track_evolution: Arc<TrackPreferenceEvolutionHandler>,
    pub get_summary: Arc<GetEvolutionSummaryHandler>,
}

/// Analysis settings shared by the evolution handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionSettings {
    pub detector: ShiftDetector,
    pub summarizer: EvolutionSummarizer,
    /// Days of history loaded for shift detection.
    pub history_days: u32,
    /// Summary window when a query does not give one.
    pub summary_range_days: u32,
}

impl EvolutionHandlers {
    pub fn new(
        settings: EvolutionSettings,
        store: Arc<dyn PreferenceHistoryStore>,
        analyzer: Arc<dyn PreferenceAnalyzer>,
    ) -> Self {
        Self {
            detect_shift: Arc::new(DetectShiftHandler::new(
                store.clone(),
                settings.detector,
                settings.history_days,
            )),
            track_evolution: Arc::new(TrackPreferenceEvolutionHandler::new(
                analyzer,
                store.clone(),
                settings.detector,
                settings.history_days,
            )),
            get_summary: Arc::new(GetEvolutionSummaryHandler::new(
                store,
                settings.summarizer,
                settings.summary_range_days,
                settings.history_days,
            )),
        }
    }
}
