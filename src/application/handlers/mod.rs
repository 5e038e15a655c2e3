//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod evolution;

pub use evolution::{
    DetectShiftHandler, DetectShiftQuery, EvolutionHandlers, EvolutionSettings,
    GetEvolutionSummaryHandler, GetEvolutionSummaryQuery, TrackPreferenceEvolutionCommand,
    TrackPreferenceEvolutionHandler, TrackPreferenceEvolutionResult,
};
