//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PreferenceHistoryStore` - Per-user append-only snapshot history
//! - `PreferenceAnalyzer` - Source of a viewer's current preferences

mod preference_analyzer;
mod preference_history_store;

pub use preference_analyzer::PreferenceAnalyzer;
pub use preference_history_store::{within_history_window, PreferenceHistoryStore, StorageError};
