//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Preference history stores (JSON files, in-memory)
//! - `analyzer` - Sources of current viewer preferences

pub mod analyzer;
pub mod storage;

pub use analyzer::StaticPreferenceAnalyzer;
pub use storage::{InMemoryHistoryStore, JsonFileHistoryStore};
