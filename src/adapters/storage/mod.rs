//! Preference history store adapters
//!
//! - `JsonFileHistoryStore` - one JSON array per user on the local filesystem
//! - `InMemoryHistoryStore` - process-local map for tests and development

mod in_memory;
mod json_file;

pub use in_memory::InMemoryHistoryStore;
pub use json_file::JsonFileHistoryStore;
