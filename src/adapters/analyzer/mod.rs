//! Preference analyzer adapters

mod static_analyzer;

pub use static_analyzer::StaticPreferenceAnalyzer;
