//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `preference` - Preference snapshots and per-dimension payloads
//! - `evolution` - Trend analysis, forecasting, and summaries over history

pub mod evolution;
pub mod foundation;
pub mod preference;
