//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the preference evolution domain.

mod errors;
mod ids;
mod score;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{SnapshotId, UserId};
pub use score::{round_to, UnitScore};
pub use timestamp::Timestamp;
