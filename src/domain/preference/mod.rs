//! Preference module - Viewer preference snapshots
//!
//! A snapshot captures a viewer's preferences across eight tracked
//! dimensions at one point in time. Each dimension carries its own typed
//! payload:
//!
//! - **Categorical** (genre, narrative, visuals, audio, emotional, themes) -
//!   ordered favourites plus a strength map
//! - **Pace** - an enumerated level from very slow to very fast
//! - **Complexity** - an enumerated level from very simple to very complex
//!
//! Every payload reduces to a scalar in [0, 1] through
//! [`DimensionPreference::metric`]; missing data reduces to 0.5.

mod category;
mod dimension;
mod levels;
mod snapshot;

pub use category::{CategoryPreference, StrengthEntry};
pub use dimension::PreferenceDimension;
pub use levels::{ComplexityLevel, ComplexityPreference, PaceLevel, PacePreference};
pub use snapshot::{DimensionPreference, PreferenceSet, PreferenceSnapshot};
