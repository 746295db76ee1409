//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod hash;
mod media_type;
mod rel_path;
mod skip_patterns;
mod sync_settings;

pub use hash::ContentHash;
pub use media_type::MediaType;
pub use rel_path::{PathError, RelPath};
pub use skip_patterns::SkipPatterns;
pub use sync_settings::SyncSettings;
