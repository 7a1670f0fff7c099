//! Pure functions: URL handling and the reuse-or-purge decision.
//!
//! Nothing in this module touches the network or the filesystem.

mod path;
mod validation;

pub use path::{cache_path, parse_url, validate_scheme};
pub use validation::{CacheHit, Decision, decide};
