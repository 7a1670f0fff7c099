//! Immutable data types for cached downloads.
//!
//! Nothing here is persisted: a cache entry is identified by its path
//! alone, and remote metadata is fetched fresh on every call.

pub mod descriptor;
pub mod options;
pub mod progress;
pub mod request;

pub use descriptor::{LocalEntry, RemoteDescriptor};
pub use options::{FetchOptions, Timeouts};
pub use progress::Progress;
pub use request::DownloadRequest;
