//! Cache-validating HTTP(S) downloads with offline fallback.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Requests, remote descriptors and options
//! - [`core`] - Pure decisions: cache path, scheme validation, reuse or purge
//! - [`effects`] - Filesystem and network I/O behind trait seams
//!
//! The [`Downloader`] composes them: inspect the cache entry, probe the
//! remote with `HEAD` when an entry exists, then reuse, purge and refetch,
//! or fall back to the cached copy when the remote cannot be reached.

pub mod core;
pub mod data;
pub mod effects;

mod download;
mod error;

pub use crate::core::{CacheHit, Decision, cache_path, decide, parse_url, validate_scheme};
pub use data::{DownloadRequest, FetchOptions, LocalEntry, Progress, RemoteDescriptor, Timeouts};
pub use download::{Downloader, Outcome};
pub use effects::{
    BoxStream, CacheProbe, Fetcher, GetResponse, HeadResponse, HttpClient, LogObserver, LogSink,
    MemorySink, NullSink, ProgressObserver, ProgressStream, RemoteProbe, TracingSink,
};
pub use error::{Error, Result, Stage};

#[cfg(feature = "reqwest")]
pub use download::download;
#[cfg(feature = "reqwest")]
pub use effects::{ReqwestClient, ReqwestClientBuilder};

/// Header that carries the hex SHA-256 of the remote artifact.
pub const CHECKSUM_HEADER: &str = "X-Checksum-Sha256";
