use std::path::{Path, PathBuf};

use stowage_verify::normalize_hex;

/// What the server reported about a resource in response to `HEAD`.
///
/// Both fields are optional; a server that publishes neither simply
/// cannot validate a cached copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteDescriptor {
    hash:   Option<String>,
    length: Option<String>,
}

impl RemoteDescriptor {
    /// Build from raw header values. Blank values count as absent, and so
    /// does a checksum that is not a 64-digit hex SHA-256.
    pub fn new(hash: Option<&str>, length: Option<&str>) -> Self {
        Self {
            hash:   hash.and_then(normalize_hex),
            length: length
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
        }
    }

    /// Normalized lowercase hex digest, if the server sent one.
    pub fn hash(&self) -> Option<&str> { self.hash.as_deref() }

    /// `Content-Length` exactly as sent.
    pub fn length(&self) -> Option<&str> { self.length.as_deref() }

    /// `Content-Length` as a number; `None` when absent or malformed.
    pub fn length_bytes(&self) -> Option<u64> { self.length.as_deref()?.parse().ok() }
}

/// A file found at the cache path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntry {
    pub path: PathBuf,
    pub size: u64,
    /// Lowercase hex SHA-256 without prefix.
    pub hash: String,
}

impl LocalEntry {
    pub fn new(path: impl AsRef<Path>, size: u64, hash: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            size,
            hash: hash.into(),
        }
    }
}
