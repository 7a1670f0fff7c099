use std::time::Duration;

use crate::CHECKSUM_HEADER;

/// Deadlines for the network steps of a download.
///
/// `None` waits indefinitely. A probe that runs out of time is treated
/// like an unreachable server; a transfer that runs out of time fails the
/// call and leaves no partial file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub probe:    Option<Duration>,
    pub transfer: Option<Duration>,
}

impl Timeouts {
    pub fn new() -> Self { Self::default() }

    pub fn probe(mut self, timeout: Duration) -> Self {
        self.probe = Some(timeout);
        self
    }

    pub fn transfer(mut self, timeout: Duration) -> Self {
        self.transfer = Some(timeout);
        self
    }
}

/// Configuration for cache validation and transfer.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use stowage_fetch::{FetchOptions, Timeouts};
///
/// let options = FetchOptions::default()
///     .timeouts(Timeouts::new().probe(Duration::from_secs(5)))
///     .strict_hash(true);
/// assert_eq!(options.checksum_header, "X-Checksum-Sha256");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeouts: Timeouts,

    /// Response header holding the remote SHA-256.
    ///
    /// Default: `X-Checksum-Sha256`
    pub checksum_header: String,

    /// When the server reports a hash that differs from the local one,
    /// refetch even if the lengths agree.
    ///
    /// Default: false
    pub strict_hash: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeouts:        Timeouts::default(),
            checksum_header: CHECKSUM_HEADER.to_string(),
            strict_hash:     false,
        }
    }
}

impl FetchOptions {
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn checksum_header(mut self, name: impl Into<String>) -> Self {
        self.checksum_header = name.into();
        self
    }

    pub fn strict_hash(mut self, strict: bool) -> Self {
        self.strict_hash = strict;
        self
    }
}
