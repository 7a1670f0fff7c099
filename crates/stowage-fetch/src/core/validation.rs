use stowage_verify::digests_match;

use crate::data::{LocalEntry, RemoteDescriptor};

/// Why a cached file may be used as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHit {
    /// Local hash equals the remote hash.
    Verified,
    /// Local size equals the remote `Content-Length`; content unconfirmed.
    Weak,
    /// The remote could not be consulted.
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Reuse(CacheHit),
    /// Delete the local file and fetch again.
    Purge,
}

/// Decide what to do with a cached entry.
///
/// `remote` is `None` when the metadata probe failed. Precedence is
/// offline, then hash, then length. With `strict_hash`, a remote hash that
/// disagrees with the local one rules out the length comparison.
pub fn decide(local: &LocalEntry, remote: Option<&RemoteDescriptor>, strict_hash: bool) -> Decision {
    let Some(remote) = remote else {
        return Decision::Reuse(CacheHit::Offline);
    };

    if let Some(remote_hash) = remote.hash() {
        if digests_match(&local.hash, remote_hash) {
            return Decision::Reuse(CacheHit::Verified);
        }
        if strict_hash {
            return Decision::Purge;
        }
    }

    match remote.length_bytes() {
        Some(length) if length == local.size => Decision::Reuse(CacheHit::Weak),
        _ => Decision::Purge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
    const OTHER: &str = "0000000000000000000000000000000000000000000000000000000000000000";

    fn local() -> LocalEntry { LocalEntry::new("/cache/a.tar", 11, HASH) }

    #[test]
    fn test_probe_failure_reuses() {
        assert_eq!(decide(&local(), None, false), Decision::Reuse(CacheHit::Offline));
        assert_eq!(decide(&local(), None, true), Decision::Reuse(CacheHit::Offline));
    }

    #[test]
    fn test_hash_match_wins() {
        let remote = RemoteDescriptor::new(Some(HASH), Some("999"));
        assert_eq!(
            decide(&local(), Some(&remote), false),
            Decision::Reuse(CacheHit::Verified)
        );
    }

    #[test]
    fn test_hash_match_is_case_insensitive() {
        let remote = RemoteDescriptor::new(Some(HASH.to_uppercase().as_str()), None);
        assert_eq!(
            decide(&local(), Some(&remote), true),
            Decision::Reuse(CacheHit::Verified)
        );
    }

    #[test]
    fn test_length_match_without_hash() {
        let remote = RemoteDescriptor::new(None, Some("11"));
        assert_eq!(decide(&local(), Some(&remote), false), Decision::Reuse(CacheHit::Weak));
        assert_eq!(decide(&local(), Some(&remote), true), Decision::Reuse(CacheHit::Weak));
    }

    #[test]
    fn test_length_match_after_hash_mismatch() {
        let remote = RemoteDescriptor::new(Some(OTHER), Some("11"));
        assert_eq!(decide(&local(), Some(&remote), false), Decision::Reuse(CacheHit::Weak));
    }

    #[test]
    fn test_strict_hash_refuses_length_match() {
        let remote = RemoteDescriptor::new(Some(OTHER), Some("11"));
        assert_eq!(decide(&local(), Some(&remote), true), Decision::Purge);
    }

    #[test]
    fn test_strict_hash_ignores_malformed_checksum() {
        let junk = RemoteDescriptor::new(Some("not-a-digest"), Some("11"));
        let absent = RemoteDescriptor::new(None, Some("11"));
        assert_eq!(decide(&local(), Some(&junk), true), Decision::Reuse(CacheHit::Weak));
        assert_eq!(
            decide(&local(), Some(&junk), true),
            decide(&local(), Some(&absent), true)
        );
    }

    #[test]
    fn test_everything_differs() {
        let remote = RemoteDescriptor::new(Some(OTHER), Some("12"));
        assert_eq!(decide(&local(), Some(&remote), false), Decision::Purge);
    }

    #[test]
    fn test_nothing_reported() {
        let remote = RemoteDescriptor::default();
        assert_eq!(decide(&local(), Some(&remote), false), Decision::Purge);
    }

    #[test]
    fn test_malformed_length_never_matches() {
        let remote = RemoteDescriptor::new(None, Some("eleven"));
        assert_eq!(decide(&local(), Some(&remote), false), Decision::Purge);
    }
}
