use crate::{Result, VerifyError};

const SHA256_PREFIX: &str = "sha256:";
const SHA256_LEN: usize = 32;

/// Parse a published SHA-256 digest into its canonical form: trimmed,
/// `sha256:` prefix removed, lowercase.
///
/// Anything that does not decode to exactly 32 bytes is rejected with
/// [`VerifyError::InvalidDigest`].
pub fn parse_digest(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let bare = match trimmed.get(..SHA256_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(SHA256_PREFIX) => &trimmed[SHA256_PREFIX.len()..],
        _ => trimmed,
    };
    let bare = bare.trim();

    match hex::decode(bare) {
        Ok(bytes) if bytes.len() == SHA256_LEN => Ok(bare.to_ascii_lowercase()),
        _ => Err(VerifyError::InvalidDigest(raw.to_string())),
    }
}

/// Like [`parse_digest`], but malformed or empty input yields `None`.
pub fn normalize_hex(raw: &str) -> Option<String> { parse_digest(raw).ok() }

/// Compare two digests after normalization. Malformed digests never match.
pub fn digests_match(local: &str, remote: &str) -> bool {
    match (normalize_hex(local), normalize_hex(remote)) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_normalize_strips_prefix_and_case() {
        let upper = format!("  SHA256:{} \n", DIGEST.to_uppercase());
        assert_eq!(normalize_hex(&upper).as_deref(), Some(DIGEST));
        assert_eq!(normalize_hex(DIGEST).as_deref(), Some(DIGEST));
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_hex(""), None);
        assert_eq!(normalize_hex("   "), None);
        assert_eq!(normalize_hex("sha256:"), None);
    }

    #[test]
    fn test_malformed_digest_is_rejected() {
        assert!(matches!(
            parse_digest("not-a-digest"),
            Err(VerifyError::InvalidDigest(raw)) if raw == "not-a-digest"
        ));
        // Valid hex, wrong length.
        assert_eq!(normalize_hex("abcdef"), None);
        assert_eq!(normalize_hex(&DIGEST[..63]), None);
        assert_eq!(normalize_hex(&format!("{DIGEST}00")), None);
    }

    #[test]
    fn test_digests_match() {
        assert!(digests_match(DIGEST, &DIGEST.to_uppercase()));
        assert!(digests_match(DIGEST, &format!("sha256:{DIGEST}")));
        assert!(!digests_match(DIGEST, &DIGEST.replace('a', "b")));
        assert!(!digests_match("", ""));
        assert!(!digests_match(DIGEST, ""));
        assert!(!digests_match("zz", "zz"));
    }
}
