use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{Error, Result};

/// Parse an absolute URL.
pub fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::InvalidUrl {
        url:    raw.to_string(),
        reason: e.to_string(),
    })
}

/// Reject anything but `http` and `https`.
///
/// # Examples
///
/// ```
/// use stowage_fetch::{parse_url, validate_scheme};
///
/// assert!(validate_scheme(&parse_url("https://example.com/a.tar").unwrap()).is_ok());
/// assert!(validate_scheme(&parse_url("ftp://example.com/a.tar").unwrap()).is_err());
/// ```
pub fn validate_scheme(url: &Url) -> Result<()> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::UnsupportedScheme {
            url:    url.to_string(),
            scheme: other.to_string(),
        }),
    }
}

/// Cache location for `url`: `cache_dir` joined with the last path segment.
///
/// Query and fragment are ignored, so URLs that differ only there share
/// an entry, as do URLs on different hosts with the same file name.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use stowage_fetch::{cache_path, parse_url};
///
/// let url = parse_url("https://example.com/images/rootfs.tar?sig=abc").unwrap();
/// let path = cache_path(Path::new("/cache"), &url).unwrap();
/// assert_eq!(path, Path::new("/cache/rootfs.tar"));
/// ```
pub fn cache_path(cache_dir: &Path, url: &Url) -> Result<PathBuf> {
    let name = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .ok_or_else(|| Error::MissingFileName {
            url: url.to_string(),
        })?;

    Ok(cache_dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url { parse_url(raw).unwrap() }

    #[test]
    fn test_cache_path_uses_basename() {
        let dir = Path::new("/var/cache");
        assert_eq!(
            cache_path(dir, &url("http://mirror.example/a/b/c/image.qcow2")).unwrap(),
            dir.join("image.qcow2")
        );
    }

    #[test]
    fn test_cache_path_collides_on_basename() {
        let dir = Path::new("/var/cache");
        let a = cache_path(dir, &url("https://one.example/x/file.tgz")).unwrap();
        let b = cache_path(dir, &url("https://two.example/y/file.tgz")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cache_path_requires_file_name() {
        let dir = Path::new("/var/cache");
        assert!(matches!(
            cache_path(dir, &url("https://example.com/")),
            Err(Error::MissingFileName { .. })
        ));
        assert!(matches!(
            cache_path(dir, &url("https://example.com/dir/")),
            Err(Error::MissingFileName { .. })
        ));
    }

    #[test]
    fn test_parse_url_rejects_relative() {
        assert!(matches!(
            parse_url("rootfs.tar"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_validate_scheme() {
        assert!(validate_scheme(&url("http://example.com/a")).is_ok());
        assert!(validate_scheme(&url("https://example.com/a")).is_ok());

        match validate_scheme(&url("file:///tmp/a")) {
            Err(Error::UnsupportedScheme { scheme, .. }) => assert_eq!(scheme, "file"),
            other => panic!("expected UnsupportedScheme, got {other:?}"),
        }
    }
}
