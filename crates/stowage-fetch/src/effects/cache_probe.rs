use std::path::{Path, PathBuf};

use crate::data::LocalEntry;
use crate::error::{Error, Result};

/// Looks at the file sitting at a cache path.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheProbe;

impl CacheProbe {
    /// Size and SHA-256 of the file at `path`, or `None` if there is none.
    ///
    /// Hashing runs on the blocking pool so large artifacts do not stall
    /// the runtime. Any failure other than "not found" is returned.
    pub async fn inspect(&self, path: &Path) -> Result<Option<LocalEntry>> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::inspect_blocking(&path))
            .await
            .map_err(|e| Error::Task(e.to_string()))?
    }

    fn inspect_blocking(path: &Path) -> Result<Option<LocalEntry>> {
        let Some(size) = stowage_fs::stat_file(path)? else {
            return Ok(None);
        };
        let hash = stowage_verify::hash_file(path)?;
        Ok(Some(LocalEntry::new(path, size, hash)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inspect_absent() {
        let dir = tempfile::tempdir().unwrap();
        let entry = CacheProbe.inspect(&dir.path().join("a.tar")).await.unwrap();
        assert_eq!(entry, None);
    }

    #[tokio::test]
    async fn test_inspect_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.tar");
        std::fs::write(&path, b"hello world").unwrap();

        let entry = CacheProbe.inspect(&path).await.unwrap().unwrap();
        assert_eq!(entry.path, path);
        assert_eq!(entry.size, 11);
        assert_eq!(
            entry.hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[tokio::test]
    async fn test_inspect_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = CacheProbe.inspect(dir.path()).await;
        assert!(matches!(result, Err(Error::Fs(stowage_fs::Error::NotAFile { .. }))));
    }
}
