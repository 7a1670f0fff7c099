//! Filesystem primitives for cache entries.
//!
//! - [`stat_file`] distinguishes "absent" from real failures.
//! - [`remove_entry`] purges an entry, tolerating one that is already gone.
//! - [`StagedFile`] writes beside the destination and renames into place on
//!   commit; an uncommitted staging file is removed when dropped.

mod error;
mod staged;

pub use error::{Error, Result};
pub use staged::StagedFile;

use std::io::ErrorKind;
use std::path::Path;

/// Size of the regular file at `path`, or `None` if nothing exists there.
pub fn stat_file(path: impl AsRef<Path>) -> Result<Option<u64>> {
    let path = path.as_ref();
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(Some(meta.len())),
        Ok(_) => Err(Error::NotAFile {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::Stat {
            path:   path.to_path_buf(),
            source: e,
        }),
    }
}

/// Remove whatever lives at `path`. A missing entry is not an error.
pub fn remove_entry(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(Error::Stat {
                path:   path.to_path_buf(),
                source: e,
            });
        }
    };

    let removed = if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match removed {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Remove {
            path:   path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_stat_file_absent() {
        let dir = tempdir().unwrap();
        assert_eq!(stat_file(dir.path().join("nope")).unwrap(), None);
    }

    #[test]
    fn test_stat_file_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.bin");
        std::fs::write(&path, [0u8; 42]).unwrap();
        assert_eq!(stat_file(&path).unwrap(), Some(42));
    }

    #[test]
    fn test_stat_file_rejects_directory() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            stat_file(dir.path()),
            Err(Error::NotAFile { .. })
        ));
    }

    #[test]
    fn test_remove_entry_missing_is_ok() {
        let dir = tempdir().unwrap();
        remove_entry(dir.path().join("gone")).unwrap();
    }

    #[test]
    fn test_remove_entry_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("f"), b"x").unwrap();

        remove_entry(dir.path().join("a")).unwrap();
        assert!(!dir.path().join("a").exists());
    }
}
