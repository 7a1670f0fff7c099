use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Error, Result};

static STAGE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A file written next to its destination and moved into place on commit.
///
/// The destination path never holds partial content: readers see either
/// the previous state or the complete new file. Dropping an uncommitted
/// `StagedFile` deletes the staging file.
#[derive(Debug)]
pub struct StagedFile {
    staging_path:     PathBuf,
    destination_path: PathBuf,
    committed:        bool,
}

impl StagedFile {
    /// Create an empty staging file for `destination` and open it for writing.
    pub fn create(destination: impl AsRef<Path>) -> Result<(Self, File)> {
        let destination_path = destination.as_ref().to_path_buf();
        let parent = destination_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = destination_path
            .file_name()
            .ok_or_else(|| Error::InvalidDestination {
                path: destination_path.clone(),
            })?
            .to_string_lossy();

        let staging_path = parent.join(format!(
            ".{name}.{}-{}.part",
            std::process::id(),
            STAGE_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&staging_path)
            .map_err(|e| Error::Write {
                path:   staging_path.clone(),
                source: e,
            })?;

        Ok((
            Self {
                staging_path,
                destination_path,
                committed: false,
            },
            file,
        ))
    }

    pub fn path(&self) -> &Path { &self.staging_path }

    /// Rename the staging file onto the destination, replacing any file there.
    pub fn commit(mut self) -> Result<PathBuf> {
        std::fs::rename(&self.staging_path, &self.destination_path).map_err(|e| {
            Error::Rename {
                from:   self.staging_path.clone(),
                to:     self.destination_path.clone(),
                source: e,
            }
        })?;
        self.committed = true;
        Ok(self.destination_path.clone())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.staging_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_staged_file_lives_beside_destination() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("artifact.tar");
        let (staged, _file) = StagedFile::create(&dest).unwrap();

        assert_eq!(staged.path().parent(), Some(dir.path()));
        assert_ne!(staged.path(), dest.as_path());
        assert!(staged.path().exists());
        assert!(!dest.exists());
    }

    #[test]
    fn test_staged_file_commit() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("artifact.tar");
        let (staged, mut file) = StagedFile::create(&dest).unwrap();
        file.write_all(b"payload").unwrap();
        drop(file);

        let staging = staged.path().to_path_buf();
        assert_eq!(staged.commit().unwrap(), dest);
        assert_eq!(std::fs::read(&dest).unwrap(), b"payload");
        assert!(!staging.exists());
    }

    #[test]
    fn test_staged_file_cleanup_on_drop() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("artifact.tar");
        let staging = {
            let (staged, mut file) = StagedFile::create(&dest).unwrap();
            file.write_all(b"partial").unwrap();
            staged.path().to_path_buf()
        };

        assert!(!staging.exists());
        assert!(!dest.exists());
    }

    #[test]
    fn test_staged_file_missing_directory() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing/artifact.tar");
        assert!(matches!(StagedFile::create(&dest), Err(Error::Write { .. })));
    }
}
