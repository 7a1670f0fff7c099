use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::{HashingReader, Result, VerifyError};

const READ_BUFFER: usize = 64 * 1024;

pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Vec<u8>;
}

#[derive(Clone, Default)]
pub struct Sha256Hasher(Sha256);

impl Hasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) { self.0.update(data); }
    fn finalize(self) -> Vec<u8> { self.0.finalize().to_vec() }
}

impl Sha256Hasher {
    pub fn new() -> Self { Self(Sha256::new()) }

    pub fn digest(data: &[u8]) -> Vec<u8> { Sha256::digest(data).to_vec() }

    pub fn hex_digest(data: &[u8]) -> String { hex::encode(Self::digest(data)) }
}

/// Drain `reader` and return its SHA-256 as lowercase hex.
pub fn hash_reader<R: Read>(reader: R) -> Result<String> {
    let mut reader = HashingReader::new(reader, Sha256Hasher::new());
    let mut buf = vec![0u8; READ_BUFFER];
    loop {
        if reader.read(&mut buf)? == 0 {
            break;
        }
    }
    Ok(reader.hex_digest())
}

/// SHA-256 of the file at `path` as lowercase hex, no `sha256:` prefix.
pub fn hash_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let read_err = |source| VerifyError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut reader = HashingReader::new(BufReader::new(file), Sha256Hasher::new());
    let mut buf = vec![0u8; READ_BUFFER];
    loop {
        if reader.read(&mut buf).map_err(read_err)? == 0 {
            break;
        }
    }
    Ok(reader.hex_digest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HELLO_WORLD: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_sha256_hasher() {
        let mut hasher = Sha256Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(hex::encode(hasher.finalize()), HELLO_WORLD);
    }

    #[test]
    fn test_hash_reader_empty() {
        assert_eq!(hash_reader(Cursor::new(Vec::new())).unwrap(), EMPTY);
    }

    #[test]
    fn test_hash_file_matches_in_memory_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("artifact.bin");
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        assert_eq!(hash_file(&path).unwrap(), Sha256Hasher::hex_digest(&data));
    }

    #[test]
    fn test_hash_file_missing_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");

        match hash_file(&path) {
            Err(VerifyError::Read { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Read error, got {other:?}"),
        }
    }
}
