use std::io::{self, Read};

use crate::Hasher;

/// Pass-through reader that hashes every byte it hands out.
pub struct HashingReader<R, H> {
    reader: R,
    hasher: Option<H>,
    digest: Option<Vec<u8>>,
}

impl<R, H> HashingReader<R, H> {
    pub fn new(reader: R, hasher: H) -> Self {
        Self {
            reader,
            hasher: Some(hasher),
            digest: None,
        }
    }
}

impl<R, H: Hasher> HashingReader<R, H> {
    /// Finalize the digest. Later reads are still forwarded but no longer hashed.
    pub fn digest(&mut self) -> &[u8] {
        if let Some(hasher) = self.hasher.take() {
            self.digest = Some(hasher.finalize());
        }
        self.digest.as_deref().unwrap_or_default()
    }

    pub fn hex_digest(&mut self) -> String { hex::encode(self.digest()) }
}

impl<R: Read, H: Hasher> Read for HashingReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        if let Some(hasher) = self.hasher.as_mut() {
            hasher.update(&buf[..n]);
        }
        Ok(n)
    }
}
