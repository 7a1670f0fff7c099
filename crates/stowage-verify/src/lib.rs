//! SHA-256 content hashing for cached artifacts.
//!
//! Digests are exchanged as lowercase hex strings without an algorithm
//! prefix, which is the form servers publish in `X-Checksum-Sha256`.
//!
//! # Example
//!
//! ```
//! use stowage_verify::{HashingReader, Sha256Hasher};
//!
//! let data = b"hello world";
//! let mut reader = HashingReader::new(&data[..], Sha256Hasher::new());
//! let mut sink = Vec::new();
//! std::io::copy(&mut reader, &mut sink).unwrap();
//!
//! assert_eq!(sink, data);
//! assert_eq!(
//!     reader.hex_digest(),
//!     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
//! );
//! ```

pub use self::digest::{digests_match, normalize_hex, parse_digest};
pub use self::error::{Result, VerifyError};
pub use self::hasher::{Hasher, Sha256Hasher, hash_file, hash_reader};
pub use self::reader::HashingReader;

mod digest;
mod error;
mod hasher;
mod reader;
