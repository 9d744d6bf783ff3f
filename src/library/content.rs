//! Content-addressed identity for sound files.
//!
//! A sound is identified by the SHA-256 digest of its bytes, rendered as
//! lowercase hex. The digest is the primary key of the catalog, so two files
//! with identical content are the same sound.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

/// Content hash (lowercase hex SHA-256 of the file bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    /// Length of a full hash in hex characters
    pub const HEX_LEN: usize = 64;

    /// Length of the abbreviated form shown in listings
    pub const SHORT_LEN: usize = 7;

    /// Build a hash from raw digest bytes
    pub fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode(digest))
    }

    /// Parse a full hex hash, normalizing to lowercase.
    ///
    /// Returns `None` unless the input is exactly 64 hex characters.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() == Self::HEX_LEN && s.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(s.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Wrap a value read back from the catalog
    pub(crate) fn from_stored(s: String) -> Self {
        Self(s)
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated hash (first 7 hex characters)
    pub fn short(&self) -> &str {
        let end = self.0.len().min(Self::SHORT_LEN);
        &self.0[..end]
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ContentHash {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Self::parse(s).ok_or_else(|| anyhow::anyhow!("Not a SHA-256 hex digest: {}", s))
    }
}

/// Compute the content hash of a file.
///
/// Streams the file through the hasher instead of loading it whole, since
/// raw captures can be large.
pub fn compute_hash(path: &Path) -> io::Result<ContentHash> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(ContentHash::from_digest(&hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_compute_hash_matches_known_digest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("abc.bin");
        std::fs::write(&path, b"abc").unwrap();

        let hash = compute_hash(&path).unwrap();
        assert_eq!(
            hash.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash.short(), "ba7816b");
    }

    #[test]
    fn test_compute_hash_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(compute_hash(&temp.path().join("nope.wav")).is_err());
    }

    #[test]
    fn test_parse_normalizes_case() {
        let upper = "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD";
        let hash = ContentHash::parse(upper).unwrap();
        assert_eq!(hash.as_str(), upper.to_lowercase());

        assert!(ContentHash::parse("ba7816bf").is_none());
        assert!("zz".repeat(32).parse::<ContentHash>().is_err());
    }
}
