//! Content hashing using blake3.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Convert to hex string.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 16 hex chars are enough to tell files apart in logs
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Hash a file's contents without loading it into memory.
pub fn compute_file_hash(path: &Path) -> io::Result<ContentHash> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(ContentHash::new(*hasher.finalize().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_content_hash_display() {
        let hash = ContentHash::new([0xab; 32]);
        assert_eq!(format!("{}", hash), "abababababababab");
        assert_eq!(hash.to_hex().len(), 64);
    }

    #[test]
    fn test_compute_file_hash() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.svg");
        let b = dir.path().join("b.svg");
        fs::write(&a, "<svg/>").unwrap();
        fs::write(&b, "<svg/>").unwrap();

        let hash_a = compute_file_hash(&a).unwrap();
        assert_eq!(hash_a, compute_file_hash(&b).unwrap());
        assert_eq!(hash_a, ContentHash::new(*blake3::hash(b"<svg/>").as_bytes()));

        fs::write(&b, "<svg></svg>").unwrap();
        assert_ne!(hash_a, compute_file_hash(&b).unwrap());
    }

    #[test]
    fn test_compute_file_hash_large_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.svg");
        let content = vec![b'x'; 200 * 1024 + 7];
        fs::write(&path, &content).unwrap();

        let expected = ContentHash::new(*blake3::hash(&content).as_bytes());
        assert_eq!(compute_file_hash(&path).unwrap(), expected);
    }

    #[test]
    fn test_compute_file_hash_nonexistent() {
        assert!(compute_file_hash(Path::new("/nonexistent/file.svg")).is_err());
    }
}
