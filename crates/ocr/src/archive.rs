use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// SHA-256 digest of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

pub fn to_hex(digest: &[u8; 32]) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Content-addressed location of an archived source image:
/// `<root>/<first two hex chars>/<hash>.<ext>`. The same bytes always
/// land at the same path, so re-running a statement is a no-op copy.
pub fn archive_path(root: &Path, hash_hex: &str, ext: &str) -> PathBuf {
    root.join(&hash_hex[..2]).join(format!("{hash_hex}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_digest_is_64_chars() {
        let hex = to_hex(&sha256_bytes(b"statement"));
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn same_bytes_same_digest() {
        assert_eq!(sha256_bytes(b"abc"), sha256_bytes(b"abc"));
        assert_ne!(sha256_bytes(b"abc"), sha256_bytes(b"abd"));
    }

    #[test]
    fn archive_path_fans_out_by_prefix() {
        let p = archive_path(Path::new("/tmp/arch"), "ab12cd", "jpg");
        assert_eq!(p, PathBuf::from("/tmp/arch/ab/ab12cd.jpg"));
    }
}
