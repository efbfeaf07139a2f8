use std::fs;
use std::path::Path;

use base64::engine::general_purpose;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// Fingerprint a file by hashing its full byte content with SHA-256.
///
/// Two byte-identical files produce the same fingerprint regardless of
/// name or location, which is what the track dedup check keys on.
pub fn file_fingerprint(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    Ok(fingerprint_bytes(&bytes))
}

pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(hasher.finalize())
}
