use std::path::Path;

use sha2::{Digest, Sha256};

pub fn checksum_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    hex::encode(result)
}

pub fn checksum_file(path: &Path) -> Result<String, String> {
    let bytes =
        std::fs::read(path).map_err(|e| format!("failed to read artwork file: {e}"))?;
    Ok(checksum_bytes(&bytes))
}
