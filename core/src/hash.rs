//! Hash related utils.

use crate::{Error, Result};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

/// Size in bytes of every SHA-256 digest and HMAC-SHA256 tag.
pub const SHA256_LEN: usize = 32;

/// Hex encoded SHA256 hash.
///
/// Use this function instead of `hex::encode(sha256(content))` can reduce
/// extra copy.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content).as_slice())
}

/// HMAC with SHA256 hash.
///
/// Returns the raw 32 bytes tag so it can be used directly as the key of the
/// next HMAC round.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Result<[u8; SHA256_LEN]> {
    let mut h = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| Error::invalid_input(format!("invalid hmac key: {e}")))?;
    h.update(content);

    let mut tag = [0u8; SHA256_LEN];
    tag.copy_from_slice(&h.finalize().into_bytes());
    Ok(tag)
}

/// Hex encoded HMAC with SHA256 hash.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> Result<String> {
    hmac_sha256(key, content).map(hex::encode)
}
