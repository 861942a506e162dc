//! One-time-pad XOR cipher.
//!
//! Direct messages are XORed against a random key of the same length as the
//! plaintext. The operation is self-inverse, so the same function both
//! encrypts and decrypts.

use crate::error::{ProtocolError, Result};

/// XOR two equal-length byte sequences.
///
/// # Errors
///
/// Returns [`ProtocolError::Format`] if the lengths differ.
pub fn xor(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if data.len() != key.len() {
        return Err(ProtocolError::Format(format!(
            "key and data lengths do not match ({} vs {})",
            key.len(),
            data.len()
        )));
    }
    Ok(data.iter().zip(key.iter()).map(|(d, k)| d ^ k).collect())
}

/// Generate a random one-time-pad key of `len` bytes.
pub fn generate_key(len: usize) -> Result<Vec<u8>> {
    let mut key = vec![0u8; len];
    getrandom::fill(&mut key).map_err(|e| ProtocolError::Crypto(format!("rng failure: {e}")))?;
    Ok(key)
}
