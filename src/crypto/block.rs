//! AES-CBC with a random per-message IV.
//!
//! Wire layout of a broadcast ciphertext:
//! ```text
//! +-----------+----------------------+
//! | IV (16 B) | CBC blocks (N * 16B) |
//! +-----------+----------------------+
//! ```
//!
//! Padding is the classic length-byte scheme: every added byte carries the
//! count of bytes added (1..=16, always at least one). On decrypt the count
//! in the final byte is trusted as-is — there is no integrity check, so a
//! corrupted last ciphertext byte silently mis-truncates the plaintext.
//! That matches the deployed relay protocol and is deliberate.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};

use crate::error::{ProtocolError, Result};

/// AES block size in bytes. The IV is exactly one block.
pub const BLOCK_SIZE: usize = 16;

/// Key-size dispatch over the three AES variants.
enum AesCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesCipher {
    fn new(key: &[u8]) -> Result<Self> {
        let cipher = match key.len() {
            16 => Aes128::new_from_slice(key).map(Self::Aes128),
            24 => Aes192::new_from_slice(key).map(Self::Aes192),
            32 => Aes256::new_from_slice(key).map(Self::Aes256),
            n => {
                return Err(ProtocolError::Crypto(format!(
                    "unsupported AES key length: {n} bytes"
                )))
            }
        };
        cipher.map_err(|e| ProtocolError::Crypto(format!("cipher init failed: {e}")))
    }

    fn encrypt_block(&self, block: &mut Block) {
        match self {
            Self::Aes128(c) => c.encrypt_block(block),
            Self::Aes192(c) => c.encrypt_block(block),
            Self::Aes256(c) => c.encrypt_block(block),
        }
    }

    fn decrypt_block(&self, block: &mut Block) {
        match self {
            Self::Aes128(c) => c.decrypt_block(block),
            Self::Aes192(c) => c.decrypt_block(block),
            Self::Aes256(c) => c.decrypt_block(block),
        }
    }
}

/// Encrypt `plaintext` under `key`, returning `iv ‖ ciphertext`.
///
/// The plaintext is padded to a whole number of blocks (minimum one padding
/// byte) and encrypted in CBC mode under a freshly generated random IV.
///
/// # Errors
///
/// Returns [`ProtocolError::Crypto`] if `key` is not 16, 24, or 32 bytes or
/// if the system RNG fails.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = AesCipher::new(key)?;

    let padding = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;
    let mut padded = Vec::with_capacity(plaintext.len() + padding);
    padded.extend_from_slice(plaintext);
    padded.resize(plaintext.len() + padding, padding as u8);

    let mut iv = [0u8; BLOCK_SIZE];
    getrandom::fill(&mut iv).map_err(|e| ProtocolError::Crypto(format!("rng failure: {e}")))?;

    let mut out = Vec::with_capacity(BLOCK_SIZE + padded.len());
    out.extend_from_slice(&iv);

    let mut chain = Block::clone_from_slice(&iv);
    for chunk in padded.chunks_exact(BLOCK_SIZE) {
        let mut block = Block::clone_from_slice(chunk);
        for (b, c) in block.iter_mut().zip(chain.iter()) {
            *b ^= c;
        }
        cipher.encrypt_block(&mut block);
        out.extend_from_slice(&block);
        chain = block;
    }

    Ok(out)
}

/// Decrypt `iv ‖ ciphertext` under `key` and strip the padding.
///
/// The padding length is read from the final plaintext byte and trusted
/// without further validation; see the module docs.
///
/// # Errors
///
/// Returns [`ProtocolError::Format`] if the input is shorter than one block
/// or the body after the IV is not a whole, non-zero number of blocks, and
/// [`ProtocolError::Crypto`] for an unsupported key length.
pub fn decrypt(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.len() < BLOCK_SIZE {
        return Err(ProtocolError::Format(
            "ciphertext too short to carry an IV".to_string(),
        ));
    }
    let cipher = AesCipher::new(key)?;

    let (iv, body) = ciphertext.split_at(BLOCK_SIZE);
    if body.is_empty() || body.len() % BLOCK_SIZE != 0 {
        return Err(ProtocolError::Format(format!(
            "ciphertext body of {} bytes is not a whole number of blocks",
            body.len()
        )));
    }

    let mut out = Vec::with_capacity(body.len());
    let mut chain = Block::clone_from_slice(iv);
    for chunk in body.chunks_exact(BLOCK_SIZE) {
        let saved = Block::clone_from_slice(chunk);
        let mut block = saved;
        cipher.decrypt_block(&mut block);
        for (b, c) in block.iter_mut().zip(chain.iter()) {
            *b ^= c;
        }
        out.extend_from_slice(&block);
        chain = saved;
    }

    // Padding length byte is trusted. An out-of-range value truncates to
    // empty rather than panicking.
    let padding = out[out.len() - 1] as usize;
    out.truncate(out.len().saturating_sub(padding));

    Ok(out)
}
