//! # Cipher Primitives
//!
//! The two symmetric schemes used on the wire.
//!
//! ## Components
//! - **block**: AES in CBC mode with a random per-message IV, used for
//!   broadcast traffic under the session's shared secret
//! - **otp**: one-time-pad XOR, used for direct messages where the random
//!   key travels alongside the ciphertext
//!
//! Both are stateless, pure functions over byte buffers. Key material for
//! the block cipher lives in [`SharedSecret`], which is zeroized on drop and
//! never logged.

use zeroize::{Zeroize, ZeroizeOnDrop};

pub mod block;
pub mod otp;

/// Shared secret negotiated by the external handshake, used as the AES key
/// for broadcast traffic. Immutable for the lifetime of a connection.
///
/// The byte content is trusted as handed in; the core does not re-derive or
/// validate it. `Debug` is redacted so the key can never leak into logs.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}
