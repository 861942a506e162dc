//! # Error Types
//!
//! Error handling for the chat protocol core.
//!
//! This module defines every failure the core can surface, from socket-level
//! I/O errors to malformed ciphertext payloads.
//!
//! ## Error Categories
//! - **I/O Errors**: socket failures, stream closed by the peer
//! - **Decode Errors**: payloads that are not valid hex
//! - **Format Errors**: wrong part counts, length mismatches, truncated ciphertext
//! - **Crypto Errors**: unsupported key sizes, cipher failures
//!
//! Decode, format, and crypto errors raised while classifying a single line
//! are recovered inside the classifier and surfaced to the consumer as a
//! descriptive server notice; only I/O errors terminate the reader.

use std::io;
use thiserror::Error;
use tokio_util::codec::LinesCodecError;

/// Primary error type for all protocol operations.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Hex decode error: {0}")]
    Decode(#[from] hex::FromHexError),

    #[error("Malformed payload: {0}")]
    Format(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<LinesCodecError> for ProtocolError {
    fn from(err: LinesCodecError) -> Self {
        match err {
            LinesCodecError::MaxLineLengthExceeded => {
                ProtocolError::Format("line exceeds maximum length".to_string())
            }
            LinesCodecError::Io(e) => ProtocolError::Io(e),
        }
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
