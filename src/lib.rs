//! # cipherline
//!
//! Protocol core for a line-oriented encrypted chat client carried over TCP.
//!
//! The crate turns the raw byte stream coming back from a chat relay into
//! typed [`ServerEvent`]s and produces the ciphertext line formats the relay
//! expects on the way out. It deliberately stops there: terminal rendering,
//! command parsing, and the handshake that negotiates the shared secret are
//! the caller's business.
//!
//! ## Components
//! - **crypto**: the two symmetric schemes on the wire — AES-CBC with a
//!   random per-message IV for broadcasts, and a one-time-pad XOR cipher
//!   for direct messages
//! - **protocol**: the wire payload codec and the two-state line classifier
//!   that recognizes sentinels and multi-line response captures
//! - **transport**: the reader pipeline feeding classified events to a
//!   single consumer, and the command sink owning the send half
//! - **config**: TOML/env client configuration
//!
//! ## Data flow
//! ```text
//! socket bytes -> line reader -> classifier -> wire codec -> crypto -> ServerEvent
//! ```
//!
//! ## Error handling
//! Malformed payloads never sever the connection: decode, format, and crypto
//! failures on a single line degrade to a descriptive [`ServerEvent::Notice`]
//! and the reader moves on to the next line. Only I/O failures terminate the
//! pipeline, surfacing as [`ServerEvent::Disconnected`].

pub mod config;
pub mod crypto;
pub mod error;
pub mod protocol;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ProtocolError, Result};
pub use protocol::classifier::Classifier;
pub use protocol::event::ServerEvent;
pub use crypto::SharedSecret;
