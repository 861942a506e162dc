//! # Protocol Layer
//!
//! Line classification and wire payload codec for the chat relay protocol.
//!
//! The relay speaks newline-delimited text. Every inbound line is either a
//! control sentinel, a fragment of a multi-line response capture, an
//! encrypted message envelope, or free-form server text. The classifier
//! sorts these out one line at a time; the wire codec handles the hex
//! ciphertext payloads carried inside message envelopes.
//!
//! ## Inbound grammar
//! ```text
//! REGISTERED as operator
//! KICKED You have been kicked by the operator
//! BANNED You have been banned by the operator
//! BEGIN_RESPONSE ... END_RESPONSE          (multi-line capture)
//! MESSAGE from <id>: <key_hex>|<ct_hex>
//! BROADCAST from <id>: <key_hex>|<ct_hex>
//! BROADCAST from <id>: <ct_hex>
//! <anything else>                          (opaque server notice)
//! ```

pub mod classifier;
pub mod event;
pub mod wire;

/// Upper bound on a single wire line. Protects the line reader from an
/// unbounded buffer if the relay misbehaves.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;
