//! Command sink.
//!
//! Owns the send half of the socket; the encode direction of the wire
//! contract. Message payloads are encrypted through the wire codec, plain
//! protocol commands pass through as-is. Exactly one writer exists per
//! connection, so no locking is needed.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::crypto::SharedSecret;
use crate::error::Result;
use crate::protocol::wire;

/// Write half of a connection, producing outbound wire lines.
pub struct CommandSink<W> {
    writer: W,
    secret: SharedSecret,
}

impl<W: AsyncWrite + Unpin> CommandSink<W> {
    pub fn new(writer: W, secret: SharedSecret) -> Self {
        Self { writer, secret }
    }

    /// Encrypt and send a broadcast: `SEND ALL <hex(iv‖ciphertext)>`.
    pub async fn send_broadcast(&mut self, text: &str) -> Result<()> {
        let payload = wire::encode_broadcast(&self.secret, text.as_bytes())?;
        self.write_line(&format!("SEND ALL {payload}")).await
    }

    /// Encrypt and send a direct message: `SEND <recipient> <key_hex>|<ct_hex>`.
    pub async fn send_direct(&mut self, recipient: &str, text: &str) -> Result<()> {
        let payload = wire::encode_direct(text.as_bytes())?;
        self.write_line(&format!("SEND {recipient} {payload}")).await
    }

    /// Send a plain protocol command line (`LIST`, `HELP`, `KICK <id>`,
    /// `BAN <id>`, `EXIT`). No encryption applies.
    pub async fn send_command(&mut self, command: &str) -> Result<()> {
        self.write_line(command).await
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        debug!(bytes = line.len(), "writing wire line");
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}
