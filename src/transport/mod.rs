//! # Transport Layer
//!
//! Connection setup and the two halves of a live session.
//!
//! A connection is exactly two logical threads of control: the reader task
//! (owns the receive half, see [`reader`]) and the consumer (owns the send
//! half through [`sink::CommandSink`] plus all decrypted state). The shared
//! secret is read-only after the handshake, so both sides use it without
//! synchronization.
//!
//! The handshake itself is external: [`connect`] takes an
//! already-negotiated [`SharedSecret`] and only wires up the socket.

use std::io;

use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{info, instrument};

use crate::config::ClientConfig;
use crate::crypto::SharedSecret;
use crate::error::Result;

pub mod reader;
pub mod sink;

pub use reader::{spawn_reader, EventStream};
pub use sink::CommandSink;

/// A live session: the classified event stream and the command sink.
pub struct Connection {
    pub events: EventStream,
    pub sink: CommandSink<OwnedWriteHalf>,
}

/// Connect to the relay and start the reader pipeline.
///
/// # Errors
///
/// Returns [`crate::ProtocolError::Io`] if the TCP connection cannot be
/// established within the configured timeout.
#[instrument(skip(config, secret), fields(address = %config.address()))]
pub async fn connect(config: &ClientConfig, secret: SharedSecret) -> Result<Connection> {
    let address = config.address();
    let stream = timeout(config.connect_timeout, TcpStream::connect(&address))
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "connect timed out"))??;
    info!("connected to relay");

    let (read_half, write_half) = stream.into_split();
    Ok(Connection {
        events: spawn_reader(read_half, secret.clone()),
        sink: CommandSink::new(write_half, secret),
    })
}
