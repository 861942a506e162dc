//! Reader pipeline.
//!
//! One dedicated task owns the receive half of the socket. It frames the
//! byte stream into lines, runs each line through the [`Classifier`], and
//! hands the resulting events to a single consumer over a single-slot
//! channel. The slot gives implicit backpressure: no new socket bytes are
//! consumed while an unconsumed event is pending delivery.
//!
//! Termination is one-way and final. An I/O failure or EOF surfaces as
//! exactly one [`ServerEvent::Disconnected`]; after `Kicked` or `Banned`
//! the task exits without attempting further reads. There is no retry and
//! no reconnect.

use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, LinesCodec};
use tracing::{debug, warn};

use crate::crypto::SharedSecret;
use crate::protocol::classifier::Classifier;
use crate::protocol::event::ServerEvent;
use crate::protocol::MAX_LINE_LENGTH;

/// Consumer end of the reader pipeline.
///
/// Pull-based: the consumer asks for the next event after it has finished
/// with the previous one, so at most one event is ever in flight.
pub struct EventStream {
    rx: mpsc::Receiver<ServerEvent>,
}

impl EventStream {
    /// Receive the next classified event.
    ///
    /// Returns `None` once the reader task has exited and the final event
    /// (always terminal) has been consumed.
    pub async fn next_event(&mut self) -> Option<ServerEvent> {
        self.rx.recv().await
    }
}

/// Spawn the dedicated reader task over the receive half of a connection.
///
/// Generic over the stream so tests can drive it with in-memory pipes.
pub fn spawn_reader<R>(read: R, secret: SharedSecret) -> EventStream
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let mut lines = FramedRead::new(read, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        let mut classifier = Classifier::new(secret);

        loop {
            let line = match lines.next().await {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    warn!(error = %e, "read failure, closing pipeline");
                    let _ = tx.send(ServerEvent::Disconnected).await;
                    return;
                }
                None => {
                    debug!("stream ended, closing pipeline");
                    let _ = tx.send(ServerEvent::Disconnected).await;
                    return;
                }
            };

            // The codec strips the newline; the protocol also tolerates
            // stray carriage returns.
            let line = line.trim_end_matches(['\r', '\n']);

            if let Some(event) = classifier.classify(line) {
                let terminal = event.is_terminal();
                if tx.send(event).await.is_err() {
                    // Consumer dropped the stream; nothing left to serve.
                    return;
                }
                if terminal {
                    return;
                }
            }
        }
    });

    EventStream { rx }
}
