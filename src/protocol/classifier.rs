//! Two-state line classifier.
//!
//! Consumes one text line at a time and produces at most one [`ServerEvent`]
//! per line. Carries the only real state in the core: the multi-line
//! response capture buffer between `BEGIN_RESPONSE` and `END_RESPONSE`.
//!
//! Decode, format, and crypto failures on a message envelope degrade to a
//! descriptive [`ServerEvent::Notice`]; they never propagate out of
//! [`Classifier::classify`].

use tracing::debug;

use crate::crypto::SharedSecret;
use crate::protocol::event::ServerEvent;
use crate::protocol::wire;

/// Exact-match control sentinels.
pub const OPERATOR_GRANTED: &str = "REGISTERED as operator";
pub const KICKED: &str = "KICKED You have been kicked by the operator";
pub const BANNED: &str = "BANNED You have been banned by the operator";
pub const BEGIN_RESPONSE: &str = "BEGIN_RESPONSE";
pub const END_RESPONSE: &str = "END_RESPONSE";

const DIRECT_PREFIX: &str = "MESSAGE from";
const BROADCAST_PREFIX: &str = "BROADCAST from";

const OPERATOR_NOTICE: &str = "You are registered as the server operator.";

/// Capture mode for multi-line responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Normal,
    Collecting,
}

/// Stateful per-connection line classifier.
///
/// Created in `Normal` state at connection start. The capture buffer is
/// owned exclusively by the classifier and never aliased.
pub struct Classifier {
    secret: SharedSecret,
    state: CaptureState,
    captured: Vec<String>,
}

impl Classifier {
    pub fn new(secret: SharedSecret) -> Self {
        Self {
            secret,
            state: CaptureState::Normal,
            captured: Vec::new(),
        }
    }

    /// Classify one line, already stripped of its trailing CR/LF.
    ///
    /// Returns `None` for blank lines, capture sentinels, and interior
    /// capture fragments; every other line yields exactly one event.
    pub fn classify(&mut self, line: &str) -> Option<ServerEvent> {
        if line.is_empty() {
            return None;
        }

        match line {
            OPERATOR_GRANTED => {
                return Some(ServerEvent::OperatorGranted(OPERATOR_NOTICE.to_string()))
            }
            KICKED => return Some(ServerEvent::Kicked),
            BANNED => return Some(ServerEvent::Banned),
            BEGIN_RESPONSE => {
                self.state = CaptureState::Collecting;
                self.captured.clear();
                return None;
            }
            END_RESPONSE => {
                self.state = CaptureState::Normal;
                // An empty capture still flushes as an empty notice.
                return Some(ServerEvent::Notice(self.captured.join("\n")));
            }
            _ => {}
        }

        if self.state == CaptureState::Collecting {
            self.captured.push(line.to_string());
            return None;
        }

        if line.starts_with(DIRECT_PREFIX) || line.starts_with(BROADCAST_PREFIX) {
            return Some(self.classify_envelope(line));
        }

        Some(ServerEvent::Notice(line.to_string()))
    }

    /// Decode a `MESSAGE from` / `BROADCAST from` envelope. Any failure is
    /// converted into a notice naming the sender; the connection stays open.
    fn classify_envelope(&self, line: &str) -> ServerEvent {
        let Some((sender_info, payload)) = line.split_once(": ") else {
            return ServerEvent::Notice("Invalid message format. Ignoring.".to_string());
        };

        if let Some(sender) = sender_info.strip_prefix(DIRECT_PREFIX) {
            let sender = sender.trim_start();
            match wire::decode_direct(payload) {
                Ok(plaintext) => ServerEvent::Direct {
                    sender: sender.to_string(),
                    text: String::from_utf8_lossy(&plaintext).into_owned(),
                },
                Err(e) => {
                    debug!(sender, error = %e, "undecodable direct message");
                    ServerEvent::Notice(format!("Error decoding message from {sender}: {e}"))
                }
            }
        } else {
            let sender = sender_info
                .strip_prefix(BROADCAST_PREFIX)
                .unwrap_or(sender_info)
                .trim_start();
            match wire::decode_broadcast(&self.secret, payload) {
                Ok(plaintext) => ServerEvent::Broadcast {
                    sender: sender.to_string(),
                    text: String::from_utf8_lossy(&plaintext).into_owned(),
                },
                Err(e) => {
                    debug!(sender, error = %e, "undecodable broadcast");
                    ServerEvent::Notice(format!("Error decoding broadcast from {sender}: {e}"))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(SharedSecret::new(vec![0x42; 32]))
    }

    #[test]
    fn blank_lines_produce_nothing() {
        let mut c = classifier();
        assert_eq!(c.classify(""), None);
    }

    #[test]
    fn operator_sentinel() {
        let mut c = classifier();
        assert_eq!(
            c.classify(OPERATOR_GRANTED),
            Some(ServerEvent::OperatorGranted(
                "You are registered as the server operator.".to_string()
            ))
        );
    }

    #[test]
    fn kicked_and_banned_are_terminal() {
        let mut c = classifier();
        let kicked = c.classify(KICKED).unwrap();
        assert_eq!(kicked, ServerEvent::Kicked);
        assert!(kicked.is_terminal());

        let banned = c.classify(BANNED).unwrap();
        assert_eq!(banned, ServerEvent::Banned);
        assert!(banned.is_terminal());
    }

    #[test]
    fn capture_flushes_joined_lines() {
        let mut c = classifier();
        assert_eq!(c.classify(BEGIN_RESPONSE), None);
        assert_eq!(c.classify("alice"), None);
        assert_eq!(c.classify("bob"), None);
        assert_eq!(c.classify("carol"), None);
        assert_eq!(
            c.classify(END_RESPONSE),
            Some(ServerEvent::Notice("alice\nbob\ncarol".to_string()))
        );
        // Back to normal: the next line is a plain notice again.
        assert_eq!(
            c.classify("server text"),
            Some(ServerEvent::Notice("server text".to_string()))
        );
    }

    #[test]
    fn empty_capture_flushes_empty_notice() {
        let mut c = classifier();
        c.classify(BEGIN_RESPONSE);
        assert_eq!(
            c.classify(END_RESPONSE),
            Some(ServerEvent::Notice(String::new()))
        );
    }

    #[test]
    fn reentering_capture_resets_buffer() {
        let mut c = classifier();
        c.classify(BEGIN_RESPONSE);
        c.classify("stale");
        c.classify(BEGIN_RESPONSE);
        c.classify("fresh");
        assert_eq!(
            c.classify(END_RESPONSE),
            Some(ServerEvent::Notice("fresh".to_string()))
        );
    }

    #[test]
    fn message_prefixed_lines_are_captured_verbatim_while_collecting() {
        let mut c = classifier();
        c.classify(BEGIN_RESPONSE);
        assert_eq!(c.classify("MESSAGE from bob: 0102|0304"), None);
        assert_eq!(
            c.classify(END_RESPONSE),
            Some(ServerEvent::Notice("MESSAGE from bob: 0102|0304".to_string()))
        );
    }

    #[test]
    fn direct_message_decodes() {
        let mut c = classifier();
        assert_eq!(
            c.classify("MESSAGE from bob: 0102|0304"),
            Some(ServerEvent::Direct {
                sender: "bob".to_string(),
                text: "\u{2}\u{6}".to_string(),
            })
        );
    }

    #[test]
    fn direct_length_mismatch_degrades_to_notice() {
        let mut c = classifier();
        match c.classify("MESSAGE from bob: 01|0203") {
            Some(ServerEvent::Notice(text)) => assert!(text.contains("bob")),
            other => panic!("expected notice, got {other:?}"),
        }
        // The classifier keeps working after the bad envelope.
        assert_eq!(
            c.classify("still alive"),
            Some(ServerEvent::Notice("still alive".to_string()))
        );
    }

    #[test]
    fn envelope_without_payload_separator_degrades_to_notice() {
        let mut c = classifier();
        assert_eq!(
            c.classify("MESSAGE from bob"),
            Some(ServerEvent::Notice("Invalid message format. Ignoring.".to_string()))
        );
    }

    #[test]
    fn broadcast_otp_form_decodes() {
        let mut c = classifier();
        assert_eq!(
            c.classify("BROADCAST from eve: 0102|0304"),
            Some(ServerEvent::Broadcast {
                sender: "eve".to_string(),
                text: "\u{2}\u{6}".to_string(),
            })
        );
    }

    #[test]
    fn broadcast_block_form_roundtrips() {
        let secret = SharedSecret::new(vec![0x42; 32]);
        let payload = wire::encode_broadcast(&secret, b"hello room").unwrap();
        let mut c = Classifier::new(secret);
        assert_eq!(
            c.classify(&format!("BROADCAST from eve: {payload}")),
            Some(ServerEvent::Broadcast {
                sender: "eve".to_string(),
                text: "hello room".to_string(),
            })
        );
    }

    #[test]
    fn broadcast_invalid_hex_degrades_to_notice() {
        let mut c = classifier();
        match c.classify("BROADCAST from eve: not-hex") {
            Some(ServerEvent::Notice(text)) => {
                assert!(text.contains("eve"));
                assert!(text.to_lowercase().contains("decod"));
            }
            other => panic!("expected notice, got {other:?}"),
        }
    }

    #[test]
    fn unrecognized_lines_pass_through_as_notices() {
        let mut c = classifier();
        assert_eq!(
            c.classify("Welcome to the server"),
            Some(ServerEvent::Notice("Welcome to the server".to_string()))
        );
    }
}
