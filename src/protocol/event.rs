//! Typed events produced by the line classifier.

/// One classified inbound line. At most one event is produced per line; the
/// capture sentinels and interior capture fragments produce none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Free-form server text: help output, list output, error descriptions
    /// from unparseable envelopes, and flushed multi-line captures.
    Notice(String),

    /// The relay granted this client operator status.
    OperatorGranted(String),

    /// Kicked by the operator. Terminal.
    Kicked,

    /// Banned by the operator. Terminal.
    Banned,

    /// The socket closed or failed. Terminal.
    Disconnected,

    /// A direct message, decrypted from the one-time-pad envelope.
    Direct { sender: String, text: String },

    /// A broadcast message, decrypted from either envelope sub-format.
    Broadcast { sender: String, text: String },
}

impl ServerEvent {
    /// Terminal events end the reader pipeline: no further lines are read
    /// after one is emitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Kicked | Self::Banned | Self::Disconnected)
    }
}
