//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding messages.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed — the frame was malformed or the wrong
    /// shape. The offending frame is dropped; the connection stays up.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message decoded but violates a protocol rule.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
