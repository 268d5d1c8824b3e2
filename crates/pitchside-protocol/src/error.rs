//! Errors for identity types and their encoding.
//!
//! Each crate in Pitchside defines its own error enum. A `ProtocolError`
//! always means "the bytes or the tag were wrong", never "the network
//! failed" or "the session expired".

/// Something was wrong with the bytes or a tag.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A value could not be encoded.
    #[cfg(feature = "json")]
    #[error("cannot encode: {0}")]
    Encode(serde_json::Error),

    /// Bytes did not decode into the expected record.
    ///
    /// Common causes: malformed JSON, a missing `id`/`uuid` or `role`
    /// field, or a role tag outside the known set.
    #[cfg(feature = "json")]
    #[error("cannot decode: {0}")]
    Decode(serde_json::Error),

    /// A role tag did not name one of the known roles.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    /// The value decoded but is not usable, e.g. it is not valid UTF-8
    /// text where text storage is required.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
