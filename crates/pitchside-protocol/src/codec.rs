//! Codec trait and implementations for serializing/deserializing records.
//!
//! The same codec encodes a [`Principal`](crate::Principal) for tab
//! storage and decodes the login endpoint's responses, so what the server
//! sent is exactly what gets cached.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Turns records into bytes for storage or the wire, and back.
///
/// `Send + Sync + 'static` because codecs live inside long-lived shared
/// handles (the session store, the HTTP gateway).
pub trait Codec: Send + Sync + 'static {
    /// Encodes `value`.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Decodes a `T` from `data`.
    ///
    /// # Errors
    /// `ProtocolError::Decode` for malformed JSON, a missing required
    /// field, or an unknown role tag.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;

    /// Serializes a value into text, for string-valued stores.
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidMessage` if the encoded bytes are
    /// not UTF-8.
    fn encode_text<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<String, ProtocolError> {
        let bytes = self.encode(value)?;
        String::from_utf8(bytes).map_err(|_| {
            ProtocolError::InvalidMessage(
                "encoded value is not valid UTF-8".into(),
            )
        })
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// JSON [`Codec`] backed by `serde_json`.
///
/// The tournament API speaks JSON and tab storage holds the principal
/// as JSON, so this is the only codec we need. It sits behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use pitchside_protocol::{Codec, JsonCodec, Principal, Role};
///
/// let codec = JsonCodec;
/// let principal = Principal::new("u1", Role::Captain);
///
/// let bytes = codec.encode(&principal).unwrap();
/// let decoded: Principal = codec.decode(&bytes).unwrap();
/// assert_eq!(principal, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
