//! Request and response serialization errors.

use thiserror::Error;

/// A body could not be encoded, or a response could not be decoded.
///
/// Both variants name the Rust type involved; decoding failures also report
/// how many bytes the server sent.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// The request body could not be serialized to JSON.
    #[error("failed to serialize {type_name}: {source}")]
    Serialize {
        /// The type being serialized.
        type_name: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The response payload could not be deserialized into the expected type.
    #[error("failed to deserialize {type_name} from {len} bytes: {source}")]
    Deserialize {
        /// The expected response type.
        type_name: &'static str,
        /// Length of the raw payload.
        len: usize,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl SerializationError {
    /// Returns the name of the type that failed to (de)serialize.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Serialize { type_name, .. } | Self::Deserialize { type_name, .. } => type_name,
        }
    }

    /// Serializes `value` to JSON bytes.
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, Self> {
        serde_json::to_vec(value).map_err(|source| Self::Serialize {
            type_name: std::any::type_name::<T>(),
            source,
        })
    }

    /// Deserializes `bytes` into `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, Self> {
        serde_json::from_slice(bytes).map_err(|source| Self::Deserialize {
            type_name: std::any::type_name::<T>(),
            len: bytes.len(),
            source,
        })
    }
}
