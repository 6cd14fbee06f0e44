use std::error::Error as StdError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerializationError {
    /// The message does not expose the shape the serializer requires.
    #[error("{serializer} serializer does not support message type `{message}`")]
    UnsupportedMessageType {
        serializer: &'static str,
        message: &'static str,
    },

    #[error("failed to decode `{message}`: {source}")]
    Decode {
        message: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}
