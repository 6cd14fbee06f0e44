use crate::serialization::{Message, SerializationError};

/// Converts call parameters and results to and from body bytes.
///
/// Implementations inspect a [`Message`] for the capability they need and
/// reject anything else with
/// [`SerializationError::UnsupportedMessageType`].
pub trait Serializer: Send + Sync {
    /// Short identifier used in errors and logs.
    fn name(&self) -> &'static str;

    /// Encodes `message`. `None` encodes to an empty block.
    fn marshal(&self, message: Option<&dyn Message>) -> Result<Vec<u8>, SerializationError>;

    /// Decodes `data` into `slot`. A `None` slot is a no-op.
    fn unmarshal(
        &self,
        data: &[u8],
        slot: Option<&mut dyn Message>,
    ) -> Result<(), SerializationError>;
}
