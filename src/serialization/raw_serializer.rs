use crate::serialization::{Message, SerializationError, Serializer};

/// Passes opaque byte messages through untouched.
///
/// Useful when the layer above already produced the body bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawSerializer;

impl RawSerializer {
    const NAME: &'static str = "raw";
}

impl Serializer for RawSerializer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn marshal(&self, message: Option<&dyn Message>) -> Result<Vec<u8>, SerializationError> {
        let Some(message) = message else {
            return Ok(Vec::new());
        };

        message
            .as_bytes()
            .map(<[u8]>::to_vec)
            .ok_or(SerializationError::UnsupportedMessageType {
                serializer: Self::NAME,
                message: message.message_type(),
            })
    }

    fn unmarshal(
        &self,
        data: &[u8],
        slot: Option<&mut dyn Message>,
    ) -> Result<(), SerializationError> {
        let Some(slot) = slot else {
            return Ok(());
        };

        let message_type = slot.message_type();

        let bytes = slot
            .as_bytes_mut()
            .ok_or(SerializationError::UnsupportedMessageType {
                serializer: Self::NAME,
                message: message_type,
            })?;

        bytes.clear();
        bytes.extend_from_slice(data);
        Ok(())
    }
}
