use crate::serialization::{Message, SerializationError, Serializer};

/// Schema-based binary serializer backed by `bitcode`.
///
/// Accepts messages that expose [`Message::as_schema`], typically through
/// [`schema_message!`](crate::schema_message).
#[derive(Debug, Default, Clone, Copy)]
pub struct BitcodeSerializer;

impl BitcodeSerializer {
    const NAME: &'static str = "bitcode";
}

impl Serializer for BitcodeSerializer {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn marshal(&self, message: Option<&dyn Message>) -> Result<Vec<u8>, SerializationError> {
        let Some(message) = message else {
            return Ok(Vec::new());
        };

        message
            .as_schema()
            .map(|schema| schema.encode_schema())
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

        let schema = slot
            .as_schema_mut()
            .ok_or(SerializationError::UnsupportedMessageType {
                serializer: Self::NAME,
                message: message_type,
            })?;

        schema
            .decode_schema(data)
            .map_err(|e| SerializationError::Decode {
                message: message_type,
                source: Box::new(e),
            })
    }
}
