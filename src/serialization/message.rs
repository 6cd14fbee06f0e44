/// A call parameter or result that can cross the serialization boundary.
///
/// Each accessor exposes one payload shape. A type opts into the shapes it
/// supports and keeps the `None` defaults for the rest, so a serializer can
/// reject a message whose shape it does not understand instead of guessing.
///
/// Schema-encoded types normally get their impl from
/// [`schema_message!`](crate::schema_message).
pub trait Message: Send + Sync {
    /// Name used in error messages.
    fn message_type(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The schema-encoded view of this message.
    fn as_schema(&self) -> Option<&dyn SchemaMessage> {
        None
    }

    fn as_schema_mut(&mut self) -> Option<&mut dyn SchemaMessage> {
        None
    }

    /// The opaque byte view of this message.
    fn as_bytes(&self) -> Option<&[u8]> {
        None
    }

    fn as_bytes_mut(&mut self) -> Option<&mut Vec<u8>> {
        None
    }
}

/// Object-safe access to a type's `bitcode` schema encoding.
pub trait SchemaMessage {
    fn encode_schema(&self) -> Vec<u8>;

    /// Replaces `self` with the value decoded from `bytes`.
    fn decode_schema(&mut self, bytes: &[u8]) -> Result<(), bitcode::Error>;
}

impl<T> SchemaMessage for T
where
    T: bitcode::Encode + bitcode::DecodeOwned,
{
    fn encode_schema(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    fn decode_schema(&mut self, bytes: &[u8]) -> Result<(), bitcode::Error> {
        *self = bitcode::decode(bytes)?;
        Ok(())
    }
}

impl Message for Vec<u8> {
    fn as_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }

    fn as_bytes_mut(&mut self) -> Option<&mut Vec<u8>> {
        Some(self)
    }
}

/// Implements [`Message`] for `bitcode`-derived types, exposing their schema
/// encoding.
///
/// ## Example
///
/// ```rust
/// use bitcode::{Decode, Encode};
/// use rpcwire::schema_message;
///
/// #[derive(Encode, Decode, Default, Debug, PartialEq)]
/// struct AddArgs {
///     a: i64,
///     b: i64,
/// }
///
/// schema_message!(AddArgs);
/// ```
#[macro_export]
macro_rules! schema_message {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::serialization::Message for $ty {
                fn as_schema(&self) -> Option<&dyn $crate::serialization::SchemaMessage> {
                    Some(self)
                }

                fn as_schema_mut(
                    &mut self,
                ) -> Option<&mut dyn $crate::serialization::SchemaMessage> {
                    Some(self)
                }
            }
        )+
    };
}
