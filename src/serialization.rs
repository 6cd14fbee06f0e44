mod bitcode_serializer;
mod message;
mod raw_serializer;
mod serialization_error;
mod serializer;

pub use bitcode_serializer::BitcodeSerializer;
pub use message::{Message, SchemaMessage};
pub use raw_serializer::RawSerializer;
pub use serialization_error::SerializationError;
pub use serializer::Serializer;
