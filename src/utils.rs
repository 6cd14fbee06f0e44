mod varint;

pub use varint::{UvarintDecoder, VarintError, decode_uvarint, encode_uvarint, uvarint_len};
