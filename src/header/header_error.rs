use thiserror::Error;

/// Header bytes that do not describe a complete, well-formed header.
///
/// `field` names the header field being read when decoding stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderDecodeError {
    #[error("header is empty")]
    Empty,

    #[error("header ended while reading `{field}`")]
    Truncated { field: &'static str },

    #[error("varint in `{field}` overflows a 64-bit integer")]
    VarintOverflow { field: &'static str },

    #[error("`{field}` is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("`{field}` does not fit its declared width")]
    LengthOverflow { field: &'static str },
}
