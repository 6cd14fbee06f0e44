use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    /// No compressor is registered under the tag.
    #[error("no compressor registered for tag {0}")]
    UnknownCompressor(u16),

    /// The underlying encoder or decoder rejected the input.
    #[error("compression stream failed: {0}")]
    Io(#[from] io::Error),
}
