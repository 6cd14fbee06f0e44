use crate::compression::CompressionError;

/// A reversible byte transform selected by a compression tag.
///
/// `unzip(zip(b))` must return `b` for every input, the empty block
/// included.
pub trait Compressor: Send + Sync {
    fn zip(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;

    fn unzip(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;
}
