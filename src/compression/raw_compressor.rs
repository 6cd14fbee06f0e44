use crate::compression::{CompressionError, Compressor};

/// The identity transform registered under tag `0`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawCompressor;

impl Compressor for RawCompressor {
    fn zip(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(data.to_vec())
    }

    fn unzip(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(data.to_vec())
    }
}
