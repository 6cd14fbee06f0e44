use crate::compression::{CompressionError, Compressor};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use std::io::{Read, Write};

/// RFC 1952 gzip, one complete member per payload.
#[derive(Debug, Clone, Copy)]
pub struct GzipCompressor {
    level: Compression,
}

impl GzipCompressor {
    /// Level ranges from 0 (store) to 9 (smallest output).
    pub fn with_level(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }
}

impl Default for GzipCompressor {
    fn default() -> Self {
        Self {
            level: Compression::default(),
        }
    }
}

impl Compressor for GzipCompressor {
    fn zip(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), self.level);
        encoder.write_all(data)?;
        Ok(encoder.finish()?)
    }

    fn unzip(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut out = Vec::with_capacity(data.len() * 2);
        GzDecoder::new(data).read_to_end(&mut out)?;
        Ok(out)
    }
}
