use crate::compression::{CompressionError, Compressor};
use flate2::{Compression, read::ZlibDecoder, write::ZlibEncoder};
use std::io::{Read, Write};

/// RFC 1950 zlib-wrapped deflate.
#[derive(Debug, Clone, Copy)]
pub struct ZlibCompressor {
    level: Compression,
}

impl ZlibCompressor {
    pub fn with_level(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }
}

impl Default for ZlibCompressor {
    fn default() -> Self {
        Self {
            level: Compression::default(),
        }
    }
}

impl Compressor for ZlibCompressor {
    fn zip(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2 + 16), self.level);
        encoder.write_all(data)?;
        Ok(encoder.finish()?)
    }

    fn unzip(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut out = Vec::with_capacity(data.len() * 2);
        ZlibDecoder::new(data).read_to_end(&mut out)?;
        Ok(out)
    }
}
