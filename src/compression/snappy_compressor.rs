use crate::compression::{CompressionError, Compressor};
use snap::{read::FrameDecoder, write::FrameEncoder};
use std::io::{self, Read, Write};

/// Snappy in its framed stream format, so payloads carry their own CRCs and
/// chunk boundaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnappyCompressor;

impl Compressor for SnappyCompressor {
    fn zip(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut encoder = FrameEncoder::new(Vec::with_capacity(data.len() / 2 + 16));
        encoder.write_all(data)?;
        encoder
            .into_inner()
            .map_err(|e| io::Error::new(e.error().kind(), e.error().to_string()).into())
    }

    fn unzip(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut out = Vec::with_capacity(data.len() * 2);
        FrameDecoder::new(data).read_to_end(&mut out)?;
        Ok(out)
    }
}
