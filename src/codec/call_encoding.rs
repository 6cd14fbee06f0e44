use crate::{
    codec::CodecError,
    compression::CompressorRegistry,
    header::REQUEST_POOL,
    serialization::{Message, Serializer},
};
use std::fmt;
use std::sync::Arc;

/// Wire-ready bytes of one request: the marshaled header, to be sent as a
/// frame, and the compressed body that follows it unframed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    pub header: Vec<u8>,
    pub body: Vec<u8>,
}

/// The compression and serialization choices of one client, composed.
///
/// Shared by the blocking and async codecs so both apply identical
/// request encoding and response validation.
#[derive(Clone)]
pub struct CallEncoding {
    compression_tag: u16,
    compressors: Arc<CompressorRegistry>,
    serializer: Arc<dyn Serializer>,
}

impl CallEncoding {
    pub fn new(
        compression_tag: u16,
        compressors: Arc<CompressorRegistry>,
        serializer: Arc<dyn Serializer>,
    ) -> Self {
        Self {
            compression_tag,
            compressors,
            serializer,
        }
    }

    /// Same tag and serializer, different compressor table.
    pub fn with_compressors(self, compressors: Arc<CompressorRegistry>) -> Self {
        Self {
            compressors,
            ..self
        }
    }

    pub fn compression_tag(&self) -> u16 {
        self.compression_tag
    }

    pub fn serializer(&self) -> &dyn Serializer {
        self.serializer.as_ref()
    }

    pub fn compressors(&self) -> &CompressorRegistry {
        &self.compressors
    }

    /// Serializes and compresses `params`, then builds the header carrying
    /// the compressed length and its CRC-32.
    ///
    /// # Arguments
    ///
    /// * `sequence_id` - Id written into the header.
    /// * `method` - Remote method name written into the header.
    /// * `params` - Call parameters, or `None` for an empty body.
    ///
    /// # Returns
    ///
    /// The marshaled header, to be sent as one frame, and the compressed
    /// body that follows it. Fails with
    /// [`CompressionError::UnknownCompressor`](crate::compression::CompressionError::UnknownCompressor)
    /// when the configured tag is not registered.
    pub fn encode_request(
        &self,
        sequence_id: u64,
        method: &str,
        params: Option<&dyn Message>,
    ) -> Result<EncodedRequest, CodecError> {
        let compressor = self.compressors.get(self.compression_tag)?;
        let serialized = self.serializer.marshal(params)?;
        let body = compressor.zip(&serialized)?;

        let payload_length = u32::try_from(body.len()).map_err(|_| CodecError::PayloadTooLarge {
            len: body.len() as u64,
            max: u64::from(u32::MAX),
        })?;

        let mut header = REQUEST_POOL.acquire();
        header.compression_tag = self.compression_tag;
        header.method.push_str(method);
        header.sequence_id = sequence_id;
        header.payload_length = payload_length;
        header.checksum = crc32fast::hash(&body);

        Ok(EncodedRequest {
            header: header.marshal(),
            body,
        })
    }

    /// Verifies and decodes a response body read off the wire.
    ///
    /// # Arguments
    ///
    /// * `compression_tag` - Tag carried by the response header.
    /// * `checksum` - Checksum carried by the response header. Zero skips
    ///   verification.
    /// * `body` - The compressed body exactly as read off the wire.
    /// * `slot` - Message the body is unmarshaled into.
    ///
    /// The checksum is checked first, then the compression tag, and only
    /// then is the body decompressed.
    pub fn decode_response_body(
        &self,
        compression_tag: u16,
        checksum: u32,
        body: &[u8],
        slot: &mut dyn Message,
    ) -> Result<(), CodecError> {
        if checksum != 0 {
            let actual = crc32fast::hash(body);
            if actual != checksum {
                tracing::warn!(
                    expected = checksum,
                    actual,
                    body_len = body.len(),
                    "response checksum mismatch"
                );
                return Err(CodecError::ChecksumMismatch {
                    expected: checksum,
                    actual,
                });
            }
        }

        if compression_tag != self.compression_tag {
            tracing::warn!(
                expected = self.compression_tag,
                actual = compression_tag,
                "response compressor mismatch"
            );
            return Err(CodecError::CompressorMismatch {
                expected: self.compression_tag,
                actual: compression_tag,
            });
        }

        let data = self.compressors.get(compression_tag)?.unzip(body)?;
        self.serializer.unmarshal(&data, Some(slot))?;

        Ok(())
    }
}

impl fmt::Debug for CallEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallEncoding")
            .field("compression_tag", &self.compression_tag)
            .field("serializer", &self.serializer.name())
            .finish()
    }
}
