use crate::{
    compression::CompressionType,
    constants::MAX_HEADER_SIZE,
    header::{HeaderDecodeError, Reset, header_cursor::{HeaderCursor, put_string}},
    utils::encode_uvarint,
};

/// Envelope preceding every request body.
///
/// Wire layout, little-endian:
///
/// ```text
/// u16(compression_tag) || varint(len(method)) || method
///     || varint(sequence_id) || varint(payload_length) || u32(checksum)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeader {
    /// Tag of the compressor applied to the body.
    pub compression_tag: u16,

    /// Name of the remote method being invoked.
    pub method: String,

    /// Client-assigned id echoed back by the matching response.
    pub sequence_id: u64,

    /// Byte count of the compressed body that follows the header frame.
    pub payload_length: u32,

    /// CRC-32/IEEE of the compressed body; `0` disables verification.
    pub checksum: u32,
}

impl RequestHeader {
    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(MAX_HEADER_SIZE + self.method.len());
        self.marshal_into(&mut buf);
        buf
    }

    /// Appends the encoded header to `buf`.
    pub fn marshal_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.compression_tag.to_le_bytes());
        put_string(buf, &self.method);
        encode_uvarint(buf, self.sequence_id);
        encode_uvarint(buf, u64::from(self.payload_length));
        buf.extend_from_slice(&self.checksum.to_le_bytes());
    }

    /// Decodes `data` into `self`.
    ///
    /// On error `self` is left unchanged. Bytes after the checksum are
    /// ignored.
    pub fn unmarshal(&mut self, data: &[u8]) -> Result<(), HeaderDecodeError> {
        *self = Self::decode(data)?;
        Ok(())
    }

    pub fn decode(data: &[u8]) -> Result<Self, HeaderDecodeError> {
        let mut cursor = HeaderCursor::new(data)?;

        let compression_tag = cursor.read_u16_le("compression_tag")?;
        let method = cursor.read_string("method")?;
        let sequence_id = cursor.read_uvarint("sequence_id")?;
        let payload_length = cursor.read_uvarint_u32("payload_length")?;
        let checksum = cursor.read_u32_le("checksum")?;

        Ok(Self {
            compression_tag,
            method,
            sequence_id,
            payload_length,
            checksum,
        })
    }

    /// The compression tag as a known [`CompressionType`], if it is one.
    pub fn compression_type(&self) -> Option<CompressionType> {
        CompressionType::try_from(self.compression_tag).ok()
    }
}

impl Reset for RequestHeader {
    fn reset(&mut self) {
        self.compression_tag = 0;
        self.method.clear();
        self.sequence_id = 0;
        self.payload_length = 0;
        self.checksum = 0;
    }
}
