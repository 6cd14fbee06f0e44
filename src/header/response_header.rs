use crate::{
    compression::CompressionType,
    constants::MAX_HEADER_SIZE,
    header::{HeaderDecodeError, Reset, header_cursor::{HeaderCursor, put_string}},
    utils::encode_uvarint,
};

/// Envelope preceding every response body.
///
/// Differs from [`RequestHeader`](crate::header::RequestHeader) in carrying
/// an error string, placed after the sequence id:
///
/// ```text
/// u16(compression_tag) || varint(sequence_id) || varint(len(error)) || error
///     || varint(payload_length) || u32(checksum)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeader {
    pub compression_tag: u16,

    /// Sequence id of the request this response answers.
    pub sequence_id: u64,

    /// Remote failure description; empty on success.
    pub error: String,

    pub payload_length: u32,

    pub checksum: u32,
}

impl ResponseHeader {
    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(MAX_HEADER_SIZE + self.error.len());
        self.marshal_into(&mut buf);
        buf
    }

    pub fn marshal_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.compression_tag.to_le_bytes());
        encode_uvarint(buf, self.sequence_id);
        put_string(buf, &self.error);
        encode_uvarint(buf, u64::from(self.payload_length));
        buf.extend_from_slice(&self.checksum.to_le_bytes());
    }

    /// Decodes `data` into `self`, leaving it unchanged on error.
    pub fn unmarshal(&mut self, data: &[u8]) -> Result<(), HeaderDecodeError> {
        *self = Self::decode(data)?;
        Ok(())
    }

    pub fn decode(data: &[u8]) -> Result<Self, HeaderDecodeError> {
        let mut cursor = HeaderCursor::new(data)?;

        let compression_tag = cursor.read_u16_le("compression_tag")?;
        let sequence_id = cursor.read_uvarint("sequence_id")?;
        let error = cursor.read_string("error")?;
        let payload_length = cursor.read_uvarint_u32("payload_length")?;
        let checksum = cursor.read_u32_le("checksum")?;

        Ok(Self {
            compression_tag,
            sequence_id,
            error,
            payload_length,
            checksum,
        })
    }

    pub fn compression_type(&self) -> Option<CompressionType> {
        CompressionType::try_from(self.compression_tag).ok()
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

impl Reset for ResponseHeader {
    fn reset(&mut self) {
        self.compression_tag = 0;
        self.sequence_id = 0;
        self.error.clear();
        self.payload_length = 0;
        self.checksum = 0;
    }
}
