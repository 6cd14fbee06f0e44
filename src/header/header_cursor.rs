use crate::{
    header::HeaderDecodeError,
    utils::{VarintError, decode_uvarint, encode_uvarint},
};

/// Bounds-checked reader over marshaled header bytes.
///
/// Every read advances by the width the field actually occupied, and any
/// read past the end fails with [`HeaderDecodeError::Truncated`].
pub(crate) struct HeaderCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Result<Self, HeaderDecodeError> {
        if data.is_empty() {
            return Err(HeaderDecodeError::Empty);
        }

        Ok(Self { data, pos: 0 })
    }

    pub(crate) fn read_u16_le(&mut self, field: &'static str) -> Result<u16, HeaderDecodeError> {
        let bytes = self.take(2, field)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn read_u32_le(&mut self, field: &'static str) -> Result<u32, HeaderDecodeError> {
        let bytes = self.take(4, field)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn read_uvarint(&mut self, field: &'static str) -> Result<u64, HeaderDecodeError> {
        let (value, size) = decode_uvarint(&self.data[self.pos..]).map_err(|e| match e {
            VarintError::Truncated => HeaderDecodeError::Truncated { field },
            VarintError::Overflow => HeaderDecodeError::VarintOverflow { field },
        })?;

        self.pos += size;
        Ok(value)
    }

    /// Reads a varint that must fit in a `u32`.
    pub(crate) fn read_uvarint_u32(
        &mut self,
        field: &'static str,
    ) -> Result<u32, HeaderDecodeError> {
        let value = self.read_uvarint(field)?;
        u32::try_from(value).map_err(|_| HeaderDecodeError::LengthOverflow { field })
    }

    /// Reads a varint length followed by that many UTF-8 bytes.
    pub(crate) fn read_string(&mut self, field: &'static str) -> Result<String, HeaderDecodeError> {
        let len = self.read_uvarint(field)?;
        let len = usize::try_from(len).map_err(|_| HeaderDecodeError::LengthOverflow { field })?;
        let bytes = self.take(len, field)?;

        String::from_utf8(bytes.to_vec()).map_err(|_| HeaderDecodeError::InvalidUtf8 { field })
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], HeaderDecodeError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(HeaderDecodeError::Truncated { field })?;

        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }
}

/// Appends `value` as a varint length followed by its bytes.
pub(crate) fn put_string(buf: &mut Vec<u8>, value: &str) {
    encode_uvarint(buf, value.len() as u64);
    buf.extend_from_slice(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            HeaderCursor::new(&[]),
            Err(HeaderDecodeError::Empty)
        ));
    }

    #[test]
    fn string_length_past_end_is_truncation() {
        // Declares 5 bytes but carries 2.
        let mut cursor = HeaderCursor::new(&[0x05, b'h', b'i']).unwrap();
        assert_eq!(
            cursor.read_string("method"),
            Err(HeaderDecodeError::Truncated { field: "method" })
        );
    }

    #[test]
    fn huge_string_length_does_not_overflow_position() {
        let mut bytes = Vec::new();
        encode_uvarint(&mut bytes, u64::MAX);
        let mut cursor = HeaderCursor::new(&bytes).unwrap();

        let err = cursor.read_string("error").unwrap_err();
        assert!(matches!(
            err,
            HeaderDecodeError::Truncated { .. } | HeaderDecodeError::LengthOverflow { .. }
        ));
    }

    #[test]
    fn fixed_width_reads_advance_cursor() {
        let mut cursor = HeaderCursor::new(&[0x01, 0x00, 0x08, 0xa2, 0x0f, 0x00]).unwrap();
        assert_eq!(cursor.read_u16_le("tag"), Ok(1));
        assert_eq!(cursor.read_u32_le("checksum"), Ok(1_024_520));
        assert_eq!(
            cursor.read_u16_le("tag"),
            Err(HeaderDecodeError::Truncated { field: "tag" })
        );
    }
}
