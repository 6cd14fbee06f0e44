use crate::constants::MAX_VARINT_LEN64;

/// Failure modes of decoding an unsigned LEB128 varint from a byte slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarintError {
    /// The slice ended before a byte without the continuation bit was seen.
    Truncated,

    /// The encoding is longer than ten bytes or does not fit in a `u64`.
    Overflow,
}

/// Appends `value` to `buf` as an unsigned LEB128 varint.
///
/// Seven bits are emitted per byte, least significant group first, with the
/// high bit set on every byte except the last. Returns the number of bytes
/// written.
#[inline]
pub fn encode_uvarint(buf: &mut Vec<u8>, mut value: u64) -> usize {
    let start = buf.len();

    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);

    buf.len() - start
}

/// Decodes an unsigned LEB128 varint from the front of `buf`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_uvarint(buf: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut decoder = UvarintDecoder::new();

    for &byte in buf {
        if let Some(value) = decoder.push(byte)? {
            return Ok((value, decoder.consumed()));
        }
    }

    Err(VarintError::Truncated)
}

/// Accumulates a varint one byte at a time.
///
/// Used where bytes arrive from a stream rather than a slice. Each call to
/// [`push`](Self::push) consumes one byte and yields the value once the byte
/// without the continuation bit arrives.
#[derive(Debug, Default, Clone, Copy)]
pub struct UvarintDecoder {
    value: u64,
    shift: u32,
    consumed: usize,
}

impl UvarintDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next byte.
    ///
    /// # Returns
    ///
    /// `Ok(Some(value))` when `byte` terminates the varint, `Ok(None)` when
    /// more bytes are needed, and [`VarintError::Overflow`] when the
    /// encoding runs past ten bytes or the tenth byte carries more than the
    /// single remaining bit.
    pub fn push(&mut self, byte: u8) -> Result<Option<u64>, VarintError> {
        if self.consumed == MAX_VARINT_LEN64 {
            return Err(VarintError::Overflow);
        }
        self.consumed += 1;

        let last = self.consumed == MAX_VARINT_LEN64;

        if byte < 0x80 {
            if last && byte > 1 {
                return Err(VarintError::Overflow);
            }
            return Ok(Some(self.value | (u64::from(byte) << self.shift)));
        }

        if last {
            return Err(VarintError::Overflow);
        }

        self.value |= u64::from(byte & 0x7f) << self.shift;
        self.shift += 7;
        Ok(None)
    }

    /// Bytes pushed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

/// Number of bytes `value` occupies once varint-encoded.
#[inline]
pub fn uvarint_len(value: u64) -> usize {
    let significant_bits = 64 - (value | 1).leading_zeros() as usize;
    significant_bits.div_ceil(7)
}
