use crate::{
    codec::CodecError,
    header::{RESPONSE_POOL, Reset, ResponseHeader},
};

/// Which half of a response the reader expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPhase {
    AwaitHeader,
    AwaitBody,
}

/// The single response header a reader reuses across each header/body pair.
///
/// Enforces the read order: a header must be followed by exactly one body
/// read before the next header.
#[derive(Debug)]
pub struct ResponseSlot {
    header: ResponseHeader,
    phase: ReadPhase,
}

impl ResponseSlot {
    pub fn new() -> Self {
        Self {
            header: RESPONSE_POOL.get(),
            phase: ReadPhase::AwaitHeader,
        }
    }

    pub fn phase(&self) -> ReadPhase {
        self.phase
    }

    pub fn header(&self) -> &ResponseHeader {
        &self.header
    }

    /// Clears the slot for the next header.
    pub fn begin_header(&mut self) -> Result<(), CodecError> {
        if self.phase == ReadPhase::AwaitBody {
            return Err(CodecError::BodyNotConsumed);
        }

        self.header.reset();
        Ok(())
    }

    /// Decodes a received header frame into the slot.
    pub fn accept_header(&mut self, frame: &[u8]) -> Result<&ResponseHeader, CodecError> {
        self.header.unmarshal(frame)?;
        self.phase = ReadPhase::AwaitBody;
        Ok(&self.header)
    }

    /// Marks the body as consumed and returns the header describing it.
    ///
    /// The phase flips back to [`ReadPhase::AwaitHeader`] whether or not the
    /// body then decodes successfully.
    pub fn begin_body(&mut self) -> Result<&ResponseHeader, CodecError> {
        if self.phase == ReadPhase::AwaitHeader {
            return Err(CodecError::NoResponseHeader);
        }

        self.phase = ReadPhase::AwaitHeader;
        Ok(&self.header)
    }
}

impl Default for ResponseSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ResponseSlot {
    fn drop(&mut self) {
        RESPONSE_POOL.put(std::mem::take(&mut self.header));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_frame(sequence_id: u64) -> Vec<u8> {
        ResponseHeader {
            sequence_id,
            payload_length: 4,
            ..Default::default()
        }
        .marshal()
    }

    #[test]
    fn header_then_body_cycles_phase() {
        let mut slot = ResponseSlot::new();
        slot.begin_header().unwrap();
        assert_eq!(slot.accept_header(&header_frame(5)).unwrap().sequence_id, 5);
        assert_eq!(slot.phase(), ReadPhase::AwaitBody);

        assert_eq!(slot.begin_body().unwrap().payload_length, 4);
        assert_eq!(slot.phase(), ReadPhase::AwaitHeader);
    }

    #[test]
    fn second_header_before_body_is_rejected() {
        let mut slot = ResponseSlot::new();
        slot.begin_header().unwrap();
        slot.accept_header(&header_frame(1)).unwrap();

        assert!(matches!(slot.begin_header(), Err(CodecError::BodyNotConsumed)));
    }

    #[test]
    fn body_without_header_is_rejected() {
        let mut slot = ResponseSlot::new();
        assert!(matches!(slot.begin_body(), Err(CodecError::NoResponseHeader)));
    }

    #[test]
    fn failed_decode_keeps_awaiting_header() {
        let mut slot = ResponseSlot::new();
        slot.begin_header().unwrap();

        assert!(matches!(slot.accept_header(&[]), Err(CodecError::Header(_))));
        assert_eq!(slot.phase(), ReadPhase::AwaitHeader);
        assert_eq!(slot.header(), &ResponseHeader::default());
    }
}
