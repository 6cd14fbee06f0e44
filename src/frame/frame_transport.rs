use crate::{
    frame::{FrameDecodeError, FrameError},
    utils::{UvarintDecoder, encode_uvarint, uvarint_len},
};
use std::io::{self, Read, Write};

/// Reads and writes varint length-prefixed byte blocks over a byte stream.
///
/// A frame on the wire is `varint(len) || bytes[len]`. Zero-length frames
/// are valid and round-trip to an empty block.
///
/// `FrameTransport` holds no state. Callers that share one writer between
/// threads must serialize access themselves, otherwise two frames may
/// interleave on the wire.
pub struct FrameTransport;

impl FrameTransport {
    /// Writes `bytes` as one frame.
    ///
    /// # Arguments
    ///
    /// * `writer` - The stream to write to. Nothing is flushed.
    /// * `bytes` - The frame body; may be empty.
    ///
    /// # Returns
    ///
    /// The total number of bytes placed on the stream, prefix included.
    pub fn send<W: Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> Result<usize, FrameError> {
        let mut prefix = Vec::with_capacity(uvarint_len(bytes.len() as u64));
        encode_uvarint(&mut prefix, bytes.len() as u64);

        Self::write_block(writer, &prefix)?;
        Self::write_block(writer, bytes)?;

        tracing::trace!(
            prefix_len = prefix.len(),
            body_len = bytes.len(),
            "sent frame"
        );

        Ok(prefix.len() + bytes.len())
    }

    /// Reads one frame and returns its body.
    ///
    /// # Arguments
    ///
    /// * `reader` - The stream to read from.
    /// * `max_frame_size` - Largest declared length accepted.
    ///
    /// # Errors
    ///
    /// Fails with [`FrameDecodeError::TooLarge`] before allocating when the
    /// declared length exceeds `max_frame_size`. A stream that ends before
    /// the first prefix byte surfaces as an `UnexpectedEof` I/O error; one
    /// that ends anywhere later is [`FrameDecodeError::Truncated`].
    pub fn receive<R: Read + ?Sized>(
        reader: &mut R,
        max_frame_size: usize,
    ) -> Result<Vec<u8>, FrameError> {
        let len = Self::read_length(reader)?;

        if len > max_frame_size as u64 {
            return Err(FrameDecodeError::TooLarge {
                len,
                max: max_frame_size as u64,
            }
            .into());
        }

        let body = Self::read_block(reader, len as usize)?;

        tracing::trace!(body_len = body.len(), "received frame");

        Ok(body)
    }

    /// Writes `bytes` verbatim, retrying short and interrupted writes until
    /// every byte is accepted.
    pub fn write_block<W: Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> Result<(), FrameError> {
        let mut written = 0;

        while written < bytes.len() {
            match writer.write(&bytes[written..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "stream accepted no bytes",
                    )
                    .into());
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }

    /// Reads exactly `len` raw bytes, retrying short and interrupted reads.
    pub fn read_block<R: Read + ?Sized>(reader: &mut R, len: usize) -> Result<Vec<u8>, FrameError> {
        let mut buf = vec![0u8; len];
        let mut filled = 0;

        while filled < len {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => return Err(FrameDecodeError::Truncated.into()),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(buf)
    }

    /// Consumes and drops exactly `len` raw bytes without buffering them.
    pub fn discard<R: Read + ?Sized>(reader: &mut R, len: u64) -> Result<(), FrameError> {
        let copied = io::copy(&mut reader.take(len), &mut io::sink())?;

        if copied < len {
            return Err(FrameDecodeError::Truncated.into());
        }

        Ok(())
    }

    fn read_length<R: Read + ?Sized>(reader: &mut R) -> Result<u64, FrameError> {
        let mut decoder = UvarintDecoder::new();

        loop {
            let byte = match Self::read_byte(reader)? {
                Some(byte) => byte,
                None if decoder.consumed() == 0 => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "stream closed between frames",
                    )
                    .into());
                }
                None => return Err(FrameDecodeError::Truncated.into()),
            };

            match decoder.push(byte) {
                Ok(Some(len)) => return Ok(len),
                Ok(None) => {}
                Err(_) => return Err(FrameDecodeError::VarintOverflow.into()),
            }
        }
    }

    fn read_byte<R: Read + ?Sized>(reader: &mut R) -> Result<Option<u8>, FrameError> {
        let mut byte = [0u8; 1];

        loop {
            match reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
