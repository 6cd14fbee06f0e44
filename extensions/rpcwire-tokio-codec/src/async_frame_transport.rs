use rpcwire::{
    frame::{FrameDecodeError, FrameError},
    utils::{UvarintDecoder, encode_uvarint, uvarint_len},
};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Async counterpart of [`rpcwire::frame::FrameTransport`].
///
/// Produces and accepts the same `varint(len) || bytes[len]` frames, so a
/// blocking peer and a Tokio peer interoperate.
pub struct AsyncFrameTransport;

impl AsyncFrameTransport {
    /// Writes `bytes` as one frame and returns the bytes placed on the
    /// stream, prefix included. Nothing is flushed.
    pub async fn send<W: AsyncWrite + Unpin + ?Sized>(
        writer: &mut W,
        bytes: &[u8],
    ) -> Result<usize, FrameError> {
        let mut prefix = Vec::with_capacity(uvarint_len(bytes.len() as u64));
        encode_uvarint(&mut prefix, bytes.len() as u64);

        writer.write_all(&prefix).await?;
        writer.write_all(bytes).await?;

        tracing::trace!(
            prefix_len = prefix.len(),
            body_len = bytes.len(),
            "sent frame"
        );

        Ok(prefix.len() + bytes.len())
    }

    /// Reads one frame and returns its body.
    ///
    /// End of stream before the first prefix byte is an `UnexpectedEof` I/O
    /// error; anywhere later it is [`FrameDecodeError::Truncated`].
    pub async fn receive<R: AsyncRead + Unpin + ?Sized>(
        reader: &mut R,
        max_frame_size: usize,
    ) -> Result<Vec<u8>, FrameError> {
        let len = Self::read_length(reader).await?;

        if len > max_frame_size as u64 {
            return Err(FrameDecodeError::TooLarge {
                len,
                max: max_frame_size as u64,
            }
            .into());
        }

        let body = Self::read_block(reader, len as usize).await?;

        tracing::trace!(body_len = body.len(), "received frame");

        Ok(body)
    }

    pub async fn write_block<W: AsyncWrite + Unpin + ?Sized>(
        writer: &mut W,
        bytes: &[u8],
    ) -> Result<(), FrameError> {
        writer.write_all(bytes).await?;
        Ok(())
    }

    /// Reads exactly `len` raw bytes.
    pub async fn read_block<R: AsyncRead + Unpin + ?Sized>(
        reader: &mut R,
        len: usize,
    ) -> Result<Vec<u8>, FrameError> {
        let mut buf = vec![0u8; len];

        match reader.read_exact(&mut buf).await {
            Ok(_) => Ok(buf),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(FrameDecodeError::Truncated.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Consumes and drops exactly `len` raw bytes.
    pub async fn discard<R: AsyncRead + Unpin + ?Sized>(
        reader: &mut R,
        len: u64,
    ) -> Result<(), FrameError> {
        let copied = tokio::io::copy(&mut reader.take(len), &mut tokio::io::sink()).await?;

        if copied < len {
            return Err(FrameDecodeError::Truncated.into());
        }

        Ok(())
    }

    async fn read_length<R: AsyncRead + Unpin + ?Sized>(reader: &mut R) -> Result<u64, FrameError> {
        let mut decoder = UvarintDecoder::new();

        loop {
            let byte = match reader.read_u8().await {
                Ok(byte) => byte,
                // Keep the bare EOF on a frame boundary so callers can tell a
                // closed peer from a torn frame.
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && decoder.consumed() > 0 => {
                    return Err(FrameDecodeError::Truncated.into());
                }
                Err(e) => return Err(e.into()),
            };

            match decoder.push(byte) {
                Ok(Some(len)) => return Ok(len),
                Ok(None) => {}
                Err(_) => return Err(FrameDecodeError::VarintOverflow.into()),
            }
        }
    }
}
