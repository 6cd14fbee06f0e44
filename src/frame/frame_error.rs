use std::io;
use thiserror::Error;

/// A length prefix or frame body that could not be decoded from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameDecodeError {
    /// The length prefix is longer than ten bytes or does not fit in a `u64`.
    #[error("frame length prefix overflows a 64-bit integer")]
    VarintOverflow,

    /// The stream ended inside a length prefix or before the declared number
    /// of body bytes arrived.
    #[error("stream ended inside a frame")]
    Truncated,

    /// The declared length exceeds the configured frame size limit.
    #[error("frame of {len} bytes exceeds the limit of {max} bytes")]
    TooLarge { len: u64, max: u64 },
}

/// Errors surfaced by [`FrameTransport`](crate::frame::FrameTransport).
#[derive(Debug, Error)]
pub enum FrameError {
    /// The underlying stream failed with a non-transient error.
    #[error("frame I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Decode(#[from] FrameDecodeError),
}

impl FrameError {
    /// Returns `true` when the peer closed the stream cleanly between frames.
    pub fn is_closed(&self) -> bool {
        matches!(self, FrameError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}
