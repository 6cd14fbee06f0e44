use crate::{
    compression::CompressionError, frame::FrameError, header::HeaderDecodeError,
    serialization::SerializationError,
};
use std::io;
use thiserror::Error;

/// Errors reported by the client codecs.
///
/// Nothing is retried internally; every failure is returned to the caller
/// of the operation that hit it.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("malformed header: {0}")]
    Header(#[from] HeaderDecodeError),

    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error(transparent)]
    Serialization(#[from] SerializationError),

    #[error("stream I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The response body does not match the checksum its header carried.
    #[error("checksum mismatch: header carries {expected:#010x}, body hashes to {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// The response was compressed with a different tag than this client
    /// sends with.
    #[error("response compressed with tag {actual}, client is configured for tag {expected}")]
    CompressorMismatch { expected: u16, actual: u16 },

    #[error("request method name is empty")]
    EmptyMethod,

    /// A call with this sequence id is still awaiting its response.
    #[error("sequence id {0} is already pending")]
    SequenceInUse(u64),

    #[error("payload of {len} bytes exceeds the limit of {max} bytes")]
    PayloadTooLarge { len: u64, max: u64 },

    /// Another context is already reading responses.
    #[error("a response is already being read by another context")]
    ReaderBusy,

    /// A new header was requested before the previous body was consumed.
    #[error("previous response body has not been consumed")]
    BodyNotConsumed,

    #[error("no response header has been read")]
    NoResponseHeader,

    /// An earlier request stopped partway through its header or body, so
    /// the request stream is no longer framed and has been dropped.
    #[error("request stream was interrupted mid-request")]
    WriterTorn,

    #[error("{0} lock poisoned")]
    Poisoned(&'static str),

    #[error("codec is closed")]
    Closed,
}

impl CodecError {
    /// Returns `true` when the peer closed the stream between frames.
    pub fn is_disconnect(&self) -> bool {
        match self {
            CodecError::Frame(e) => e.is_closed(),
            CodecError::Closed | CodecError::WriterTorn => true,
            _ => false,
        }
    }
}
