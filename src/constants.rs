/// Maximum number of bytes a LEB128-encoded `u64` can occupy.
pub const MAX_VARINT_LEN64: usize = 10;

/// Size in bytes of the fixed little-endian compression tag (u16).
pub const HEADER_COMPRESSION_TAG_SIZE: usize = 2;

/// Size in bytes of the fixed little-endian checksum (u32).
pub const HEADER_CHECKSUM_SIZE: usize = 4;

/// Upper bound of a marshaled header, excluding its method or error string.
///
/// Computed as: tag (2) + string length varint (10) + sequence id varint (10)
/// + payload length varint (10) + checksum (4).
pub const MAX_HEADER_SIZE: usize = HEADER_COMPRESSION_TAG_SIZE
    + MAX_VARINT_LEN64 * 3
    + HEADER_CHECKSUM_SIZE; // 36

/// Largest frame or body a codec accepts unless configured otherwise.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Default capacity of the buffered reader and writer wrapping a stream.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Number of idle headers each pool keeps for reuse.
pub const HEADER_POOL_CAPACITY: usize = 64;
