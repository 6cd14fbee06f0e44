use crate::{
    compression::CompressionType,
    constants::{DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_FRAME_SIZE},
};

/// Per-connection settings for a client codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientCodecConfig {
    /// Tag used to compress requests. Responses must carry the same tag.
    pub compression_tag: u16,

    /// Largest header frame or response body accepted from the peer.
    pub max_frame_size: usize,

    pub read_buffer_capacity: usize,

    pub write_buffer_capacity: usize,
}

impl Default for ClientCodecConfig {
    fn default() -> Self {
        Self {
            compression_tag: CompressionType::Raw.tag(),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            read_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            write_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

impl ClientCodecConfig {
    /// Accepts a [`CompressionType`] or a raw tag registered in a custom
    /// registry.
    pub fn with_compression(mut self, tag: impl Into<u16>) -> Self {
        self.compression_tag = tag.into();
        self
    }

    pub fn with_max_frame_size(mut self, max_frame_size: usize) -> Self {
        self.max_frame_size = max_frame_size;
        self
    }

    pub fn with_buffer_capacity(mut self, read: usize, write: usize) -> Self {
        self.read_buffer_capacity = read;
        self.write_buffer_capacity = write;
        self
    }
}
