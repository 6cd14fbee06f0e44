use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Compression tags understood by the standard registry.
///
/// Headers carry the tag as a raw `u16` so that a tag outside this enum can
/// still be decoded, and rejected later at registry lookup.
#[repr(u16)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum CompressionType {
    #[default]
    Raw = 0,
    Gzip = 1,
    Snappy = 2,
    Zlib = 3,
}

impl CompressionType {
    pub const ALL: [CompressionType; 4] = [
        CompressionType::Raw,
        CompressionType::Gzip,
        CompressionType::Snappy,
        CompressionType::Zlib,
    ];

    /// The on-wire tag.
    #[inline]
    pub fn tag(self) -> u16 {
        self.into()
    }
}
