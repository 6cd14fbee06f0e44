mod compression_error;
mod compression_type;
mod compressor;
mod compressor_registry;
mod gzip_compressor;
mod raw_compressor;
mod snappy_compressor;
mod zlib_compressor;

pub use compression_error::CompressionError;
pub use compression_type::CompressionType;
pub use compressor::Compressor;
pub use compressor_registry::{CompressorRegistry, CompressorRegistryBuilder, standard_compressors};
pub use gzip_compressor::GzipCompressor;
pub use raw_compressor::RawCompressor;
pub use snappy_compressor::SnappyCompressor;
pub use zlib_compressor::ZlibCompressor;
