use crate::compression::{
    CompressionError, CompressionType, Compressor, GzipCompressor, RawCompressor,
    SnappyCompressor, ZlibCompressor,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

static STANDARD_COMPRESSORS: Lazy<Arc<CompressorRegistry>> =
    Lazy::new(|| Arc::new(CompressorRegistry::standard()));

/// Returns the process-wide registry holding raw, gzip, snappy and zlib.
pub fn standard_compressors() -> Arc<CompressorRegistry> {
    Arc::clone(&STANDARD_COMPRESSORS)
}

/// An immutable table mapping compression tags to their transforms.
///
/// Registries are assembled once through [`CompressorRegistryBuilder`] and
/// cannot be modified afterwards; share them behind an `Arc`.
pub struct CompressorRegistry {
    compressors: HashMap<u16, Box<dyn Compressor>>,
}

impl CompressorRegistry {
    pub fn builder() -> CompressorRegistryBuilder {
        CompressorRegistryBuilder {
            compressors: HashMap::new(),
        }
    }

    /// A registry with every [`CompressionType`] at its default level.
    pub fn standard() -> Self {
        Self::builder()
            .register(CompressionType::Raw, RawCompressor)
            .register(CompressionType::Gzip, GzipCompressor::default())
            .register(CompressionType::Snappy, SnappyCompressor)
            .register(CompressionType::Zlib, ZlibCompressor::default())
            .build()
    }

    /// Looks up the compressor registered under `tag`.
    pub fn get(&self, tag: u16) -> Result<&dyn Compressor, CompressionError> {
        self.compressors
            .get(&tag)
            .map(|compressor| compressor.as_ref())
            .ok_or(CompressionError::UnknownCompressor(tag))
    }

    pub fn contains(&self, tag: u16) -> bool {
        self.compressors.contains_key(&tag)
    }

    /// Registered tags in ascending order.
    pub fn tags(&self) -> Vec<u16> {
        let mut tags: Vec<u16> = self.compressors.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for CompressorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompressorRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

pub struct CompressorRegistryBuilder {
    compressors: HashMap<u16, Box<dyn Compressor>>,
}

impl CompressorRegistryBuilder {
    /// Registers `compressor` under `tag`, replacing any earlier entry.
    pub fn register<T, C>(mut self, tag: T, compressor: C) -> Self
    where
        T: Into<u16>,
        C: Compressor + 'static,
    {
        self.compressors.insert(tag.into(), Box::new(compressor));
        self
    }

    pub fn build(self) -> CompressorRegistry {
        CompressorRegistry {
            compressors: self.compressors,
        }
    }
}
