use rpcwire::compression::{
    CompressionError, CompressionType, Compressor, CompressorRegistry, GzipCompressor,
    RawCompressor, standard_compressors,
};

fn sample() -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog "
        .iter()
        .cycle()
        .take(4096)
        .copied()
        .collect()
}

#[test]
fn standard_registry_restores_every_payload() {
    let registry = standard_compressors();
    assert_eq!(registry.tags(), vec![0, 1, 2, 3]);

    for compression in CompressionType::ALL {
        let compressor = registry.get(compression.tag()).expect("lookup failed");

        for data in [Vec::new(), vec![0x42], sample()] {
            let zipped = compressor.zip(&data).expect("zip failed");
            let unzipped = compressor.unzip(&zipped).expect("unzip failed");
            assert_eq!(unzipped, data, "{compression:?} altered {} bytes", data.len());
        }
    }
}

#[test]
fn raw_is_identity() {
    let data = sample();
    assert_eq!(RawCompressor.zip(&data).unwrap(), data);
    assert_eq!(RawCompressor.unzip(&data).unwrap(), data);
}

#[test]
fn real_compressors_shrink_repetitive_input() {
    let registry = standard_compressors();
    let data = sample();

    for compression in [
        CompressionType::Gzip,
        CompressionType::Snappy,
        CompressionType::Zlib,
    ] {
        let zipped = registry.get(compression.tag()).unwrap().zip(&data).unwrap();
        assert!(zipped.len() < data.len(), "{compression:?} did not compress");
    }
}

#[test]
fn unknown_tag_is_an_error() {
    let err = standard_compressors().get(42).err().expect("tag 42 resolved");
    assert!(matches!(err, CompressionError::UnknownCompressor(42)));
    assert!(!standard_compressors().contains(42));
}

#[test]
fn corrupt_gzip_stream_fails_to_unzip() {
    let err = GzipCompressor::default()
        .unzip(b"definitely not gzip")
        .unwrap_err();
    assert!(matches!(err, CompressionError::Io(_)));
}

#[test]
fn custom_registry_only_knows_what_was_registered() {
    let registry = CompressorRegistry::builder()
        .register(CompressionType::Raw, RawCompressor)
        .register(100u16, GzipCompressor::with_level(9))
        .build();

    assert_eq!(registry.tags(), vec![0, 100]);
    assert!(registry.get(CompressionType::Snappy.tag()).is_err());

    let data = sample();
    let zipped = registry.get(100).unwrap().zip(&data).unwrap();
    assert_eq!(registry.get(100).unwrap().unzip(&zipped).unwrap(), data);
}

#[test]
fn compression_type_maps_to_wire_tags() {
    assert_eq!(CompressionType::default(), CompressionType::Raw);
    assert_eq!(u16::from(CompressionType::Zlib), 3);
    assert_eq!(
        CompressionType::try_from(2u16).ok(),
        Some(CompressionType::Snappy)
    );
    assert!(CompressionType::try_from(4u16).is_err());
}
