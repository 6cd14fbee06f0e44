use rpcwire::{
    compression::CompressionType,
    header::{HeaderDecodeError, RequestHeader, ResponseHeader},
};

const REQUEST_BYTES: [u8; 14] = [
    0x0, 0x0, 0x3, 0x41, 0x64, 0x64, 0x80, 0x1, 0x80, 0x4, 0x8, 0xa2, 0xf, 0x0,
];

fn response_bytes() -> Vec<u8> {
    let mut bytes = vec![0x1, 0x0, 0x40, 0xd];
    bytes.extend_from_slice(b"error occured");
    bytes.extend_from_slice(&[0x80, 0x1, 0x0, 0x1, 0x0, 0x0]);
    bytes
}

fn request() -> RequestHeader {
    RequestHeader {
        compression_tag: 0,
        method: "Add".to_string(),
        sequence_id: 128,
        payload_length: 512,
        checksum: 1_024_520,
    }
}

fn response() -> ResponseHeader {
    ResponseHeader {
        compression_tag: 1,
        sequence_id: 64,
        error: "error occured".to_string(),
        payload_length: 128,
        checksum: 256,
    }
}

#[test]
fn request_header_matches_known_bytes() {
    assert_eq!(request().marshal(), REQUEST_BYTES);

    let decoded = RequestHeader::decode(&REQUEST_BYTES).expect("decode failed");
    assert_eq!(decoded, request());
    assert_eq!(decoded.compression_type(), Some(CompressionType::Raw));
}

#[test]
fn response_header_matches_known_bytes() {
    assert_eq!(response().marshal(), response_bytes());

    let mut decoded = ResponseHeader::default();
    decoded.unmarshal(&response_bytes()).expect("unmarshal failed");
    assert_eq!(decoded, response());
    assert!(decoded.is_error());
    assert_eq!(decoded.compression_type(), Some(CompressionType::Gzip));
}

#[test]
fn marshal_into_appends() {
    let mut buf = vec![0xaa];
    request().marshal_into(&mut buf);
    assert_eq!(buf[0], 0xaa);
    assert_eq!(&buf[1..], REQUEST_BYTES);
}

#[test]
fn empty_input_is_rejected() {
    assert_eq!(RequestHeader::decode(&[]), Err(HeaderDecodeError::Empty));
    assert_eq!(ResponseHeader::decode(&[]), Err(HeaderDecodeError::Empty));
}

#[test]
fn every_proper_prefix_is_truncated() {
    for len in 1..REQUEST_BYTES.len() {
        let err = RequestHeader::decode(&REQUEST_BYTES[..len]).unwrap_err();
        assert!(
            matches!(err, HeaderDecodeError::Truncated { .. }),
            "prefix of {len} bytes gave {err:?}"
        );
    }

    let bytes = response_bytes();
    for len in 1..bytes.len() {
        let err = ResponseHeader::decode(&bytes[..len]).unwrap_err();
        assert!(matches!(err, HeaderDecodeError::Truncated { .. }));
    }
}

#[test]
fn failed_unmarshal_leaves_header_untouched() {
    let mut header = response();
    let err = header.unmarshal(&response_bytes()[..5]).unwrap_err();

    assert!(matches!(err, HeaderDecodeError::Truncated { .. }));
    assert_eq!(header, response());
}

#[test]
fn invalid_utf8_method_is_rejected() {
    let bytes = [0x0, 0x0, 0x2, 0xff, 0xfe, 0x1, 0x0, 0x0, 0x0, 0x0, 0x0];
    assert!(matches!(
        RequestHeader::decode(&bytes),
        Err(HeaderDecodeError::InvalidUtf8 { .. })
    ));
}

#[test]
fn payload_length_wider_than_u32_is_rejected() {
    let mut bytes = vec![0x0, 0x0, 0x0, 0x1];
    // 2^32 as a varint.
    bytes.extend_from_slice(&[0x80, 0x80, 0x80, 0x80, 0x10]);
    bytes.extend_from_slice(&[0x0; 4]);

    assert!(matches!(
        RequestHeader::decode(&bytes),
        Err(HeaderDecodeError::LengthOverflow { .. })
    ));
}

#[test]
fn unknown_compression_tag_still_decodes() {
    let mut bytes = REQUEST_BYTES;
    bytes[0] = 0x09;

    let header = RequestHeader::decode(&bytes).expect("decode failed");
    assert_eq!(header.compression_tag, 9);
    assert_eq!(header.compression_type(), None);
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut bytes = REQUEST_BYTES.to_vec();
    bytes.extend_from_slice(&[0xde, 0xad]);
    assert_eq!(RequestHeader::decode(&bytes).unwrap(), request());
}
