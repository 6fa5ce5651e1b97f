use dibkit::*;

/// Build a 32-bpp BMP byte stream by hand, independent of the crate's own
/// serializer, so the parser is tested against the published layout.
fn bmp_bytes(width: u32, height: i32, quads: &[[u8; 4]]) -> Vec<u8> {
    let file_size = 54 + 4 * quads.len() as u32;
    let mut out = Vec::with_capacity(file_size as usize);

    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&54u32.to_le_bytes());

    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression: RGB
    out.extend_from_slice(&0u32.to_le_bytes()); // image size
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for quad in quads {
        out.extend_from_slice(quad);
    }
    out
}

#[test]
fn two_by_two_bottom_up_scenario() {
    let quads = [
        [0x11, 0x22, 0x33, 0x44],
        [0x55, 0x66, 0x77, 0x88],
        [0x99, 0xAA, 0xBB, 0xCC],
        [0xDD, 0xEE, 0xFF, 0x00],
    ];
    let bmp = Bitmap::parse(bmp_bytes(2, 2, &quads)).unwrap();

    assert_eq!(bmp.width(), 2);
    assert_eq!(bmp.height(), 2);
    assert_eq!(bmp.scanline_order(), ScanlineOrder::BottomUp);
    // (0, 0) is the first BGRA quad in the byte stream.
    assert_eq!(
        bmp.pixel(0, 0).unwrap(),
        Pixel::with_reserved(0x11, 0x22, 0x33, 0x44)
    );
    assert_eq!(
        bmp.pixel(1, 1).unwrap(),
        Pixel::with_reserved(0xDD, 0xEE, 0xFF, 0x00)
    );
}

#[test]
fn unmodified_roundtrip_is_byte_identical() {
    let quads = [
        [1, 2, 3, 4],
        [5, 6, 7, 8],
        [9, 10, 11, 12],
        [13, 14, 15, 16],
        [17, 18, 19, 20],
        [21, 22, 23, 24],
    ];
    let mut original = bmp_bytes(3, 2, &quads);
    // Nonzero reserved bytes and a nonzero image-size field must survive.
    original[6..10].copy_from_slice(&[0xCA, 0xFE, 0xBA, 0xBE]);
    original[34..38].copy_from_slice(&24u32.to_le_bytes());

    let bmp = Bitmap::parse(original.clone()).unwrap();
    assert_eq!(bmp.to_bytes(), original);

    // And the parse of the serialization is the same value.
    let reparsed = Bitmap::parse(bmp.to_bytes()).unwrap();
    assert_eq!(reparsed, bmp);
}

#[test]
fn modified_pixels_roundtrip() {
    let mut bmp = Bitmap::parse(bmp_bytes(2, 1, &[[0; 4], [0; 4]])).unwrap();
    bmp.set_pixel(0, 1, Pixel::new(10, 20, 30)).unwrap();

    let reparsed = Bitmap::parse(bmp.to_bytes()).unwrap();
    assert_eq!(reparsed.pixel(0, 1).unwrap(), Pixel::new(10, 20, 30));
    assert_eq!(reparsed, bmp);
}

#[test]
fn bad_signature_short_circuits() {
    let mut data = bmp_bytes(2, 2, &[[0; 4]; 4]);
    data[0] = b'X';
    // Also corrupt the info-header size: the reported error must still be
    // BadSignature, proving info-header parsing never ran.
    data[14..18].copy_from_slice(&124u32.to_le_bytes());

    assert!(matches!(
        Bitmap::parse(data),
        Err(DibError::BadSignature)
    ));
}

#[test]
fn truncated_pixel_data() {
    let mut data = bmp_bytes(4, 4, &[[0xAB; 4]; 16]);
    data.truncate(54 + 4 * 10);
    match Bitmap::parse(data) {
        Err(DibError::Truncated { needed, actual }) => {
            assert_eq!(needed, 54 + 4 * 16);
            assert_eq!(actual, 54 + 4 * 10);
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn non_info_header_sizes_rejected() {
    for declared in [12u32, 108, 124] {
        let mut data = bmp_bytes(2, 2, &[[0; 4]; 4]);
        data[14..18].copy_from_slice(&declared.to_le_bytes());
        assert!(
            matches!(
                Bitmap::parse(data),
                Err(DibError::UnsupportedHeaderVariant(_))
            ),
            "declared header size {declared} must be rejected"
        );
    }
}

#[test]
fn unsupported_depth_and_compression_rejected() {
    let mut data = bmp_bytes(2, 2, &[[0; 4]; 4]);
    data[28..30].copy_from_slice(&24u16.to_le_bytes());
    assert!(matches!(
        Bitmap::parse(data),
        Err(DibError::UnsupportedHeaderVariant(_))
    ));

    let mut data = bmp_bytes(2, 2, &[[0; 4]; 4]);
    data[30..34].copy_from_slice(&1u32.to_le_bytes()); // RLE8
    assert!(matches!(
        Bitmap::parse(data),
        Err(DibError::UnsupportedHeaderVariant(_))
    ));
}

#[test]
fn negative_height_is_top_down() {
    let bmp = Bitmap::parse(bmp_bytes(2, -2, &[[0; 4]; 4])).unwrap();
    assert_eq!(bmp.scanline_order(), ScanlineOrder::TopDown);
    assert_eq!(bmp.height(), 2);
    assert_eq!(bmp.info_header().height, -2);
}

#[test]
fn probe_tolerates_unsupported_depths() {
    let mut data = bmp_bytes(7, -3, &[]);
    data[28..30].copy_from_slice(&8u16.to_le_bytes());
    data[30..34].copy_from_slice(&1u32.to_le_bytes()); // RLE8

    let info = DibInfo::from_bytes(&data).unwrap();
    assert_eq!(info.width, 7);
    assert_eq!(info.height, 3);
    assert_eq!(info.bit_count, 8);
    assert_eq!(info.compression, Compression::Rle8);
    assert_eq!(info.scanline_order, ScanlineOrder::TopDown);
}

#[test]
fn limits_reject_large_images() {
    let data = bmp_bytes(4, 4, &[[0; 4]; 16]);
    let limits = Limits {
        max_pixels: Some(8),
        ..Default::default()
    };
    let result = ParseRequest::new(&data).with_limits(&limits).parse(Unstoppable);
    assert!(matches!(result, Err(DibError::LimitExceeded(_))));

    let relaxed = Limits {
        max_pixels: Some(16),
        ..Default::default()
    };
    assert!(
        ParseRequest::new(&data)
            .with_limits(&relaxed)
            .parse(Unstoppable)
            .is_ok()
    );
}

#[test]
fn borrowed_parse_rejects_before_copying() {
    // Headers that declare a multi-gigabyte pixel region over a 54-byte
    // input. The request path validates the borrowed slice up front, so
    // this must fail on the headers alone, through both the limit check
    // and the plain length check.
    let data = bmp_bytes(1 << 16, 1 << 15, &[]);

    let limits = Limits {
        max_memory_bytes: Some(1 << 20),
        ..Default::default()
    };
    let result = ParseRequest::new(&data).with_limits(&limits).parse(Unstoppable);
    assert!(matches!(result, Err(DibError::LimitExceeded(_))));

    let result = ParseRequest::new(&data).parse(Unstoppable);
    assert!(matches!(result, Err(DibError::Truncated { actual: 54, .. })));
}

#[test]
fn request_and_owned_parse_agree() {
    let good = bmp_bytes(2, 2, &[[7; 4]; 4]);
    let via_request = ParseRequest::new(&good).parse(Unstoppable).unwrap();
    let via_owned = Bitmap::parse(good).unwrap();
    assert_eq!(via_request, via_owned);

    let mut bad_depth = bmp_bytes(2, 2, &[[0; 4]; 4]);
    bad_depth[28..30].copy_from_slice(&24u16.to_le_bytes());
    assert!(matches!(
        ParseRequest::new(&bad_depth).parse(Unstoppable),
        Err(DibError::UnsupportedHeaderVariant(_))
    ));
    assert!(matches!(
        Bitmap::parse(bad_depth),
        Err(DibError::UnsupportedHeaderVariant(_))
    ));
}

#[test]
fn serializer_matches_handmade_bytes() {
    let bmp = Bitmap::from_pixels(
        2,
        1,
        &[Pixel::new(1, 2, 3), Pixel::new(4, 5, 6)],
    )
    .unwrap();
    let expected = bmp_bytes(2, 1, &[[1, 2, 3, 0xFF], [4, 5, 6, 0xFF]]);
    assert_eq!(bmp.to_bytes(), expected);
}
