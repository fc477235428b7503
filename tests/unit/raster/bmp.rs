use super::*;

fn decode_rgb(buf: &[u8]) -> image::RgbImage {
    image::load_from_memory_with_format(buf, image::ImageFormat::Bmp)
        .unwrap()
        .to_rgb8()
}

#[test]
fn palette_size_must_match_bit_depth() {
    let err = BmpImage::with_palette(4, 4, 2, vec![Rgb8::BLACK, Rgb8::WHITE]).unwrap_err();
    assert!(matches!(err, WavscopeError::Config(_)));
    assert!(BmpImage::with_palette(4, 4, 3, vec![Rgb8::BLACK; 8]).is_err());
    assert!(BmpImage::with_palette(4, 4, 2, vec![Rgb8::BLACK; 4]).is_ok());
    assert!(BmpImage::new(0, 4).is_err());
}

#[test]
fn row_stride_is_padded_to_four_bytes() {
    for (width, bpp, expected) in [
        (8u32, 1u8, 4usize),
        (1, 1, 4),
        (33, 1, 8),
        (1280, 1, 160),
        (3, 8, 4),
        (5, 8, 8),
        (7, 4, 4),
        (9, 2, 4),
    ] {
        let packed = (width as usize * usize::from(bpp)).div_ceil(8);
        assert_eq!(BmpImage::row_stride(width, bpp), expected);
        assert_eq!(expected % 4, 0);
        assert!(expected >= packed && expected - packed < 4);
    }
}

#[test]
fn one_bpp_8x1_layout_and_round_trip() {
    let pattern = [1u8, 0, 1, 1, 0, 0, 0, 1];
    let mut img = BmpImage::new(8, 1).unwrap();
    for (x, &v) in pattern.iter().enumerate() {
        img.draw_point(x as u32, 0, v);
    }
    let buf = img.to_file_buffer();

    assert_eq!(buf.len(), BmpImage::file_len(8, 1, 1));
    assert_eq!(buf.len(), 14 + 40 + 8 + 4);
    assert_eq!(&buf[0..2], b"BM");
    assert_eq!(u32::from_le_bytes(buf[2..6].try_into().unwrap()), buf.len() as u32);
    assert_eq!(u32::from_le_bytes(buf[10..14].try_into().unwrap()), 62);
    assert_eq!(u32::from_le_bytes(buf[14..18].try_into().unwrap()), 40);
    assert_eq!(u16::from_le_bytes(buf[26..28].try_into().unwrap()), 1);
    assert_eq!(u16::from_le_bytes(buf[28..30].try_into().unwrap()), 1);
    assert_eq!(u32::from_le_bytes(buf[46..50].try_into().unwrap()), 2);
    // palette: black then white, stored B G R 0
    assert_eq!(&buf[54..62], &[0, 0, 0, 0, 255, 255, 255, 0]);
    assert_eq!(&buf[62..], &[0b1011_0001, 0, 0, 0]);

    let decoded = decode_rgb(&buf);
    assert_eq!(decoded.dimensions(), (8, 1));
    for (x, &v) in pattern.iter().enumerate() {
        let expected = if v == 1 { [255, 255, 255] } else { [0, 0, 0] };
        assert_eq!(decoded.get_pixel(x as u32, 0).0, expected, "pixel {x}");
    }
}

#[test]
fn rows_are_written_bottom_up_but_decode_top_down() {
    let mut img = BmpImage::new(3, 3).unwrap();
    img.draw_point(0, 0, 1);
    img.draw_point(2, 2, 1);
    let buf = img.to_file_buffer();

    // first stored row is the bottom row of the image
    assert_eq!(buf[62], 0b0010_0000);
    assert_eq!(buf[62 + 8], 0b1000_0000);

    let decoded = decode_rgb(&buf);
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(decoded.get_pixel(2, 2).0, [255, 255, 255]);
    assert_eq!(decoded.get_pixel(1, 1).0, [0, 0, 0]);
}

#[test]
fn eight_bpp_palette_channel_order() {
    let mut palette = vec![Rgb8::BLACK; 256];
    palette[7] = Rgb8 { r: 10, g: 20, b: 30 };
    let mut img = BmpImage::with_palette(2, 1, 8, palette).unwrap();
    img.draw_point(1, 0, 7);
    let buf = img.to_file_buffer();

    assert_eq!(&buf[54 + 7 * 4..54 + 8 * 4], &[30, 20, 10, 0]);
    assert_eq!(buf.len(), 54 + 1024 + 4);
    let decoded = decode_rgb(&buf);
    assert_eq!(decoded.get_pixel(1, 0).0, [10, 20, 30]);
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0]);
}

#[test]
fn out_of_range_draws_are_ignored_and_indices_masked() {
    let mut img = BmpImage::new(2, 2).unwrap();
    img.draw_point(2, 0, 1);
    img.draw_point(0, 2, 1);
    assert!(img.pixels().iter().all(|&p| p == 0));
    img.draw_point(1, 1, 0xff);
    assert_eq!(img.pixels()[3], 1);
}
