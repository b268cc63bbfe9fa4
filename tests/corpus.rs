//! Hand-built fixtures covering every header variant, bit depth, and compression.

use enough::Unstoppable;
use zenbmp::bmp::{BmpMagic, Compression, DibVersion};
use zenbmp::*;

// ── Fixture builders ─────────────────────────────────────────────────

/// File header + `dib` + `extra` (masks, palette) + `pixels`, with the size
/// and data-offset fields filled in.
fn file(magic: &[u8; 2], dib: &[u8], extra: &[u8], pixels: &[u8]) -> Vec<u8> {
    let offset = 14 + dib.len() + extra.len();
    let mut out = Vec::new();
    out.extend_from_slice(magic);
    out.extend_from_slice(&((offset + pixels.len()) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.extend_from_slice(dib);
    out.extend_from_slice(extra);
    out.extend_from_slice(pixels);
    out
}

fn bm(dib: &[u8], extra: &[u8], pixels: &[u8]) -> Vec<u8> {
    file(b"BM", dib, extra, pixels)
}

/// `BITMAPINFOHEADER` fields, zero-padded to `size` bytes.
fn info_header(size: u32, w: i32, h: i32, bpp: u16, compression: u32, colors: u32) -> Vec<u8> {
    let mut d = Vec::new();
    d.extend_from_slice(&size.to_le_bytes());
    d.extend_from_slice(&w.to_le_bytes());
    d.extend_from_slice(&h.to_le_bytes());
    d.extend_from_slice(&1u16.to_le_bytes());
    d.extend_from_slice(&bpp.to_le_bytes());
    d.extend_from_slice(&compression.to_le_bytes());
    d.extend_from_slice(&0u32.to_le_bytes()); // image size
    d.extend_from_slice(&2835i32.to_le_bytes());
    d.extend_from_slice(&2835i32.to_le_bytes());
    d.extend_from_slice(&colors.to_le_bytes());
    d.extend_from_slice(&0u32.to_le_bytes());
    d.resize(size as usize, 0);
    d
}

fn info(w: i32, h: i32, bpp: u16, compression: u32, colors: u32) -> Vec<u8> {
    info_header(40, w, h, bpp, compression, colors)
}

/// BGRA0 palette entries from RGB triples.
fn palette(colors: &[[u8; 3]]) -> Vec<u8> {
    colors
        .iter()
        .flat_map(|&[r, g, b]| [b, g, r, 0])
        .collect()
}

fn masks(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|m| m.to_le_bytes()).collect()
}

fn decode(data: &[u8]) -> Result<Image, BitmapError> {
    decode_bmp(data, Unstoppable)
}

fn decode_with(data: &[u8], level: BmpPermissiveness) -> Result<Image, BitmapError> {
    DecodeRequest::new(data)
        .with_permissiveness(level)
        .decode(Unstoppable)
}

const RED: Color = [255, 0, 0, 255];
const GREEN: Color = [0, 255, 0, 255];
const BLUE: Color = [0, 0, 255, 255];
const BLACK: Color = [0, 0, 0, 255];
const WHITE: Color = [255, 255, 255, 255];

/// One 2-pixel row of 24-bit data: red, blue.
const RED_BLUE_24: [u8; 8] = [0, 0, 255, 255, 0, 0, 0, 0];

// ── Header variants ──────────────────────────────────────────────────

#[test]
fn every_info_based_header_size() {
    for (size, version) in [
        (40, DibVersion::Info),
        (52, DibVersion::V2),
        (56, DibVersion::V3),
        (64, DibVersion::Os2),
        (108, DibVersion::V4),
        (124, DibVersion::V5),
    ] {
        let data = bm(&info_header(size, 2, 1, 24, 0, 0), &[], &RED_BLUE_24);
        let meta = inspect_bmp(&data).unwrap();
        assert_eq!(meta.version, version);
        assert_eq!(meta.version.size(), size);
        let img = decode(&data).unwrap();
        assert_eq!(img.pixel(0, 0).unwrap(), RED, "header size {size}");
        assert_eq!(img.pixel(1, 0).unwrap(), BLUE, "header size {size}");
    }
}

#[test]
fn core_header_with_three_byte_palette() {
    let mut dib = Vec::new();
    dib.extend_from_slice(&12u32.to_le_bytes());
    dib.extend_from_slice(&2u16.to_le_bytes());
    dib.extend_from_slice(&1u16.to_le_bytes());
    dib.extend_from_slice(&1u16.to_le_bytes());
    dib.extend_from_slice(&8u16.to_le_bytes());
    // BGR triples
    let pal = [0, 0, 0, 0, 255, 0];
    let data = bm(&dib, &pal, &[1, 0, 0, 0]);

    let meta = inspect_bmp(&data).unwrap();
    assert_eq!(meta.version, DibVersion::Core);
    assert_eq!(meta.palette_len, 2);
    let img = decode(&data).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), GREEN);
    assert_eq!(img.pixel(1, 0).unwrap(), BLACK);
}

#[test]
fn short_os2_header() {
    let mut dib = Vec::new();
    dib.extend_from_slice(&16u32.to_le_bytes());
    dib.extend_from_slice(&2i32.to_le_bytes());
    dib.extend_from_slice(&1i32.to_le_bytes());
    dib.extend_from_slice(&1u16.to_le_bytes());
    dib.extend_from_slice(&24u16.to_le_bytes());
    let data = bm(&dib, &[], &RED_BLUE_24);
    assert_eq!(inspect_bmp(&data).unwrap().version, DibVersion::Os2Short);
    let img = decode(&data).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), RED);
}

#[test]
fn unknown_header_size_is_rejected() {
    for size in [0u32, 20, 41, 100, 200] {
        let mut data = bm(&info(2, 1, 24, 0, 0), &[], &RED_BLUE_24);
        data[14..18].copy_from_slice(&size.to_le_bytes());
        assert!(
            matches!(decode(&data), Err(BitmapError::UnsupportedHeaderVersion(s)) if s == size),
            "size {size}"
        );
    }
}

#[test]
fn every_magic_code_decodes() {
    for magic in [b"BM", b"BA", b"CI", b"CP", b"IC", b"PT"] {
        let data = file(magic, &info(2, 1, 24, 0, 0), &[], &RED_BLUE_24);
        let meta = inspect_bmp(&data).unwrap();
        assert_eq!(meta.magic, BmpMagic::from_bytes(*magic).unwrap());
        assert_eq!(decode(&data).unwrap().pixel(1, 0).unwrap(), BLUE);
    }
}

#[test]
fn v5_color_space_is_reported() {
    let mut dib = info_header(124, 1, 1, 24, 0, 0);
    dib[56..60].copy_from_slice(&0x7352_4742u32.to_le_bytes()); // 'sRGB'
    dib[108..112].copy_from_slice(&4u32.to_le_bytes()); // intent
    let meta = inspect_bmp(&bm(&dib, &[], &[0; 4])).unwrap();
    let cs = meta.color_space.unwrap();
    assert_eq!(cs.cs_type, 0x7352_4742);
    assert_eq!(cs.intent, 4);
    assert!(inspect_bmp(&bm(&info(1, 1, 24, 0, 0), &[], &[0; 4]))
        .unwrap()
        .color_space
        .is_none());
}

#[test]
fn info_display_lists_fields() {
    let data = bm(&info(2, -1, 24, 0, 0), &[], &RED_BLUE_24);
    let text = inspect_bmp(&data).unwrap().to_string();
    assert!(text.contains("BM"), "{text}");
    assert!(text.contains("2x1 (top-down)"), "{text}");
    assert!(text.contains("bit depth:   24"), "{text}");
}

// ── Row order ────────────────────────────────────────────────────────

#[test]
fn top_down_rows() {
    let rows = [
        [0, 0, 255, 0, 255, 0, 0, 0], // red, green
        [255, 0, 0, 255, 255, 255, 0, 0], // blue, white
    ]
    .concat();
    let data = bm(&info(2, -2, 24, 0, 0), &[], &rows);
    assert!(inspect_bmp(&data).unwrap().top_down);
    let img = decode(&data).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), RED);
    assert_eq!(img.pixel(1, 0).unwrap(), GREEN);
    assert_eq!(img.pixel(0, 1).unwrap(), BLUE);
    assert_eq!(img.pixel(1, 1).unwrap(), WHITE);

    // Same bytes, bottom-up: rows swap
    let flipped = decode(&bm(&info(2, 2, 24, 0, 0), &[], &rows)).unwrap();
    assert_eq!(flipped.pixel(0, 1).unwrap(), RED);
    assert_eq!(flipped.pixel(0, 0).unwrap(), BLUE);
}

// ── Palettes ─────────────────────────────────────────────────────────

#[test]
fn one_bit_palette() {
    let pal = palette(&[[0, 0, 0], [255, 255, 255]]);
    let data = bm(&info(8, 1, 1, 0, 2), &pal, &[0b1010_0101, 0, 0, 0]);
    let img = decode(&data).unwrap();
    let expected = [1, 0, 1, 0, 0, 1, 0, 1];
    for (x, &bit) in expected.iter().enumerate() {
        let want = if bit == 1 { WHITE } else { BLACK };
        assert_eq!(img.pixel(x as u32, 0).unwrap(), want, "x={x}");
    }
}

#[test]
fn two_bit_palette() {
    let pal = palette(&[[0, 0, 0], [255, 0, 0], [0, 255, 0], [0, 0, 255]]);
    let data = bm(&info(4, 1, 2, 0, 4), &pal, &[0b0001_1011, 0, 0, 0]);
    let img = decode(&data).unwrap();
    assert_eq!(img.as_bytes(), [BLACK, RED, GREEN, BLUE].concat());
}

#[test]
fn four_bit_palette() {
    let pal = palette(&[[0, 0, 0], [255, 0, 0], [0, 255, 0], [0, 0, 255]]);
    let data = bm(&info(3, 1, 4, 0, 4), &pal, &[0x12, 0x30, 0, 0]);
    let img = decode(&data).unwrap();
    assert_eq!(img.as_bytes(), [RED, GREEN, BLUE].concat());
}

#[test]
fn eight_bit_palette_with_row_padding() {
    let pal = palette(&[[10, 20, 30], [40, 50, 60]]);
    // 3 pixels per row, 1 byte of padding
    let pixels = [0, 1, 0, 0xEE, 1, 1, 0, 0xEE];
    let data = bm(&info(3, 2, 8, 0, 2), &pal, &pixels);
    let img = decode(&data).unwrap();
    assert_eq!(img.pixel(0, 1).unwrap(), [10, 20, 30, 255]);
    assert_eq!(img.pixel(1, 1).unwrap(), [40, 50, 60, 255]);
    assert_eq!(img.pixel(0, 0).unwrap(), [40, 50, 60, 255]);
    assert_eq!(img.pixel(2, 0).unwrap(), [10, 20, 30, 255]);
}

#[test]
fn missing_palette_reads_as_gray() {
    let data = bm(&info(3, 1, 8, 0, 0), &[], &[0, 128, 255, 0]);
    let img = decode(&data).unwrap();
    assert_eq!(img.as_bytes(), [[0u8, 0, 0, 255], [128, 128, 128, 255], [255; 4]].concat());

    let data = bm(&info(2, 1, 1, 0, 0), &[], &[0b0100_0000, 0, 0, 0]);
    let img = decode(&data).unwrap();
    assert_eq!(img.as_bytes(), [BLACK, WHITE].concat());
}

#[test]
fn palette_index_out_of_range() {
    let pal = palette(&[[255, 0, 0], [0, 255, 0]]);
    let data = bm(&info(2, 1, 8, 0, 2), &pal, &[1, 7, 0, 0]);
    assert!(matches!(decode(&data), Err(BitmapError::InvalidData(_))));
    let img = decode_with(&data, BmpPermissiveness::Permissive).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), GREEN);
    assert_eq!(img.pixel(1, 0).unwrap(), BLACK);
}

#[test]
fn oversized_palette_count() {
    let pal = palette(&[[1, 2, 3], [4, 5, 6]]);
    let data = bm(&info(1, 1, 1, 0, 3), &pal, &[0x80, 0, 0, 0]);
    assert!(matches!(decode(&data), Err(BitmapError::InvalidHeader(_))));
    let img = decode_with(&data, BmpPermissiveness::Permissive).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), [4, 5, 6, 255]);
}

// ── 16/32-bit ────────────────────────────────────────────────────────

#[test]
fn sixteen_bit_defaults_to_rgb555() {
    let pixels = [0x00, 0x7C, 0xE0, 0x03, 0x1F, 0x00, 0x00, 0x00];
    let data = bm(&info(3, 1, 16, 0, 0), &[], &pixels);
    let img = decode(&data).unwrap();
    assert_eq!(img.as_bytes(), [RED, GREEN, BLUE].concat());
}

#[test]
fn sixteen_bit_rgb565_bitfields() {
    let m = masks(&[0xF800, 0x07E0, 0x001F]);
    let pixels = [0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0x10, 0x84];
    let data = bm(&info(4, 1, 16, 3, 0), &m, &pixels);
    let meta = inspect_bmp(&data).unwrap();
    assert_eq!(meta.compression, Compression::Bitfields);
    assert_eq!(meta.masks, [0xF800, 0x07E0, 0x001F, 0]);
    let img = decode(&data).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), RED);
    assert_eq!(img.pixel(1, 0).unwrap(), GREEN);
    assert_eq!(img.pixel(2, 0).unwrap(), BLUE);
    // Mid-scale values replicate their high bits into the low bits
    assert_eq!(img.pixel(3, 0).unwrap(), [132, 130, 132, 255]);
}

#[test]
fn thirty_two_bit_alpha_bitfields() {
    let m = masks(&[0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000]);
    let data = bm(&info(1, 1, 32, 6, 0), &m, &0x8011_2233u32.to_le_bytes());
    let img = decode(&data).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), [0x11, 0x22, 0x33, 0x80]);
}

#[test]
fn v4_header_carries_its_own_masks() {
    let mut dib = info_header(108, 1, 1, 32, 3, 0);
    let m = masks(&[0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0]);
    dib[40..56].copy_from_slice(&m);
    let data = bm(&dib, &[], &[10, 20, 30, 40]);
    let img = decode(&data).unwrap();
    // Reversed channel order, no alpha mask
    assert_eq!(img.pixel(0, 0).unwrap(), [10, 20, 30, 255]);
}

#[test]
fn thirty_two_bit_keeps_alpha() {
    let data = bm(&info(2, 1, 32, 0, 0), &[], &[1, 2, 3, 0, 4, 5, 6, 200]);
    let img = decode(&data).unwrap();
    assert_eq!(img.as_bytes(), [3, 2, 1, 0, 6, 5, 4, 200]);
}

#[test]
fn zero_bitfield_masks_are_rejected() {
    let data = bm(&info(1, 1, 32, 3, 0), &masks(&[0, 0, 0]), &[0; 4]);
    assert!(matches!(decode(&data), Err(BitmapError::InvalidHeader(_))));
}

#[test]
fn bitfields_need_16_or_32_bits() {
    let data = bm(&info(1, 1, 24, 3, 0), &masks(&[0xFF0000, 0xFF00, 0xFF]), &[0; 4]);
    assert!(matches!(decode(&data), Err(BitmapError::InvalidHeader(_))));
}

// ── RLE ──────────────────────────────────────────────────────────────

fn rle8_palette() -> Vec<u8> {
    palette(&[[0, 0, 0], [255, 0, 0]])
}

#[test]
fn rle8_runs_and_absolute_mode() {
    let stream = [
        3, 1, // three pixels of index 1
        0, 0, // end of line
        0, 3, 0, 1, 0, 0, // absolute run of 3, padded
        0, 1, // end of bitmap
    ];
    let data = bm(&info(4, 2, 8, 1, 2), &rle8_palette(), &stream);
    let img = decode(&data).unwrap();
    // First stored row is the bottom one
    assert_eq!(img.pixel(0, 1).unwrap(), RED);
    assert_eq!(img.pixel(2, 1).unwrap(), RED);
    assert_eq!(img.pixel(3, 1).unwrap(), BLACK);
    assert_eq!(img.pixel(0, 0).unwrap(), BLACK);
    assert_eq!(img.pixel(1, 0).unwrap(), RED);
    assert_eq!(img.pixel(2, 0).unwrap(), BLACK);
}

#[test]
fn rle8_delta_skips_to_index_zero() {
    let stream = [0, 2, 2, 1, 1, 1, 0, 1];
    let data = bm(&info(4, 2, 8, 1, 2), &rle8_palette(), &stream);
    let img = decode(&data).unwrap();
    assert_eq!(img.pixel(2, 0).unwrap(), RED);
    let reds = img.as_bytes().chunks_exact(4).filter(|p| p[0] == 255).count();
    assert_eq!(reds, 1);
}

#[test]
fn rle8_without_end_marker() {
    let data = bm(&info(2, 1, 8, 1, 2), &rle8_palette(), &[2, 1]);
    let img = decode(&data).unwrap();
    assert_eq!(img.as_bytes(), [RED, RED].concat());
}

#[test]
fn rle8_overrun() {
    let data = bm(&info(2, 1, 8, 1, 2), &rle8_palette(), &[3, 1, 0, 1]);
    assert!(matches!(decode(&data), Err(BitmapError::InvalidData(_))));
    let img = decode_with(&data, BmpPermissiveness::Permissive).unwrap();
    assert_eq!(img.as_bytes(), [RED, RED].concat());
}

#[test]
fn rle_with_top_down_rows() {
    let data = bm(&info(2, -1, 8, 1, 2), &rle8_palette(), &[2, 1, 0, 1]);
    assert!(matches!(decode(&data), Err(BitmapError::InvalidData(_))));
    let img = decode_with(&data, BmpPermissiveness::Permissive).unwrap();
    assert_eq!(img.pixel(1, 0).unwrap(), RED);
}

#[test]
fn rle4_runs_alternate_nibbles() {
    let pal = palette(&[[0, 0, 0], [255, 0, 0], [0, 255, 0], [0, 0, 255]]);
    let stream = [
        5, 0x12, // 1 2 1 2 1
        0, 0, // end of line
        0, 3, 0x31, 0x20, // absolute: 3 1 2
        0, 1,
    ];
    let data = bm(&info(5, 2, 4, 2, 4), &pal, &stream);
    let img = decode(&data).unwrap();
    assert_eq!(img.pixel(0, 1).unwrap(), RED);
    assert_eq!(img.pixel(1, 1).unwrap(), GREEN);
    assert_eq!(img.pixel(4, 1).unwrap(), RED);
    assert_eq!(img.pixel(0, 0).unwrap(), BLUE);
    assert_eq!(img.pixel(1, 0).unwrap(), RED);
    assert_eq!(img.pixel(2, 0).unwrap(), GREEN);
    assert_eq!(img.pixel(3, 0).unwrap(), BLACK);
}

#[test]
fn rle24_in_os2_header() {
    let stream = [
        2, 0x10, 0x20, 0x30, // two pixels
        0, 3, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0, // absolute run of three, padded
        0, 1,
    ];
    let data = bm(&info_header(64, 5, 1, 24, 4, 0), &[], &stream);
    assert_eq!(inspect_bmp(&data).unwrap().compression, Compression::Rle24);
    let img = decode(&data).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), [0x30, 0x20, 0x10, 255]);
    assert_eq!(img.pixel(1, 0).unwrap(), [0x30, 0x20, 0x10, 255]);
    assert_eq!(img.pixel(2, 0).unwrap(), [3, 2, 1, 255]);
    assert_eq!(img.pixel(4, 0).unwrap(), [9, 8, 7, 255]);

    // Code 4 means JPEG outside OS/2 headers
    let data = bm(&info(5, 1, 24, 4, 0), &[], &stream);
    assert!(matches!(decode(&data), Err(BitmapError::UnsupportedCompression(4))));
}

#[test]
fn rle_stream_too_short_for_dimensions() {
    // Ten bytes of opcodes cannot describe 20000x20000 pixels
    let stream = [255, 1, 255, 1, 0, 0, 255, 1, 0, 1];
    let data = bm(&info(20000, 20000, 8, 1, 2), &rle8_palette(), &stream);
    assert!(data.len() < 100);
    assert!(matches!(decode(&data), Err(BitmapError::TruncatedData)));
    assert!(matches!(
        decode_with(&data, BmpPermissiveness::Strict),
        Err(BitmapError::TruncatedData)
    ));
    // Header inspection does not depend on the pixel stream
    assert_eq!(inspect_bmp(&data).unwrap().width, 20000);

    // Exactly enough pairs at 255 pixels each is accepted
    let data = bm(&info(255, 2, 8, 1, 2), &rle8_palette(), &[255, 1, 255, 1]);
    let img = decode(&data).unwrap();
    assert_eq!(img.pixel(254, 0).unwrap(), RED);
    let data = bm(&info(256, 2, 8, 1, 2), &rle8_palette(), &[255, 1, 255, 1]);
    assert!(matches!(decode(&data), Err(BitmapError::TruncatedData)));
}

#[test]
fn rle_depth_mismatch() {
    let data = bm(&info(2, 1, 24, 1, 0), &[], &[0, 1]);
    assert!(matches!(decode(&data), Err(BitmapError::InvalidHeader(_))));
}

// ── Rejections ───────────────────────────────────────────────────────

#[test]
fn embedded_jpeg_and_png_are_unsupported() {
    for code in [4u32, 5] {
        let data = bm(&info(1, 1, 0, code, 0), &[], &[0xFF, 0xD8]);
        assert!(matches!(
            decode(&data),
            Err(BitmapError::UnsupportedCompression(c)) if c == code
        ));
    }
    let data = bm(&info(1, 1, 32, 11, 0), &[], &[0; 4]);
    assert!(matches!(decode(&data), Err(BitmapError::UnsupportedCompression(11))));
}

#[test]
fn unsupported_bit_depth() {
    let data = bm(&info(1, 1, 7, 0, 0), &[], &[0; 4]);
    assert!(matches!(decode(&data), Err(BitmapError::UnsupportedBitDepth(7))));
}

#[test]
fn bad_magic_and_short_input() {
    assert!(matches!(decode(b"XX"), Err(BitmapError::UnsupportedFormat)));
    assert!(matches!(decode(b"\x89PNG\r\n\x1a\n"), Err(BitmapError::UnsupportedFormat)));
    assert!(matches!(decode(b""), Err(BitmapError::TruncatedData)));
    assert!(matches!(decode(b"BM\x00\x00"), Err(BitmapError::TruncatedData)));
    // DIB header cut short
    let data = bm(&info(1, 1, 24, 0, 0), &[], &[0; 4]);
    assert!(matches!(decode(&data[..30]), Err(BitmapError::TruncatedData)));
}

#[test]
fn invalid_dimensions() {
    for (w, h) in [(0, 1), (-3, 1), (2, 0)] {
        let data = bm(&info(w, h, 24, 0, 0), &[], &[0; 8]);
        assert!(
            matches!(decode(&data), Err(BitmapError::InvalidDimensions { .. })),
            "{w}x{h}"
        );
    }
}

#[test]
fn truncated_pixel_data() {
    let mut data = bm(&info(2, 2, 24, 0, 0), &[], &[0x40; 16]);
    data.truncate(data.len() - 8);
    assert!(matches!(decode(&data), Err(BitmapError::TruncatedData)));
    let img = decode_with(&data, BmpPermissiveness::Permissive).unwrap();
    // The missing row is the last stored one, the top of the image
    assert_eq!(img.pixel(0, 1).unwrap(), [0x40, 0x40, 0x40, 255]);
    assert_eq!(img.pixel(1, 0).unwrap(), BLACK);
}

#[test]
fn inspect_needs_no_pixel_data() {
    let data = bm(&info(64, 64, 24, 0, 0), &[], &[]);
    let meta = inspect_bmp(&data).unwrap();
    assert_eq!((meta.width, meta.height), (64, 64));
    assert!(matches!(decode(&data), Err(BitmapError::TruncatedData)));
}

#[test]
fn data_offset_inside_headers() {
    let mut data = bm(&info(1, 1, 24, 0, 0), &[], &[0; 4]);
    data[10..14].copy_from_slice(&20u32.to_le_bytes());
    assert!(matches!(decode(&data), Err(BitmapError::InvalidHeader(_))));
}

// ── Permissiveness ───────────────────────────────────────────────────

#[test]
fn strict_checks_file_size_field() {
    let mut data = bm(&info(2, 1, 24, 0, 0), &[], &RED_BLUE_24);
    data[2..6].copy_from_slice(&999u32.to_le_bytes());
    assert!(decode(&data).is_ok());
    assert!(matches!(
        decode_with(&data, BmpPermissiveness::Strict),
        Err(BitmapError::InvalidHeader(_))
    ));
}

#[test]
fn strict_checks_image_size_and_resolution() {
    let mut data = bm(&info(2, 1, 24, 0, 0), &[], &RED_BLUE_24);
    data[34..38].copy_from_slice(&7u32.to_le_bytes());
    assert!(decode_with(&data, BmpPermissiveness::Strict).is_err());
    assert!(decode(&data).is_ok());

    let mut data = bm(&info(2, 1, 24, 0, 0), &[], &RED_BLUE_24);
    data[38..42].copy_from_slice(&(-1i32).to_le_bytes());
    assert!(decode_with(&data, BmpPermissiveness::Strict).is_err());
    assert!(decode(&data).is_ok());
}

#[test]
fn planes_must_be_one() {
    let mut data = bm(&info(2, 1, 24, 0, 0), &[], &RED_BLUE_24);
    data[26..28].copy_from_slice(&3u16.to_le_bytes());
    assert!(matches!(decode(&data), Err(BitmapError::InvalidHeader(_))));
    let img = decode_with(&data, BmpPermissiveness::Permissive).unwrap();
    assert_eq!(img.pixel(0, 0).unwrap(), RED);
}

// ── Limits and cancellation ──────────────────────────────────────────

#[test]
fn limits_are_checked_before_decoding() {
    // Header claims far more pixels than the file holds
    let data = bm(&info(100_000, 100_000, 24, 0, 0), &[], &[]);
    let limits = Limits {
        max_pixels: Some(1_000_000),
        ..Default::default()
    };
    assert!(matches!(
        decode_bmp_with_limits(&data, &limits, Unstoppable),
        Err(BitmapError::LimitExceeded(_))
    ));

    let data = bm(&info(2, 1, 24, 0, 0), &[], &RED_BLUE_24);
    let narrow = Limits {
        max_width: Some(1),
        ..Default::default()
    };
    assert!(decode_bmp_with_limits(&data, &narrow, Unstoppable).is_err());
    let roomy = Limits {
        max_width: Some(2),
        max_memory_bytes: Some(8),
        ..Default::default()
    };
    assert!(decode_bmp_with_limits(&data, &roomy, Unstoppable).is_ok());
}

struct AlreadyCancelled;

impl Stop for AlreadyCancelled {
    fn check(&self) -> Result<(), enough::StopReason> {
        Err(enough::StopReason::Cancelled)
    }
}

#[test]
fn cancellation_aborts_decode_and_encode() {
    let data = bm(&info(2, 1, 24, 0, 0), &[], &RED_BLUE_24);
    assert!(matches!(
        decode_bmp(&data, AlreadyCancelled),
        Err(BitmapError::Cancelled(_))
    ));
    let img = Image::new(2, 2, RED).unwrap();
    assert!(matches!(
        encode_bmp(&img, AlreadyCancelled),
        Err(BitmapError::Cancelled(_))
    ));
}
