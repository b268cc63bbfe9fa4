#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(dib: &[u8], palette: &[u8], pixels: &[u8]) -> Vec<u8> {
    let offset = 14 + dib.len() + palette.len();
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((offset + pixels.len()) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.extend_from_slice(dib);
    out.extend_from_slice(palette);
    out.extend_from_slice(pixels);
    out
}

fn info(width: i32, height: i32, bpp: u16, compression: u32, colors: u32) -> Vec<u8> {
    let mut h = Vec::new();
    h.extend_from_slice(&40u32.to_le_bytes());
    h.extend_from_slice(&width.to_le_bytes());
    h.extend_from_slice(&height.to_le_bytes());
    h.extend_from_slice(&1u16.to_le_bytes());
    h.extend_from_slice(&bpp.to_le_bytes());
    h.extend_from_slice(&compression.to_le_bytes());
    h.extend_from_slice(&[0; 12]); // image size, resolution
    h.extend_from_slice(&colors.to_le_bytes());
    h.extend_from_slice(&0u32.to_le_bytes());
    h
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 24-bit 1x1
    let seed = bmp(&info(1, 1, 24, 0, 0), &[], &[0x00, 0x00, 0xff, 0x00]);
    fs::write(format!("{dir}/rgb24_1x1.bmp"), seed).unwrap();

    // 32-bit top-down 2x2
    let seed = bmp(&info(2, -2, 32, 0, 0), &[], &[0x80; 16]);
    fs::write(format!("{dir}/rgb32_topdown.bmp"), seed).unwrap();

    // 1-bit, two-color palette
    let seed = bmp(&info(8, 1, 1, 0, 2), &[0, 0, 0, 0, 255, 255, 255, 0], &[0xA5, 0, 0, 0]);
    fs::write(format!("{dir}/pal1.bmp"), seed).unwrap();

    // RLE8 with delta and absolute runs
    let rle = [3, 1, 0, 2, 1, 0, 0, 3, 0, 1, 0, 0, 0, 0, 0, 1];
    let seed = bmp(&info(4, 2, 8, 1, 2), &[0, 0, 255, 0, 0, 255, 0, 0], &rle);
    fs::write(format!("{dir}/rle8.bmp"), seed).unwrap();

    // RLE4
    let rle = [4, 0x12, 0, 0, 0, 1];
    let seed = bmp(&info(4, 1, 4, 2, 3), &[0; 12], &rle);
    fs::write(format!("{dir}/rle4.bmp"), seed).unwrap();

    // 16-bit RGB565 bitfields
    let mut masks = Vec::new();
    for m in [0xF800u32, 0x07E0, 0x001F] {
        masks.extend_from_slice(&m.to_le_bytes());
    }
    let seed = bmp(&info(2, 1, 16, 3, 0), &masks, &[0x00, 0xF8, 0x1F, 0x00]);
    fs::write(format!("{dir}/rgb565.bmp"), seed).unwrap();

    // OS/2 1.x core header
    let mut core = Vec::new();
    core.extend_from_slice(&12u32.to_le_bytes());
    core.extend_from_slice(&1u16.to_le_bytes());
    core.extend_from_slice(&1u16.to_le_bytes());
    core.extend_from_slice(&1u16.to_le_bytes());
    core.extend_from_slice(&24u16.to_le_bytes());
    fs::write(format!("{dir}/core_1x1.bmp"), bmp(&core, &[], &[1, 2, 3, 0])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_bm.bin"), b"BM").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();

    println!("Generated seed corpus in {dir}/");
}
