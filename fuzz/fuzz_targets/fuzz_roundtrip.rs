#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::Limits;

fuzz_target!(|data: &[u8]| {
    // Anything we can decode must survive encode -> decode unchanged
    let limits = Limits {
        max_pixels: Some(1 << 22),
        ..Default::default()
    };
    let Ok(decoded) = zenbmp::decode_bmp_with_limits(data, &limits, enough::Unstoppable) else {
        return;
    };
    // A 32-bit file whose alpha is zero everywhere reads back as opaque.
    if decoded.as_bytes().chunks_exact(4).all(|px| px[3] == 0) {
        return;
    }

    let encoded = zenbmp::encode_bmp(&decoded, enough::Unstoppable).expect("encode failed");
    let Ok(decoded2) = zenbmp::decode_bmp(&encoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");
});
