#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::{BmpPermissiveness, DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    // Must never panic, at any permissiveness level
    let limits = Limits {
        max_pixels: Some(1 << 24),
        ..Default::default()
    };
    let _ = zenbmp::inspect_bmp(data);
    for level in [
        BmpPermissiveness::Strict,
        BmpPermissiveness::Standard,
        BmpPermissiveness::Permissive,
    ] {
        let _ = DecodeRequest::new(data)
            .with_limits(&limits)
            .with_permissiveness(level)
            .decode(enough::Unstoppable);
    }
});
