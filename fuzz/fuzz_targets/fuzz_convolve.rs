#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::{Border, Channel, Core, Image};

fuzz_target!(|data: &[u8]| {
    // Small image and kernel carved out of the input; convolution must never panic
    if data.len() < 4 {
        return;
    }
    let w = u32::from(data[0] % 16) + 1;
    let h = u32::from(data[1] % 16) + 1;
    let size = usize::from(data[2] % 3) * 2 + 1;
    let border = if data[3] & 1 == 0 { Border::Empty } else { Border::Replicate };
    let rest = &data[4..];

    let mut pixels = vec![0u8; (w * h * 4) as usize];
    for (p, b) in pixels.iter_mut().zip(rest) {
        *p = *b;
    }
    let Ok(image) = Image::from_rgba(w, h, pixels) else {
        return;
    };
    let weights: Vec<f64> = (0..size * size)
        .map(|i| f64::from(rest.get(i).copied().unwrap_or(1) as i8))
        .collect();
    let Ok(core) = Core::from_weights(size, weights) else {
        return;
    };
    let core = core.normalized();

    let full = zenbmp::convolve(&image, &core, Channel::All, border).expect("full convolve");
    assert_eq!((full.width(), full.height()), (w, h));

    let padded = zenbmp::make_border(&image, core.radius() as u32, border).expect("make_border");
    let raw = zenbmp::convolve_raw(&padded, &core, Channel::All).expect("raw convolve");
    assert_eq!(full, raw, "padded raw convolution must match full convolution");
});
