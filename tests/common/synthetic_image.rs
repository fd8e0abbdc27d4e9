#![allow(dead_code)]

/// Generates a two-tone checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize, dark: u8, light: u8) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let parity = (x / cell + y / cell) & 1;
            img[y * width + x] = if parity == 0 { dark } else { light };
        }
    }
    img
}

/// Isotropic Gaussian bump: center, sigma and amplitude.
#[derive(Clone, Copy, Debug)]
pub struct Bump {
    pub cx: f64,
    pub cy: f64,
    pub sigma: f64,
    pub amplitude: f64,
}

/// Sum of Gaussian bumps over a constant background, rounded to 8 bits.
pub fn bumps_u8(width: usize, height: usize, base: f64, bumps: &[Bump]) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut v = base;
            for b in bumps {
                let dx = x as f64 - b.cx;
                let dy = y as f64 - b.cy;
                v += b.amplitude * (-(dx * dx + dy * dy) / (2.0 * b.sigma * b.sigma)).exp();
            }
            img[y * width + x] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    img
}

/// Square ring of `ring` value with inner and outer background `base`.
pub fn square_ring_u8(size: usize, inset: usize, thickness: usize, base: u8, ring: u8) -> Vec<u8> {
    assert!(inset + 2 * thickness < size, "ring does not fit");

    let mut img = vec![base; size * size];
    let lo = inset;
    let hi = size - 1 - inset;
    for y in lo..=hi {
        for x in lo..=hi {
            let d = (x - lo).min(hi - x).min(y - lo).min(hi - y);
            if d < thickness {
                img[y * size + x] = ring;
            }
        }
    }
    img
}
