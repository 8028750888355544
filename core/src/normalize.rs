use image::{Rgba, RgbaImage};

use crate::occlusion::{AccumulationBuffer, MAX_INTENSITY};

// Accumulated sums are not bounded (occlusion can go negative), so clamp
// into the 8-bit range before rounding.
#[inline]
pub fn to_intensity(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, MAX_INTENSITY).round() as u8
}

// Grayscale AO texture with opaque alpha, same size as the buffer
pub fn to_ao_image(buffer: &AccumulationBuffer) -> RgbaImage {
    RgbaImage::from_fn(buffer.width() as u32, buffer.height() as u32, |x, y| {
        let v = to_intensity(buffer.get(x as usize, y as usize));
        Rgba([v, v, v, 255])
    })
}
