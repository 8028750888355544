use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};

use crate::HeightSource;
use crate::error::InputError;
use crate::normalize::to_intensity;
use crate::occlusion::AccumulationBuffer;

// Preview of what a renderer would show: the terrain coloured by height,
// multiplied by the baked AO.
pub fn composite_preview<S: HeightSource + ?Sized>(
    field: &S,
    ao: &AccumulationBuffer,
) -> Result<RgbImage, InputError> {
    if (field.width(), field.height()) != (ao.width(), ao.height()) {
        return Err(InputError::DimensionMismatch {
            expected: (field.width(), field.height()),
            got: (ao.width(), ao.height()),
        });
    }

    // deep water to beach to grass to rock to snow
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.0, 0.0, 0.5)),
        (0.30, LinSrgb::new(0.8, 0.8, 0.5)),
        (0.50, LinSrgb::new(0.1, 0.6, 0.2)),
        (0.75, LinSrgb::new(0.5, 0.4, 0.3)),
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)),
    ]);

    let (w, h) = (field.width(), field.height());
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for y in 0..h {
        for x in 0..w {
            let v = field.sample(x, y);
            min = min.min(v);
            max = max.max(v);
        }
    }

    let mut img = RgbImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let norm = if (max - min).abs() < f32::EPSILON {
                0.5
            } else {
                (field.sample(x, y) - min) / (max - min)
            };
            let col: LinSrgb = gradient.get(norm);
            let rgb = col.into_format::<u8>();
            // multiply blend
            let shade = to_intensity(ao.get(x, y)) as f32 / 255.0;
            let pixel = Rgb([
                (rgb.red as f32 * shade).round() as u8,
                (rgb.green as f32 * shade).round() as u8,
                (rgb.blue as f32 * shade).round() as u8,
            ]);
            img.put_pixel(x as u32, y as u32, pixel);
        }
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::composite_preview;
    use crate::error::InputError;
    use crate::heightfield::HeightField;
    use crate::occlusion::AccumulationBuffer;

    #[test]
    fn black_ao_blacks_out_the_preview() {
        let field = HeightField::from_fn(3, 2, |x, y| (x + y) as f32).unwrap();
        let ao = AccumulationBuffer::new(3, 2);
        let img = composite_preview(&field, &ao).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert!(img.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn white_ao_keeps_the_base_colour() {
        let field = HeightField::from_fn(2, 1, |x, _| x as f32).unwrap();
        let mut ao = AccumulationBuffer::new(2, 1);
        ao.add(0, 0, 255.0);
        ao.add(1, 0, 255.0);
        let img = composite_preview(&field, &ao).unwrap();
        // highest point maps to the snow stop
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn mismatched_ao_is_rejected() {
        let field = HeightField::flat(4, 4, 1.0).unwrap();
        let ao = AccumulationBuffer::new(4, 3);
        assert_eq!(
            composite_preview(&field, &ao),
            Err(InputError::DimensionMismatch {
                expected: (4, 4),
                got: (4, 3)
            })
        );
    }
}
