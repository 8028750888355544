use crate::error::InputError;
use crate::horizon::Point3;

// Falloff applied to the horizon's rise-over-distance
pub const DEFAULT_FALLOFF: f32 = 0.5;

// Full-visibility intensity for one pixel
pub const MAX_INTENSITY: f32 = 255.0;

// How much of the sky `horizon` hides from `sample`.
// 0 when the sample is its own horizon, approaches 1 for a steep occluder,
// and goes negative when the horizon sits below the sample.
#[inline]
pub fn occlusion(sample: Point3, horizon: Point3, falloff: f32) -> f32 {
    let distance = sample.distance(horizon);
    if distance == 0.0 {
        return 0.0;
    }
    1.0 - (-falloff * (horizon.z - sample.z) / distance).exp()
}

// Share of the final intensity one direction adds to a pixel
#[inline]
pub fn contribution(occlusion: f32, weight: f32) -> f32 {
    (1.0 - occlusion) * MAX_INTENSITY * weight
}

// Statistics of an accumulated buffer, logged after a bake
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

// W×H sums of per-direction contributions, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulationBuffer {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl AccumulationBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    #[inline]
    pub fn add(&mut self, x: usize, y: usize, amount: f32) {
        self.values[y * self.width + x] += amount;
    }

    // Elementwise sum of another buffer of the same size
    pub fn merge(&mut self, other: &AccumulationBuffer) -> Result<(), InputError> {
        if (self.width, self.height) != (other.width, other.height) {
            return Err(InputError::DimensionMismatch {
                expected: (self.width, self.height),
                got: (other.width, other.height),
            });
        }
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a += b;
        }
        Ok(())
    }

    // Sum buffers in iteration order. The order is fixed by the caller so
    // floating-point rounding is reproducible.
    pub fn reduce<'a, I>(width: usize, height: usize, buffers: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = &'a AccumulationBuffer>,
    {
        let mut total = Self::new(width, height);
        for b in buffers {
            total.merge(b)?;
        }
        Ok(total)
    }

    pub fn stats(&self) -> BufferStats {
        let (min, max, sum) = self.values.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY, 0.0f64),
            |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + v as f64),
        );
        let mean = if self.values.is_empty() {
            0.0
        } else {
            (sum / self.values.len() as f64) as f32
        };
        BufferStats { min, max, mean }
    }
}

#[cfg(test)]
mod tests {
    use super::{AccumulationBuffer, DEFAULT_FALLOFF, contribution, occlusion};
    use crate::error::InputError;
    use crate::horizon::Point3;

    #[test]
    fn self_occlusion_is_zero() {
        for p in [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5.0, 2.0, 200.0),
            Point3::new(1.0, 9.0, -3.5),
        ] {
            assert_eq!(occlusion(p, p, DEFAULT_FALLOFF), 0.0);
        }
    }

    #[test]
    fn occlusion_grows_with_rise() {
        let s = Point3::new(0.0, 0.0, 0.0);
        let mut prev = 0.0;
        for dz in [0.5, 1.0, 4.0, 16.0, 64.0] {
            let o = occlusion(s, Point3::new(1.0, 0.0, dz), DEFAULT_FALLOFF);
            assert!(o > prev, "occlusion {} not above {}", o, prev);
            prev = o;
        }
    }

    #[test]
    fn occlusion_shrinks_with_distance() {
        let s = Point3::new(0.0, 0.0, 0.0);
        let mut prev = 1.0;
        for d in [1.0, 2.0, 8.0, 32.0] {
            let o = occlusion(s, Point3::new(d, 0.0, 3.0), DEFAULT_FALLOFF);
            assert!(o < prev && o > 0.0);
            prev = o;
        }
    }

    #[test]
    fn occlusion_bounds() {
        let s = Point3::new(0.0, 0.0, 0.0);
        // rise/distance tends to 1 in 3D, so the limit is 1 - e^-falloff
        let steep = occlusion(s, Point3::new(0.001, 0.0, 1.0e4), 50.0);
        assert!(steep > 0.999 && steep <= 1.0);
        let below = occlusion(s, Point3::new(1.0, 0.0, -1.0), DEFAULT_FALLOFF);
        assert!(below < 0.0);
        let flat = occlusion(s, Point3::new(3.0, 4.0, 0.0), DEFAULT_FALLOFF);
        assert_eq!(flat, 0.0);
    }

    #[test]
    fn tall_wall_still_occludes() {
        let s = Point3::new(1.0, 0.0, 0.0);
        let wall = Point3::new(0.0, 0.0, 1.0e20);
        let o = occlusion(s, wall, DEFAULT_FALLOFF);
        assert!((o - (1.0 - (-0.5f32).exp())).abs() < 1e-6, "occlusion {}", o);
    }

    #[test]
    fn contribution_scales_by_weight() {
        assert_eq!(contribution(0.0, 1.0 / 8.0), 255.0 / 8.0);
        assert_eq!(contribution(1.0, 0.25), 0.0);
    }

    #[test]
    fn reduce_is_order_independent() {
        let mut bufs = Vec::new();
        for k in 0..8 {
            let mut b = AccumulationBuffer::new(3, 2);
            for y in 0..2 {
                for x in 0..3 {
                    b.add(x, y, (k * 7 + x * 3 + y) as f32 * 0.37);
                }
            }
            bufs.push(b);
        }
        let forward = AccumulationBuffer::reduce(3, 2, &bufs).unwrap();
        let backward = AccumulationBuffer::reduce(3, 2, bufs.iter().rev()).unwrap();
        for (a, b) in forward.values().iter().zip(backward.values()) {
            assert!((a - b).abs() < 1e-3);
        }
        let stats = forward.stats();
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    }

    #[test]
    fn mismatched_sizes_are_an_error() {
        let mut a = AccumulationBuffer::new(3, 2);
        let b = AccumulationBuffer::new(2, 3);
        assert_eq!(
            a.merge(&b),
            Err(InputError::DimensionMismatch {
                expected: (3, 2),
                got: (2, 3)
            })
        );
        assert!(AccumulationBuffer::reduce(3, 2, [&b]).is_err());
        // a failed merge leaves the target untouched
        assert!(a.values().iter().all(|&v| v == 0.0));
    }
}
