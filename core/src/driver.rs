use std::collections::HashSet;
use std::time::Instant;

use rayon::prelude::*;

use crate::HeightSource;
use crate::direction::Direction;
use crate::error::{AoError, ConfigError, InputError};
use crate::horizon::{HorizonHull, Point3};
use crate::occlusion::{AccumulationBuffer, DEFAULT_FALLOFF, contribution, occlusion};
use crate::scanline::Scanlines;

// Parameters of one bake
#[derive(Debug, Clone, PartialEq)]
pub struct AoConfig {
    // Sweep directions; each one contributes 1/len of the final intensity
    pub directions: Vec<Direction>,
    // Coefficient inside the exponential falloff
    pub falloff: f32,
    // Multiplier from sampled heights to grid units
    pub height_scale: f32,
    // Expected number of directions, if the caller wants it checked
    pub sample_count: Option<usize>,
    // Sweep directions on the rayon pool
    pub parallel: bool,
}

impl Default for AoConfig {
    fn default() -> Self {
        Self {
            directions: Direction::PRINCIPAL.to_vec(),
            falloff: DEFAULT_FALLOFF,
            height_scale: 1.0,
            sample_count: None,
            parallel: true,
        }
    }
}

impl AoConfig {
    pub fn with_directions(mut self, directions: impl Into<Vec<Direction>>) -> Self {
        self.directions = directions.into();
        self
    }

    pub fn with_falloff(mut self, falloff: f32) -> Self {
        self.falloff = falloff;
        self
    }

    pub fn with_height_scale(mut self, height_scale: f32) -> Self {
        self.height_scale = height_scale;
        self
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = Some(sample_count);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    // Number of directions each pixel is weighted over
    pub fn sample_count(&self) -> usize {
        self.directions.len()
    }

    pub fn weight(&self) -> f32 {
        1.0 / self.sample_count() as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directions.is_empty() {
            return Err(ConfigError::NoDirections);
        }
        let mut seen = HashSet::with_capacity(self.directions.len());
        for &d in &self.directions {
            Direction::new(d.dx, d.dy)?;
            if !seen.insert(d) {
                return Err(ConfigError::DuplicateDirection { dx: d.dx, dy: d.dy });
            }
        }
        if let Some(configured) = self.sample_count {
            if configured != self.directions.len() {
                return Err(ConfigError::SampleCountMismatch {
                    configured,
                    directions: self.directions.len(),
                });
            }
        }
        if !self.falloff.is_finite() {
            return Err(ConfigError::InvalidFalloff(self.falloff));
        }
        if !self.height_scale.is_finite() {
            return Err(ConfigError::InvalidHeightScale(self.height_scale));
        }
        Ok(())
    }
}

// Sweep every scanline of `dir` into a fresh buffer.
// One hull allocation serves all scanlines of the direction.
pub fn sweep_direction<S: HeightSource + ?Sized>(
    field: &S,
    dir: Direction,
    config: &AoConfig,
) -> AccumulationBuffer {
    let (w, h) = (field.width(), field.height());
    let weight = config.weight();
    let mut buffer = AccumulationBuffer::new(w, h);
    let mut hull = HorizonHull::with_capacity(w.max(h));

    for line in Scanlines::new(dir, w, h) {
        hull.clear();
        for (row, col) in line {
            let z = field.sample(col, row) * config.height_scale;
            let sample = Point3::new(col as f32, row as f32, z);
            let horizon = hull.advance(sample);
            let o = occlusion(sample, horizon, config.falloff);
            buffer.add(col, row, contribution(o, weight));
        }
    }
    buffer
}

// Per-direction buffers in configured order
pub fn sweep_all<S: HeightSource + Sync + ?Sized>(
    field: &S,
    config: &AoConfig,
) -> Vec<AccumulationBuffer> {
    if config.parallel {
        config
            .directions
            .par_iter()
            .map(|&dir| sweep_direction(field, dir, config))
            .collect()
    } else {
        config
            .directions
            .iter()
            .map(|&dir| sweep_direction(field, dir, config))
            .collect()
    }
}

// Scaled heights must leave room for differences between them, or a
// steep wall would read as no occluder at all.
fn check_height_range<S: HeightSource + ?Sized>(
    field: &S,
    height_scale: f32,
) -> Result<(), InputError> {
    let mut peak = 0.0f32;
    for y in 0..field.height() {
        for x in 0..field.width() {
            peak = peak.max((field.sample(x, y) * height_scale).abs());
        }
    }
    if !(peak * 2.0).is_finite() {
        return Err(InputError::HeightOverflow { peak });
    }
    Ok(())
}

// Bake ambient occlusion for `field`. Pure: no I/O, same input gives the
// same bits whether or not the directions ran in parallel.
pub fn compute_ao<S: HeightSource + Sync + ?Sized>(
    field: &S,
    config: &AoConfig,
) -> Result<AccumulationBuffer, AoError> {
    config.validate()?;
    let (w, h) = (field.width(), field.height());
    if w == 0 || h == 0 {
        return Err(InputError::EmptyField {
            width: w,
            height: h,
        }
        .into());
    }

    check_height_range(field, config.height_scale)?;

    let start = Instant::now();
    let per_direction = sweep_all(field, config);
    if log::log_enabled!(log::Level::Debug) {
        for (dir, buf) in config.directions.iter().zip(&per_direction) {
            log::debug!(
                "direction ({:+}, {:+}): mean contribution {:.3}",
                dir.dx,
                dir.dy,
                buf.stats().mean
            );
        }
    }
    let total = AccumulationBuffer::reduce(w, h, &per_direction)?;

    let stats = total.stats();
    log::info!(
        "baked {}x{} over {} directions in {:.2?} (min {:.1}, mean {:.1}, max {:.1})",
        w,
        h,
        config.sample_count(),
        start.elapsed(),
        stats.min,
        stats.mean,
        stats.max
    );
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::{AoConfig, compute_ao, sweep_direction};
    use crate::direction::Direction;
    use crate::error::{AoError, ConfigError, InputError};
    use crate::heightfield::HeightField;

    #[test]
    fn default_config_is_valid() {
        let config = AoConfig::default();
        assert_eq!(config.sample_count(), 8);
        assert_eq!(config.weight(), 0.125);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sample_count_must_match_directions() {
        let config = AoConfig::default()
            .with_directions(Direction::AXIS)
            .with_sample_count(8);
        assert_eq!(
            config.validate(),
            Err(ConfigError::SampleCountMismatch {
                configured: 8,
                directions: 4
            })
        );
        let field = HeightField::flat(4, 4, 0.0).unwrap();
        assert!(matches!(
            compute_ao(&field, &config),
            Err(AoError::Config(ConfigError::SampleCountMismatch { .. }))
        ));
    }

    #[test]
    fn rejects_bad_direction_sets() {
        let empty = AoConfig::default().with_directions(Vec::<Direction>::new());
        assert_eq!(empty.validate(), Err(ConfigError::NoDirections));

        let dup = AoConfig::default().with_directions(vec![Direction::UP, Direction::UP]);
        assert_eq!(
            dup.validate(),
            Err(ConfigError::DuplicateDirection { dx: 0, dy: -1 })
        );

        let bad = AoConfig::default().with_directions(vec![Direction { dx: 2, dy: 0 }]);
        assert_eq!(
            bad.validate(),
            Err(ConfigError::InvalidDirection { dx: 2, dy: 0 })
        );

        let nan = AoConfig::default().with_falloff(f32::NAN);
        assert!(matches!(nan.validate(), Err(ConfigError::InvalidFalloff(_))));
        let inf = AoConfig::default().with_height_scale(f32::INFINITY);
        assert!(matches!(
            inf.validate(),
            Err(ConfigError::InvalidHeightScale(_))
        ));
    }

    #[test]
    fn single_direction_writes_every_pixel_once() {
        let field = HeightField::flat(5, 3, 7.0).unwrap();
        let config = AoConfig::default();
        for dir in Direction::PRINCIPAL {
            let buf = sweep_direction(&field, dir, &config);
            for &v in buf.values() {
                assert!((v - 255.0 / 8.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn ramp_shades_the_downhill_side_of_a_cliff() {
        // Wall along column 0; sweeping right the cells next to it see it
        let field = HeightField::from_fn(6, 1, |x, _| if x == 0 { 10.0 } else { 0.0 }).unwrap();
        let config = AoConfig::default().with_directions(vec![Direction::RIGHT]);
        let buf = compute_ao(&field, &config).unwrap();
        assert_eq!(buf.get(0, 0), 255.0);
        assert!(buf.get(1, 0) < buf.get(2, 0));
        assert!(buf.get(2, 0) < buf.get(5, 0));
        assert!(buf.get(5, 0) < 255.0);
    }

    #[test]
    fn tall_wall_shades_its_foot() {
        let field = HeightField::from_raw(3, 1, vec![1.0e20, 0.0, 0.0]).unwrap();
        let config = AoConfig::default().with_directions(vec![Direction::RIGHT]);
        let buf = compute_ao(&field, &config).unwrap();
        // rise over distance is ~1, so occlusion is 1 - e^-0.5
        let expected = (-0.5f32).exp() * 255.0;
        assert!((buf.get(1, 0) - expected).abs() < 1e-2, "got {}", buf.get(1, 0));
        assert!(buf.get(2, 0) < 255.0);
    }

    #[test]
    fn heights_too_large_to_subtract_are_rejected() {
        let field = HeightField::from_raw(2, 1, vec![1.0e20, 0.0]).unwrap();
        let config = AoConfig::default().with_height_scale(1.0e20);
        assert!(matches!(
            compute_ao(&field, &config),
            Err(AoError::Input(InputError::HeightOverflow { .. }))
        ));
        let huge = HeightField::from_raw(2, 1, vec![f32::MAX, -f32::MAX]).unwrap();
        assert!(compute_ao(&huge, &AoConfig::default()).is_err());
    }

    #[test]
    fn weight_follows_direction_count() {
        let field = HeightField::flat(3, 3, 1.0).unwrap();
        for dirs in [Direction::AXIS.to_vec(), Direction::PRINCIPAL.to_vec()] {
            let config = AoConfig::default().with_directions(dirs);
            let buf = compute_ao(&field, &config).unwrap();
            for &v in buf.values() {
                assert!((v - 255.0).abs() < 1e-3);
            }
        }
    }
}
