// core holds the horizon-sweep ambient occlusion baker, free of any file I/O
pub mod composite;
pub mod direction;
pub mod driver;
pub mod error;
pub mod heightfield;
pub mod horizon;
pub mod normalize;
pub mod occlusion;
pub mod scanline;

pub use composite::composite_preview;
pub use direction::Direction;
pub use driver::{AoConfig, compute_ao, sweep_direction};
pub use error::{AoError, ConfigError, InputError};
pub use heightfield::HeightField;
pub use horizon::{HorizonHull, Point3};
pub use normalize::{to_ao_image, to_intensity};
pub use occlusion::{AccumulationBuffer, occlusion};

// Read-only grid of heights the sweep samples from.
// `sample(x, y)` is called with x in [0, width) and y in [0, height).
pub trait HeightSource {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn sample(&self, x: usize, y: usize) -> f32;
}
