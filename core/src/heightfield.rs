use crate::HeightSource;
use crate::error::InputError;

// Immutable row-major grid of heights, access as `sample(x, y)`
// where x is the column and y the row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    heights: Vec<f32>,
}

impl HeightField {
    // Wrap a flat row-major buffer. Rejects empty grids, wrong lengths
    // and NaN/infinite heights so the sweep never sees them.
    pub fn from_raw(width: usize, height: usize, heights: Vec<f32>) -> Result<Self, InputError> {
        if width == 0 || height == 0 {
            return Err(InputError::EmptyField { width, height });
        }
        let expected = width * height;
        if heights.len() != expected {
            return Err(InputError::SizeMismatch {
                expected,
                got: heights.len(),
            });
        }
        if let Some(i) = heights.iter().position(|h| !h.is_finite()) {
            return Err(InputError::NonFiniteHeight {
                x: i % width,
                y: i / width,
                value: heights[i],
            });
        }

        Ok(Self {
            width,
            height,
            heights,
        })
    }

    // Build from nested rows, `rows[y][x]`
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, InputError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        for (row, r) in rows.iter().enumerate() {
            if r.len() != width {
                return Err(InputError::RaggedRows {
                    row,
                    expected: width,
                    got: r.len(),
                });
            }
        }
        let flat = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::from_raw(width, height, flat)
    }

    // Evaluate `f(x, y)` for every cell
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, InputError>
    where
        F: FnMut(usize, usize) -> f32,
    {
        let mut heights = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                heights.push(f(x, y));
            }
        }
        Self::from_raw(width, height, heights)
    }

    // Same height everywhere
    pub fn flat(width: usize, height: usize, value: f32) -> Result<Self, InputError> {
        Self::from_raw(width, height, vec![value; width * height])
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    // Lowest and highest height in the grid
    pub fn range(&self) -> (f32, f32) {
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

impl HeightSource for HeightField {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn sample(&self, x: usize, y: usize) -> f32 {
        self.heights[y * self.width + x]
    }
}
