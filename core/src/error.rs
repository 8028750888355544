use thiserror::Error;

// Problems with the height data itself. Raised before any sweep starts.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("height field has zero-sized dimensions {width}x{height}")]
    EmptyField { width: usize, height: usize },

    #[error("height data has {got} samples, expected {expected} for the given dimensions")]
    SizeMismatch { expected: usize, got: usize },

    #[error("height at ({x}, {y}) is not finite: {value}")]
    NonFiniteHeight { x: usize, y: usize, value: f32 },

    #[error("scaled heights reach {peak}, too large to take differences of")]
    HeightOverflow { peak: f32 },

    #[error("buffer is {got:?}, expected {expected:?} (width, height)")]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("rows have uneven lengths: row {row} has {got} samples, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
}

// Problems with the bake parameters, caught by `AoConfig::validate`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("direction set is empty")]
    NoDirections,

    #[error("direction ({dx}, {dy}) is not a unit grid step")]
    InvalidDirection { dx: i32, dy: i32 },

    #[error("direction ({dx}, {dy}) appears more than once")]
    DuplicateDirection { dx: i32, dy: i32 },

    #[error("sample count {configured} does not match the {directions} configured directions")]
    SampleCountMismatch { configured: usize, directions: usize },

    #[error("falloff coefficient must be finite, got {0}")]
    InvalidFalloff(f32),

    #[error("height scale must be finite, got {0}")]
    InvalidHeightScale(f32),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AoError {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
