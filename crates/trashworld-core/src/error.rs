//! Error types for the scene core.
//!
//! Parameter problems are [`ConfigError`]s and are always raised before any
//! buffer is allocated. Model fetch problems are [`ResourceLoadError`]s and are
//! only ever logged by the frame loop. [`SceneError`] wraps both, plus the
//! particle-ceiling check done at allocation time.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("galaxy particle count must be at least 1")]
    EmptyGalaxy,
    #[error("galaxy needs at least 2 branches, got {0}")]
    TooFewBranches(u32),
    #[error("galaxy radius must be positive and finite, got {0}")]
    NonPositiveRadius(f32),
    #[error("point size must be positive and finite, got {0}")]
    NonPositiveSize(f32),
    #[error("randomness must be non-negative and finite, got {0}")]
    NegativeRandomness(f32),
    #[error("randomness power must be finite and at least 1, got {0}")]
    RandomnessPowerBelowOne(f32),
    #[error("galaxy `{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("galaxy `{0}` has a non-finite channel")]
    NonFiniteColor(&'static str),
    #[error("dust field needs at least one particle")]
    EmptyDust,
    #[error("dust area size must be positive and finite, got {0}")]
    NonPositiveArea(f32),
    #[error("dust speed must be non-negative and finite, got {0}")]
    InvalidDustSpeed(f32),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("failed to load `{path}`: {reason}")]
pub struct ResourceLoadError {
    pub path: String,
    pub reason: String,
}

impl ResourceLoadError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("particle buffer of {requested} points exceeds the ceiling of {ceiling}")]
    Allocation { requested: usize, ceiling: usize },
    #[error("parallel particle attributes disagree: {positions} positions vs {attribute} values")]
    BufferMismatch { positions: usize, attribute: usize },
    #[error(transparent)]
    ResourceLoad(#[from] ResourceLoadError),
}

pub type SceneResult<T> = Result<T, SceneError>;
