//! Error types for fsynth-core.

use thiserror::Error;

/// Error type for fsynth-core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid control range '{name}': min={min}, max={max}")]
    InvalidRange { name: &'static str, min: f32, max: f32 },

    #[error("Invalid channel count: {0}. Must be at least 1")]
    InvalidChannelCount(usize),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
