//! Error types for fsynth-dsp

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to allocate buffers for frame length {frame_length}")]
    Allocation {
        frame_length: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("Transform failed: {0}")]
    Transform(#[from] realfft::FftError),

    #[error("Channel count mismatch: engine has {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Config(#[from] fsynth_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
