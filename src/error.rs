//! Centralized error type for the fourier-synth umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] fsynth_core::Error),

    #[error("DSP: {0}")]
    Dsp(#[from] fsynth_dsp::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
