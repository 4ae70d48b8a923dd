//! Core types for the fourier-synth spectral resynthesis engine.
//!
//! - [`FrameConfig`]: the active frame length, hold factor, waveform family and harmonic limit
//! - [`EngineConfig`] / [`ControlRanges`]: validated engine setup and host control bounds
//! - [`ParameterRange`]: clamping and integer resolution of raw control values
//! - [`SharedControls`]: lock-free control cells written by the host, read per tick

pub mod error;
pub use error::{Error, Result};

pub mod config;
pub use config::{ControlRanges, ControlValues, EngineConfig, FrameConfig, Waveform, MAX_CHANNELS};

pub mod parameter;
pub use parameter::ParameterRange;

pub mod controls;
pub use controls::{ControlCell, SharedControls};
