//! # fourier-synth - Frame-based Spectral Resynthesis
//!
//! Audio is collected into fixed-size frames, transformed to the frequency
//! domain, and every bin is replaced by a harmonic series shaped like a sine,
//! sawtooth or square wave before being transformed back and played out one
//! frame later.
//!
//! ## Architecture
//!
//! fourier-synth is an umbrella crate that coordinates:
//! - **fsynth-core** - Frame config, control ranges, lock-free control cells
//! - **fsynth-dsp** - Transform backend, frame buffering, harmonic synthesis, change detection
//! - **fsynth-analysis** - Normalized magnitude traces and live display publishing
//!
//! ## Quick Start
//!
//! ```rust
//! use fourier_synth::prelude::*;
//!
//! let mut synth = FourierSynth::builder()
//!     .controls(ControlValues::new(8.0, 0.0, 0.0, 1.0))
//!     .build()?;
//!
//! let input = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];
//! let mut output = [0.0; 16];
//! let mut padded = input.to_vec();
//! padded.resize(16, 0.0);
//! synth.process_block(&padded, &mut output)?;
//!
//! // Sine mode reproduces the input one frame later.
//! assert!((output[8] - 10.0).abs() < 1e-3);
//!
//! // The host can move controls from any thread.
//! synth.controls().set_waveform(1.0);
//! # Ok::<(), fourier_synth::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `live` - Lock-free published magnitude traces for a renderer thread
//! - `serialization` - serde derives on configuration types

/// Re-export of fsynth-core for direct access
pub use fsynth_core as core;

/// Re-export of fsynth-dsp for direct access
pub use fsynth_dsp as dsp;

/// Re-export of fsynth-analysis for direct access
pub use fsynth_analysis as analysis;

pub use fsynth_core::{
    ControlCell, ControlRanges, ControlValues, EngineConfig, FrameConfig, ParameterRange,
    SharedControls, Waveform, MAX_CHANNELS,
};

pub use fsynth_dsp::{
    ChangeKind, FrameBuffer, FrameTick, HarmonicSynthesizer, ParameterChangeDetector,
    ResynthChannel, ResynthEngine, TransformBackend,
};

pub use fsynth_analysis::{
    compute_magnitudes, normalize, Complex32, DisplayHandle, MagnitudeTrace,
};

#[cfg(feature = "live")]
pub use fsynth_analysis::SpectrumDisplay;

mod error;
pub use error::{Error, Result};

mod builder;
mod engine;

pub use builder::FourierSynthBuilder;
pub use engine::FourierSynth;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{FourierSynth, FourierSynthBuilder};

    pub use crate::{ControlRanges, ControlValues, FrameConfig, SharedControls, Waveform};

    pub use crate::{Error, Result};
}
