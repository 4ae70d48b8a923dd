//! Tolerance constants for resynthesis testing.
//!
//! Different operations require different precision levels.

/// Floating point rounding errors (for exact copies, normalization bounds).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// One forward/inverse transform pair on unit-scale signals.
pub const DSP_EPSILON: f32 = 1e-4;

/// Transform pairs on signals in the tens, or relative spectral comparisons.
pub const PERCEPTUAL_EPSILON: f32 = 0.001;

/// Silence threshold (~-80dB).
/// Values below this are considered silent.
pub const SILENCE_THRESHOLD: f32 = 0.0001;
