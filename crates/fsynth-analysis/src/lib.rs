//! # fsynth-analysis
//!
//! Display-side views of a resynthesized spectrum.
//!
//! - **Magnitude traces**: per-bin magnitudes, non-finite values zeroed,
//!   rescaled to `[0, 1]` once per frame
//! - **Live display**: lock-free publishing of the latest trace to a renderer
//!   on another thread (`live` feature)
//!
//! All functions operate on plain `&[Complex32]` half-spectra.
//!
//! ## Example
//!
//! ```rust
//! use fsynth_analysis::{compute_magnitudes, normalize, Complex32};
//!
//! let spectrum = [Complex32::new(3.0, 4.0), Complex32::new(1.0, 0.0)];
//! let mut trace = compute_magnitudes(&spectrum);
//! normalize(&mut trace);
//! assert_eq!(trace, vec![1.0, 0.0]);
//! ```

pub mod magnitude;

#[cfg(feature = "live")]
pub mod live;

mod handle;

pub use handle::DisplayHandle;
#[cfg(feature = "live")]
pub use live::SpectrumDisplay;
pub use magnitude::{compute_magnitudes, compute_magnitudes_into, normalize, MagnitudeTrace};
pub use rustfft::num_complex::Complex32;
