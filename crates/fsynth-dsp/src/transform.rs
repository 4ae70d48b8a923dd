//! Real-input transform backend.
//!
//! Owns the forward (real → complex) and inverse (complex → real) plans for
//! exactly one frame length, plus every buffer they touch. A backend is
//! never resized: a new frame length means a new backend.
//!
//! ## Conventions
//!
//! - The spectrum is the non-redundant half, `frame_length / 2 + 1` bins.
//! - [`TransformBackend::inverse`] is unnormalized: a forward/inverse round
//!   trip returns the input scaled by `frame_length`.
//! - Both plans use their input buffer as scratch. After `forward()` the
//!   time-domain input is garbage; after `inverse()` the spectrum is.

use crate::buffer::try_filled;
use crate::Result;
use fsynth_analysis::Complex32;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Forward and inverse real FFT for one frame length.
pub struct TransformBackend {
    frame_length: usize,
    forward: Arc<dyn RealToComplex<f32>>,
    inverse: Arc<dyn ComplexToReal<f32>>,

    // Pre-allocated buffers (RT-safe)
    input: Vec<f32>,
    spectrum: Vec<Complex32>,
    output: Vec<f32>,
    forward_scratch: Vec<Complex32>,
    inverse_scratch: Vec<Complex32>,
}

impl TransformBackend {
    /// Plan and allocate a backend with a private planner.
    pub fn new(frame_length: usize) -> Result<Self> {
        Self::with_planner(frame_length, &mut RealFftPlanner::new())
    }

    /// Plan and allocate a backend, reusing plans cached in `planner`.
    ///
    /// `frame_length` must be at least 1.
    pub fn with_planner(frame_length: usize, planner: &mut RealFftPlanner<f32>) -> Result<Self> {
        debug_assert!(frame_length > 0, "frame length must be positive");

        let forward = planner.plan_fft_forward(frame_length);
        let inverse = planner.plan_fft_inverse(frame_length);
        let bins = frame_length / 2 + 1;
        let zero = Complex32::new(0.0, 0.0);

        Ok(Self {
            frame_length,
            input: try_filled(frame_length, 0.0, frame_length)?,
            spectrum: try_filled(bins, zero, frame_length)?,
            output: try_filled(frame_length, 0.0, frame_length)?,
            forward_scratch: try_filled(forward.get_scratch_len(), zero, frame_length)?,
            inverse_scratch: try_filled(inverse.get_scratch_len(), zero, frame_length)?,
            forward,
            inverse,
        })
    }

    #[inline]
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.spectrum.len()
    }

    /// Time-domain input for the next `forward()`. Fill it completely.
    #[inline]
    pub fn input_mut(&mut self) -> &mut [f32] {
        &mut self.input
    }

    #[inline]
    pub fn spectrum(&self) -> &[Complex32] {
        &self.spectrum
    }

    #[inline]
    pub fn spectrum_mut(&mut self) -> &mut [Complex32] {
        &mut self.spectrum
    }

    /// Result of the last `inverse()`, scaled by `frame_length`.
    #[inline]
    pub fn output(&self) -> &[f32] {
        &self.output
    }

    /// Exchange the output buffer with an equally sized one.
    pub(crate) fn swap_output(&mut self, other: &mut Vec<f32>) {
        debug_assert_eq!(other.len(), self.output.len());
        std::mem::swap(&mut self.output, other);
    }

    /// Transform the input frame into the spectrum.
    pub fn forward(&mut self) -> Result<()> {
        self.forward.process_with_scratch(
            &mut self.input,
            &mut self.spectrum,
            &mut self.forward_scratch,
        )?;
        Ok(())
    }

    /// Transform the spectrum back into the output frame.
    ///
    /// A real signal's DC bin (and Nyquist bin, for even lengths) has no
    /// imaginary part; whatever synthesis left there is dropped first.
    pub fn inverse(&mut self) -> Result<()> {
        self.spectrum[0].im = 0.0;
        if self.frame_length % 2 == 0 {
            let nyquist = self.frame_length / 2;
            self.spectrum[nyquist].im = 0.0;
        }

        self.inverse.process_with_scratch(
            &mut self.spectrum,
            &mut self.output,
            &mut self.inverse_scratch,
        )?;
        Ok(())
    }
}

impl std::fmt::Debug for TransformBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformBackend")
            .field("frame_length", &self.frame_length)
            .field("bins", &self.spectrum.len())
            .finish_non_exhaustive()
    }
}
