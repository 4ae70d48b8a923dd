//! Bin magnitudes of a half-spectrum, rescaled for display.
//!
//! The trace is a pure function of the spectrum it was computed from. It
//! carries no history, and nothing in it ever feeds back into synthesis.
//!
//! ## Numerical policy
//!
//! - Non-finite magnitudes (NaN, ±Inf) are replaced with 0 before scaling.
//! - A flat trace (`max == min`, including all-zero) is left unscaled.
//! - Scaling is linear onto `[0, 1]`. It is only idempotent once the trace
//!   already spans exactly `[0, 1]`, so normalize once per frame, from raw
//!   magnitudes.

use rustfft::num_complex::Complex32;

/// Magnitude of every bin, `sqrt(re² + im²)`, with non-finite values zeroed.
pub fn compute_magnitudes(spectrum: &[Complex32]) -> Vec<f32> {
    let mut trace = vec![0.0; spectrum.len()];
    compute_magnitudes_into(spectrum, &mut trace);
    trace
}

/// Allocation-free form of [`compute_magnitudes`].
///
/// Writes `min(spectrum.len(), trace.len())` values.
#[inline]
pub fn compute_magnitudes_into(spectrum: &[Complex32], trace: &mut [f32]) {
    for (out, bin) in trace.iter_mut().zip(spectrum) {
        let magnitude = bin.norm();
        *out = if magnitude.is_finite() { magnitude } else { 0.0 };
    }
}

/// Rescale `values` linearly onto `[0, 1]`.
///
/// Leaves the slice untouched when it is empty or every value is equal.
pub fn normalize(values: &mut [f32]) {
    let Some((min, max)) = min_max(values) else {
        return;
    };

    if max == min {
        return;
    }

    let range = max - min;
    for value in values.iter_mut() {
        *value = (*value - min) / range;
    }
}

fn min_max(values: &[f32]) -> Option<(f32, f32)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// Normalized magnitude trace of the most recent frame.
///
/// Sized to the bin count of the active frame length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MagnitudeTrace {
    values: Vec<f32>,
}

impl MagnitudeTrace {
    /// All-zero trace of `bins` values.
    pub fn new(bins: usize) -> Self {
        Self {
            values: vec![0.0; bins],
        }
    }

    /// Wrap a caller-allocated buffer. Its contents are zeroed.
    pub fn from_buffer(mut values: Vec<f32>) -> Self {
        values.fill(0.0);
        Self { values }
    }

    /// Recompute from `spectrum` and rescale.
    ///
    /// The trace keeps its length; size it with the spectrum's bin count.
    pub fn update(&mut self, spectrum: &[Complex32]) {
        debug_assert_eq!(spectrum.len(), self.values.len());
        compute_magnitudes_into(spectrum, &mut self.values);
        normalize(&mut self.values);
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the strongest bin, first one on ties.
    pub fn peak_bin(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &v) in self.values.iter().enumerate() {
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| i)
    }
}

impl AsRef<[f32]> for MagnitudeTrace {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}
