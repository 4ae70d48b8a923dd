//! Bounded control ranges and raw-value resolution.
//!
//! Host controls arrive as plain floats (knob positions in real units). A
//! [`ParameterRange`] clamps such a value into its bounds and quantizes it to
//! the integer grid every control of the resynthesis engine lives on.
//!
//! # Example
//!
//! ```
//! use fsynth_core::ParameterRange;
//!
//! // Harmonic limit knob: 1 to 40 harmonics
//! let harmonics = ParameterRange::integer(1, 40, 1);
//!
//! assert_eq!(harmonics.resolve(7.4), 7);
//! assert_eq!(harmonics.resolve(120.0), 40);
//! assert_eq!(harmonics.resolve(f32::NAN), 1); // falls back to default
//!
//! // Normalized host automation (0.0-1.0)
//! assert_eq!(harmonics.denormalize(1.0), 40.0);
//! ```

use crate::{Error, Result};

/// Integer-stepped control range.
///
/// Stores the valid bounds and the default, and provides conversion between
/// normalized (0.0-1.0) and real values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ParameterRange {
    /// Minimum real value
    pub min: f32,
    /// Maximum real value
    pub max: f32,
    /// Default real value
    pub default: f32,
}

impl ParameterRange {
    /// Create an integer range. `default` is clamped into `[min, max]`.
    pub fn integer(min: i32, max: i32, default: i32) -> Self {
        debug_assert!(max >= min, "max must not be below min");

        let (min, max) = (min as f32, max as f32);
        Self {
            min,
            max,
            default: (default as f32).clamp(min, max.max(min)),
        }
    }

    /// Check the bounds are finite and ordered.
    pub fn validate(&self, name: &'static str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.max < self.min {
            return Err(Error::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Resolve a raw control value to its integer step.
    ///
    /// Non-finite input resolves to the default.
    #[inline]
    pub fn resolve(&self, raw: f32) -> usize {
        let value = if raw.is_finite() { raw } else { self.default };
        value.clamp(self.min, self.max).round().max(0.0) as usize
    }

    /// Convert a real value to normalized (0.0-1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.span();
        if range <= 0.0 {
            return 0.0;
        }
        (value.clamp(self.min, self.max).round() - self.min) / range
    }

    /// Convert a normalized value (0.0-1.0) to a real value on the integer grid.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        (self.min + normalized * self.span()).round()
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}
