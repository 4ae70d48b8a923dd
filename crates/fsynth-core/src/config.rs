//! Engine and frame configuration.

use crate::{Error, ParameterRange, Result};

/// Waveform family the harmonic synthesizer approximates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Waveform {
    /// Fundamental only; every bin passes through untouched.
    #[default]
    Sine,
    /// Every harmonic, weighted `1/h`.
    Sawtooth,
    /// Odd harmonics only, weighted `1/h`.
    Square,
}

impl Waveform {
    /// Map a host selector to a family.
    ///
    /// Continuous values are rounded to the nearest ordinal and clamped into
    /// `0..=2`; non-finite values select [`Waveform::Sine`].
    pub fn from_ordinal(value: f32) -> Self {
        if !value.is_finite() {
            return Waveform::Sine;
        }
        match value.round().clamp(0.0, 2.0) as u8 {
            0 => Waveform::Sine,
            1 => Waveform::Sawtooth,
            _ => Waveform::Square,
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            Waveform::Sine => 0,
            Waveform::Sawtooth => 1,
            Waveform::Square => 2,
        }
    }

    pub fn all() -> &'static [Waveform] {
        &[Waveform::Sine, Waveform::Sawtooth, Waveform::Square]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Square => "Square",
        }
    }
}

/// The active processing configuration of one engine.
///
/// Every derived buffer and transform plan is sized from `frame_length`.
/// Build through [`FrameConfig::new`] so the positivity invariants hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct FrameConfig {
    frame_length: usize,
    hold_factor: usize,
    waveform: Waveform,
    harmonic_limit: usize,
}

impl FrameConfig {
    /// Create a config. A zero frame length or harmonic limit is clamped to 1.
    pub fn new(
        frame_length: usize,
        hold_factor: usize,
        waveform: Waveform,
        harmonic_limit: usize,
    ) -> Self {
        Self {
            frame_length: frame_length.max(1),
            hold_factor,
            waveform,
            harmonic_limit: harmonic_limit.max(1),
        }
    }

    #[inline]
    pub fn frame_length(&self) -> usize {
        self.frame_length
    }

    /// Ticks a sample is held before the frame index advances.
    #[inline]
    pub fn hold_factor(&self) -> usize {
        self.hold_factor
    }

    #[inline]
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    #[inline]
    pub fn harmonic_limit(&self) -> usize {
        self.harmonic_limit
    }

    /// Number of half-spectrum bins, `frame_length / 2 + 1`.
    #[inline]
    pub fn bins(&self) -> usize {
        self.frame_length / 2 + 1
    }

    /// Index of the highest representable bin.
    #[inline]
    pub fn nyquist_bin(&self) -> usize {
        self.frame_length / 2
    }

    /// Ticks between a sample entering the input frame and its resynthesized
    /// counterpart leaving the output frame.
    #[inline]
    pub fn latency_samples(&self) -> usize {
        self.frame_length * (self.hold_factor + 1)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        ControlRanges::default().resolve(&ControlValues::default())
    }
}

/// Raw control values as the host supplies them each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ControlValues {
    pub frame_length: f32,
    pub hold_factor: f32,
    /// Waveform selector, 0 Sine, 1 Sawtooth, 2 Square (continuous values are rounded).
    pub waveform: f32,
    pub harmonic_limit: f32,
}

impl ControlValues {
    pub fn new(frame_length: f32, hold_factor: f32, waveform: f32, harmonic_limit: f32) -> Self {
        Self {
            frame_length,
            hold_factor,
            waveform,
            harmonic_limit,
        }
    }
}

impl Default for ControlValues {
    fn default() -> Self {
        ControlRanges::default().defaults()
    }
}

impl From<FrameConfig> for ControlValues {
    fn from(config: FrameConfig) -> Self {
        Self {
            frame_length: config.frame_length as f32,
            hold_factor: config.hold_factor as f32,
            waveform: config.waveform.ordinal() as f32,
            harmonic_limit: config.harmonic_limit as f32,
        }
    }
}

/// Bounds of every host control.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ControlRanges {
    pub frame_length: ParameterRange,
    pub hold_factor: ParameterRange,
    pub waveform: ParameterRange,
    pub harmonic_limit: ParameterRange,
}

impl Default for ControlRanges {
    fn default() -> Self {
        Self {
            frame_length: ParameterRange::integer(1, 16384, 1024),
            hold_factor: ParameterRange::integer(0, 40, 0),
            waveform: ParameterRange::integer(0, 2, 0),
            harmonic_limit: ParameterRange::integer(1, 40, 1),
        }
    }
}

impl ControlRanges {
    pub fn validate(&self) -> Result<()> {
        self.frame_length.validate("frame_length")?;
        self.hold_factor.validate("hold_factor")?;
        self.waveform.validate("waveform")?;
        self.harmonic_limit.validate("harmonic_limit")?;
        Ok(())
    }

    /// Resolve raw controls into a config.
    pub fn resolve(&self, values: &ControlValues) -> FrameConfig {
        let waveform = if values.waveform.is_finite() {
            values.waveform.clamp(self.waveform.min, self.waveform.max)
        } else {
            self.waveform.default
        };

        FrameConfig::new(
            self.frame_length.resolve(values.frame_length),
            self.hold_factor.resolve(values.hold_factor),
            Waveform::from_ordinal(waveform),
            self.harmonic_limit.resolve(values.harmonic_limit),
        )
    }

    /// Default control values.
    pub fn defaults(&self) -> ControlValues {
        ControlValues {
            frame_length: self.frame_length.default,
            hold_factor: self.hold_factor.default,
            waveform: self.waveform.default,
            harmonic_limit: self.harmonic_limit.default,
        }
    }
}

/// Configuration for a resynthesis engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct EngineConfig {
    /// Independent channels, each with its own transform and frame buffers.
    pub channels: usize,
    /// Seed the first frame after a frame-length change with a 50/50 blend of
    /// the previous output and the discarded input.
    pub crossfade_on_resize: bool,
    pub ranges: ControlRanges,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channels: 1,
            crossfade_on_resize: false,
            ranges: ControlRanges::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(Error::InvalidChannelCount(self.channels));
        }
        if self.channels > MAX_CHANNELS {
            return Err(Error::InvalidConfig(format!(
                "{} channels requested, at most {} supported",
                self.channels, MAX_CHANNELS
            )));
        }
        self.ranges.validate()
    }
}

/// Upper bound on engine channels.
pub const MAX_CHANNELS: usize = 64;
