//! Per-tick detection of control changes.

use fsynth_core::FrameConfig;

/// What a control change requires of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    None,
    /// Waveform, harmonic limit or hold factor moved; buffers stay.
    ParamOnly,
    /// Transforms and frames must be rebuilt for a new length.
    FrameLengthChanged,
}

/// Compares live configs against the last one applied.
///
/// Comparison is exact; there is no hysteresis. Raw control floats are
/// resolved into a [`FrameConfig`] before they get here, so knob jitter
/// that rounds to the same steps never registers.
#[derive(Debug, Clone)]
pub struct ParameterChangeDetector {
    applied: FrameConfig,
}

impl ParameterChangeDetector {
    pub fn new(applied: FrameConfig) -> Self {
        Self { applied }
    }

    /// Classify `live` against the applied snapshot.
    #[inline]
    pub fn poll(&self, live: &FrameConfig) -> ChangeKind {
        if live.frame_length() != self.applied.frame_length() {
            ChangeKind::FrameLengthChanged
        } else if *live != self.applied {
            ChangeKind::ParamOnly
        } else {
            ChangeKind::None
        }
    }

    /// Record `config` as applied. Call only once the engine has taken it.
    pub fn commit(&mut self, config: FrameConfig) {
        self.applied = config;
    }

    #[inline]
    pub fn applied(&self) -> &FrameConfig {
        &self.applied
    }
}
