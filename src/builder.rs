//! Builder for configuring and constructing a `FourierSynth`.

use crate::{FourierSynth, Result};
use fsynth_core::{ControlRanges, ControlValues, EngineConfig, SharedControls};
use fsynth_dsp::ResynthEngine;
use std::sync::Arc;

/// Channel count, resize behaviour and control bounds are fixed at build
/// time. Everything else moves through the shared controls afterwards.
///
/// # Example
///
/// ```rust
/// use fourier_synth::prelude::*;
///
/// let synth = FourierSynth::builder()
///     .channels(2)
///     .controls(ControlValues::new(256.0, 1.0, 1.0, 8.0))
///     .build()?;
///
/// assert_eq!(synth.latency_samples(), 512);
/// # Ok::<(), fourier_synth::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct FourierSynthBuilder {
    config: EngineConfig,
    controls: Option<ControlValues>,

    #[cfg(feature = "live")]
    display: bool,
}

impl Default for FourierSynthBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            controls: None,

            #[cfg(feature = "live")]
            display: false,
        }
    }
}

impl FourierSynthBuilder {
    /// Default: 1
    pub fn channels(mut self, count: usize) -> Self {
        self.config.channels = count;
        self
    }

    /// Default: false
    pub fn crossfade_on_resize(mut self, enabled: bool) -> Self {
        self.config.crossfade_on_resize = enabled;
        self
    }

    pub fn ranges(mut self, ranges: ControlRanges) -> Self {
        self.config.ranges = ranges;
        self
    }

    /// Initial control values. Defaults to each range's default.
    pub fn controls(mut self, values: ControlValues) -> Self {
        self.controls = Some(values);
        self
    }

    /// Publish every channel's trace to a live display.
    #[cfg(feature = "live")]
    pub fn display(mut self, enabled: bool) -> Self {
        self.display = enabled;
        self
    }

    pub fn build(self) -> Result<FourierSynth> {
        self.config.validate()?;

        let values = self
            .controls
            .unwrap_or_else(|| self.config.ranges.defaults());
        let engine = ResynthEngine::new(self.config, &values)?;

        #[allow(unused_mut)]
        let mut synth = FourierSynth::from_parts(engine, Arc::new(SharedControls::new(values)));

        #[cfg(feature = "live")]
        if self.display {
            synth.enable_displays();
        }

        tracing::debug!(
            channels = synth.num_channels(),
            frame_length = synth.frame_config().frame_length(),
            "fourier synth built"
        );
        Ok(synth)
    }
}
