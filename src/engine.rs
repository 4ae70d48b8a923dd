//! FourierSynth host facade binding the engine to shared controls

use crate::{FourierSynthBuilder, Result};
use fsynth_core::{FrameConfig, SharedControls};
use fsynth_dsp::ResynthEngine;
use std::sync::Arc;

#[cfg(feature = "live")]
use fsynth_analysis::{DisplayHandle, SpectrumDisplay};

/// Resynthesis engine driven by host-writable controls.
///
/// The controls live in an `Arc<SharedControls>`; any thread may write them.
/// Every tick snapshots them once and hands the snapshot to the engine, so a
/// change lands before the sample that follows it.
///
/// # Example
///
/// ```rust
/// use fourier_synth::prelude::*;
///
/// let mut synth = FourierSynth::builder()
///     .channels(2)
///     .crossfade_on_resize(true)
///     .build()?;
///
/// let mut out = [0.0; 2];
/// synth.process(&[0.25, -0.25], &mut out)?;
///
/// synth.controls().set_frame_length(512.0);
/// synth.process(&[0.0, 0.0], &mut out)?;
/// assert_eq!(synth.frame_config().frame_length(), 512);
/// # Ok::<(), fourier_synth::Error>(())
/// ```
pub struct FourierSynth {
    engine: ResynthEngine,
    controls: Arc<SharedControls>,

    #[cfg(feature = "live")]
    displays: Vec<Arc<SpectrumDisplay>>,
}

impl FourierSynth {
    pub fn builder() -> FourierSynthBuilder {
        FourierSynthBuilder::default()
    }

    pub(crate) fn from_parts(engine: ResynthEngine, controls: Arc<SharedControls>) -> Self {
        Self {
            engine,
            controls,
            #[cfg(feature = "live")]
            displays: Vec::new(),
        }
    }

    /// Attach a fresh live display to every channel.
    #[cfg(feature = "live")]
    pub(crate) fn enable_displays(&mut self) {
        let bins = self.engine.frame_config().bins();
        self.displays = (0..self.engine.num_channels())
            .map(|channel| {
                let display = Arc::new(SpectrumDisplay::new(bins));
                self.engine.attach_display(channel, Arc::clone(&display));
                display
            })
            .collect();
    }

    /// One host tick across all channels.
    ///
    /// While bypassed the engine keeps running on the input so its frame
    /// position stays in step, but the dry input is copied to the output.
    pub fn process(&mut self, inputs: &[f32], outputs: &mut [f32]) -> Result<()> {
        let controls = self.controls.snapshot();
        self.engine.process(inputs, outputs, &controls)?;

        if self.controls.is_bypassed() {
            outputs.copy_from_slice(inputs);
        }
        Ok(())
    }

    /// One host tick of a mono synth.
    pub fn tick(&mut self, input: f32) -> Result<f32> {
        let mut output = [0.0];
        self.process(&[input], &mut output)?;
        Ok(output[0])
    }

    /// Run a mono synth over a whole buffer, reading controls every sample.
    pub fn process_block(&mut self, input: &[f32], output: &mut [f32]) -> Result<()> {
        for (&x, y) in input.iter().zip(output.iter_mut()) {
            *y = self.tick(x)?;
        }
        Ok(())
    }

    /// Shared handle to the controls, cheap to clone across threads.
    pub fn controls(&self) -> Arc<SharedControls> {
        Arc::clone(&self.controls)
    }

    pub fn engine(&self) -> &ResynthEngine {
        &self.engine
    }

    pub fn frame_config(&self) -> &FrameConfig {
        self.engine.frame_config()
    }

    pub fn num_channels(&self) -> usize {
        self.engine.num_channels()
    }

    /// Ticks between an input sample and its resynthesized output.
    pub fn latency_samples(&self) -> usize {
        self.engine.latency_samples()
    }

    /// Normalized magnitude trace of `channel`'s last completed frame.
    pub fn magnitudes(&self, channel: usize) -> Option<&[f32]> {
        self.engine.channel(channel).map(|c| c.magnitudes())
    }

    /// Display handle for `channel`, if displays were enabled at build time.
    #[cfg(feature = "live")]
    pub fn display(&self, channel: usize) -> Option<DisplayHandle> {
        self.displays
            .get(channel)
            .map(|display| DisplayHandle::with_live(Arc::clone(display)))
    }
}

impl std::fmt::Debug for FourierSynth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FourierSynth")
            .field("engine", &self.engine)
            .field("controls", &self.controls.snapshot())
            .field("bypassed", &self.controls.is_bypassed())
            .finish()
    }
}
