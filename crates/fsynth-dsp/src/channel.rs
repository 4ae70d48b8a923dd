//! One channel of the resynthesis pipeline.
//!
//! Per completed frame: forward transform → harmonic stacking → magnitude
//! trace → inverse transform → swap into the output frame.

use crate::buffer::try_filled;
use crate::frame::FrameBuffer;
use crate::harmonic::HarmonicSynthesizer;
use crate::transform::TransformBackend;
use crate::Result;
#[cfg(feature = "live")]
use fsynth_analysis::SpectrumDisplay;
use fsynth_analysis::{Complex32, MagnitudeTrace};
use fsynth_core::FrameConfig;
use realfft::RealFftPlanner;
#[cfg(feature = "live")]
use std::sync::Arc;

/// Everything sized by the frame length, built ahead of a swap.
///
/// Produced by [`ResynthChannel::prepare`]; dropping it leaves the channel
/// untouched.
pub struct PreparedFrame {
    config: FrameConfig,
    backend: TransformBackend,
    frames: FrameBuffer,
    synth: HarmonicSynthesizer,
    trace: MagnitudeTrace,
}

impl PreparedFrame {
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

/// Independent resynthesis state for one audio channel.
///
/// Nothing here is shared with other channels.
pub struct ResynthChannel {
    config: FrameConfig,
    planner: RealFftPlanner<f32>,
    backend: TransformBackend,
    frames: FrameBuffer,
    synth: HarmonicSynthesizer,
    trace: MagnitudeTrace,
    frames_completed: u64,

    #[cfg(feature = "live")]
    display: Option<Arc<SpectrumDisplay>>,
}

impl ResynthChannel {
    pub fn new(config: FrameConfig) -> Result<Self> {
        let mut planner = RealFftPlanner::new();
        let PreparedFrame {
            config,
            backend,
            frames,
            synth,
            trace,
        } = Self::build(config, &mut planner)?;

        Ok(Self {
            config,
            planner,
            backend,
            frames,
            synth,
            trace,
            frames_completed: 0,
            #[cfg(feature = "live")]
            display: None,
        })
    }

    fn build(config: FrameConfig, planner: &mut RealFftPlanner<f32>) -> Result<PreparedFrame> {
        let frame_length = config.frame_length();
        #[cfg(test)]
        if frame_length == tests::UNALLOCATABLE_FRAME_LENGTH {
            return Err(tests::allocation_error(frame_length));
        }

        Ok(PreparedFrame {
            backend: TransformBackend::with_planner(frame_length, planner)?,
            frames: FrameBuffer::new(frame_length, config.hold_factor())?,
            synth: HarmonicSynthesizer::new(
                frame_length,
                config.waveform(),
                config.harmonic_limit(),
            )?,
            trace: MagnitudeTrace::from_buffer(try_filled(config.bins(), 0.0, frame_length)?),
            config,
        })
    }

    /// Build the state for `config` without touching the running one.
    ///
    /// With `crossfade`, the new output frame is seeded from the current
    /// output and the in-flight input; otherwise it starts silent.
    pub fn prepare(&mut self, config: FrameConfig, crossfade: bool) -> Result<PreparedFrame> {
        let mut prepared = Self::build(config, &mut self.planner)?;
        if crossfade {
            prepared.frames.seed_crossfade(&self.frames);
            tracing::debug!(
                from = self.frames.frame_length(),
                to = config.frame_length(),
                "seeded first output frame with cross-fade"
            );
        }
        Ok(prepared)
    }

    /// Swap in prepared state. The partially filled frame is discarded.
    pub fn commit(&mut self, prepared: PreparedFrame) {
        self.config = prepared.config;
        self.backend = prepared.backend;
        self.frames = prepared.frames;
        self.synth = prepared.synth;
        self.trace = prepared.trace;

        #[cfg(feature = "live")]
        if let Some(display) = &self.display {
            display.reset(self.trace.len());
        }
    }

    /// Rebuild for `config`. On error the previous configuration stays active.
    pub fn reconfigure(&mut self, config: FrameConfig, crossfade: bool) -> Result<()> {
        let prepared = self.prepare(config, crossfade)?;
        self.commit(prepared);
        Ok(())
    }

    /// Apply waveform, harmonic limit and hold factor from `config`.
    ///
    /// The frame in progress keeps its samples; the new parameters shape it
    /// when it completes. `config` must keep the current frame length.
    pub fn apply_params(&mut self, config: FrameConfig) {
        debug_assert_eq!(config.frame_length(), self.config.frame_length());

        self.synth.set_params(config.waveform(), config.harmonic_limit());
        self.frames.set_hold_factor(config.hold_factor());
        self.config = config;
    }

    /// Process one host tick and return the output sample.
    #[inline]
    pub fn tick(&mut self, input: f32) -> Result<f32> {
        let tick = self.frames.advance(input);
        if tick.frame_complete {
            self.process_frame()?;
        }
        Ok(tick.output)
    }

    fn process_frame(&mut self) -> Result<()> {
        self.backend.input_mut().copy_from_slice(self.frames.input());
        self.backend.forward()?;

        self.synth.synthesize(self.backend.spectrum_mut());
        self.trace.update(self.backend.spectrum());

        #[cfg(feature = "live")]
        if let Some(display) = &self.display {
            display.publish(self.trace.as_slice());
        }

        self.backend.inverse()?;
        self.backend.swap_output(self.frames.output_buffer_mut());
        self.frames_completed += 1;
        Ok(())
    }

    #[inline]
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    #[inline]
    pub fn frame_length(&self) -> usize {
        self.config.frame_length()
    }

    /// Position within the frame being filled.
    #[inline]
    pub fn frame_index(&self) -> usize {
        self.frames.index()
    }

    /// Normalized magnitudes of the last completed frame.
    ///
    /// Always `frame_length / 2 + 1` values; all zero before the first frame.
    #[inline]
    pub fn magnitudes(&self) -> &[f32] {
        self.trace.as_slice()
    }

    pub fn trace(&self) -> &MagnitudeTrace {
        &self.trace
    }

    /// Frames resynthesized since construction.
    #[inline]
    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }

    #[inline]
    pub fn latency_samples(&self) -> usize {
        self.config.latency_samples()
    }

    /// Input frame being filled.
    pub fn input_frame(&self) -> &[f32] {
        self.frames.input()
    }

    /// Output frame being played, scaled by the frame length.
    pub fn output_frame(&self) -> &[f32] {
        self.frames.output()
    }

    /// Bin count of the transform backend's spectrum.
    pub fn spectrum_len(&self) -> usize {
        self.backend.spectrum().len()
    }

    /// Publish every completed frame's trace to `display`.
    #[cfg(feature = "live")]
    pub fn attach_display(&mut self, display: Arc<SpectrumDisplay>) {
        display.reset(self.trace.len());
        self.display = Some(display);
    }

    /// Run the per-frame spectral stage on an arbitrary spectrum.
    ///
    /// Useful for inspecting what the synthesizer does to a frame without
    /// driving the tick loop. `spectrum` must have `frame_length / 2 + 1` bins.
    pub fn synthesize_spectrum(&mut self, spectrum: &mut [Complex32]) {
        self.synth.synthesize(spectrum);
    }
}

impl std::fmt::Debug for ResynthChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResynthChannel")
            .field("config", &self.config)
            .field("frame_index", &self.frames.index())
            .field("frames_completed", &self.frames_completed)
            .finish_non_exhaustive()
    }
}
