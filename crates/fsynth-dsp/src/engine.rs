//! Multi-channel resynthesis engine driven one host tick at a time.

use crate::channel::{PreparedFrame, ResynthChannel};
use crate::detector::{ChangeKind, ParameterChangeDetector};
use crate::{Error, Result};
#[cfg(feature = "live")]
use fsynth_analysis::SpectrumDisplay;
use fsynth_core::{ControlValues, EngineConfig, FrameConfig};
#[cfg(feature = "live")]
use std::sync::Arc;

/// Resynthesis engine for one or more independent channels.
///
/// Each tick the live controls are resolved and compared against the
/// applied config; changes are applied before any sample is processed.
/// A frame-length change is prepared for every channel first and only then
/// committed, so channels never disagree on the active config.
#[derive(Debug)]
pub struct ResynthEngine {
    config: EngineConfig,
    detector: ParameterChangeDetector,
    channels: Vec<ResynthChannel>,
    /// Last frame config whose rebuild failed; retried silently.
    rejected: Option<FrameConfig>,
}

impl ResynthEngine {
    /// Build from initial raw control values.
    pub fn new(config: EngineConfig, controls: &ControlValues) -> Result<Self> {
        let frame = config.ranges.resolve(controls);
        if config.ranges.frame_length.resolve(controls.frame_length) == 0 {
            tracing::warn!("frame length 0 is invalid, clamping to 1");
        }
        Self::with_frame_config(config, frame)
    }

    /// Build with an explicit initial frame config.
    pub fn with_frame_config(config: EngineConfig, frame: FrameConfig) -> Result<Self> {
        config.validate()?;

        let channels = (0..config.channels)
            .map(|_| ResynthChannel::new(frame))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            channels = config.channels,
            frame_length = frame.frame_length(),
            "resynthesis engine created"
        );

        Ok(Self {
            config,
            detector: ParameterChangeDetector::new(frame),
            channels,
            rejected: None,
        })
    }

    /// Apply any change in `controls`.
    ///
    /// Called by [`process`](Self::process) every tick; call it directly to
    /// reconfigure without processing audio. If rebuilding for a new frame
    /// length fails, the engine keeps its previous config and the next poll
    /// tries again. Each rejected config is logged once.
    pub fn poll_controls(&mut self, controls: &ControlValues) -> Result<ChangeKind> {
        let live = self.config.ranges.resolve(controls);
        let change = self.detector.poll(&live);

        match change {
            ChangeKind::None => {}
            ChangeKind::ParamOnly => {
                for channel in &mut self.channels {
                    channel.apply_params(live);
                }
                tracing::debug!(
                    waveform = live.waveform().name(),
                    harmonic_limit = live.harmonic_limit(),
                    hold_factor = live.hold_factor(),
                    "resynthesis parameters updated"
                );
                self.detector.commit(live);
            }
            ChangeKind::FrameLengthChanged => {
                let retry = self.rejected == Some(live);
                if !retry && self.config.ranges.frame_length.resolve(controls.frame_length) == 0 {
                    tracing::warn!("frame length 0 is invalid, clamping to 1");
                }
                self.rebuild(live, retry)?;
                self.detector.commit(live);
            }
        }

        Ok(change)
    }

    fn rebuild(&mut self, live: FrameConfig, retry: bool) -> Result<()> {
        let crossfade = self.config.crossfade_on_resize;
        let previous = self.detector.applied().frame_length();

        let prepared = self
            .channels
            .iter_mut()
            .map(|channel| channel.prepare(live, crossfade))
            .collect::<Result<Vec<PreparedFrame>>>();
        let prepared = match prepared {
            Ok(prepared) => prepared,
            Err(err) => {
                if !retry {
                    tracing::error!(
                        from = previous,
                        to = live.frame_length(),
                        "frame length change failed, keeping previous config: {err}"
                    );
                }
                self.rejected = Some(live);
                return Err(err);
            }
        };
        self.rejected = None;

        for (channel, prepared) in self.channels.iter_mut().zip(prepared) {
            channel.commit(prepared);
        }

        tracing::debug!(
            from = previous,
            to = live.frame_length(),
            crossfade,
            "frame length changed, partial frame discarded"
        );
        Ok(())
    }

    /// One host tick: one input and one output sample per channel.
    pub fn process(
        &mut self,
        inputs: &[f32],
        outputs: &mut [f32],
        controls: &ControlValues,
    ) -> Result<()> {
        let expected = self.channels.len();
        for actual in [inputs.len(), outputs.len()] {
            if actual != expected {
                return Err(Error::ChannelMismatch { expected, actual });
            }
        }

        self.poll_controls(controls)?;

        for ((channel, &input), output) in self.channels.iter_mut().zip(inputs).zip(outputs) {
            *output = channel.tick(input)?;
        }
        Ok(())
    }

    /// One host tick of a mono engine.
    pub fn tick(&mut self, input: f32, controls: &ControlValues) -> Result<f32> {
        let mut output = [0.0];
        self.process(&[input], &mut output, controls)?;
        Ok(output[0])
    }

    /// Run a mono engine over a whole buffer with fixed controls.
    ///
    /// `output` receives `min(input.len(), output.len())` samples.
    pub fn process_block(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        controls: &ControlValues,
    ) -> Result<()> {
        for (&x, y) in input.iter().zip(output.iter_mut()) {
            *y = self.tick(x, controls)?;
        }
        Ok(())
    }

    /// The config currently in effect.
    #[inline]
    pub fn frame_config(&self) -> &FrameConfig {
        self.detector.applied()
    }

    #[inline]
    pub fn engine_config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn channel(&self, index: usize) -> Option<&ResynthChannel> {
        self.channels.get(index)
    }

    pub fn channels(&self) -> &[ResynthChannel] {
        &self.channels
    }

    #[inline]
    pub fn latency_samples(&self) -> usize {
        self.frame_config().latency_samples()
    }

    /// Publish `channel`'s completed frames to `display`.
    ///
    /// Returns `false` if the channel does not exist.
    #[cfg(feature = "live")]
    pub fn attach_display(&mut self, channel: usize, display: Arc<SpectrumDisplay>) -> bool {
        match self.channels.get_mut(channel) {
            Some(channel) => {
                channel.attach_display(display);
                true
            }
            None => false,
        }
    }
}
