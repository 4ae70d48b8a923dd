//! Sample-by-sample frame accumulation and playback.
//!
//! One counter drives both directions: each advancing tick writes the input
//! sample at `index` and emits the output frame's sample at the same
//! position. When `index` wraps, the caller resynthesizes the input frame
//! and swaps the result in as the next output frame, so playback runs
//! exactly one frame behind accumulation.

use crate::buffer::try_filled;
use crate::Result;

/// Outcome of one host tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Sample to emit this tick, already divided by the frame length.
    pub output: f32,
    /// The input frame just filled up and is ready for resynthesis.
    pub frame_complete: bool,
}

/// Input frame being filled and output frame being played.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    input: Vec<f32>,
    output: Vec<f32>,
    index: usize,
    hold_factor: usize,
    hold_counter: usize,
    held: f32,
}

impl FrameBuffer {
    /// Allocate zeroed frames of `frame_length` samples.
    pub fn new(frame_length: usize, hold_factor: usize) -> Result<Self> {
        debug_assert!(frame_length > 0, "frame length must be positive");

        Ok(Self {
            input: try_filled(frame_length, 0.0, frame_length)?,
            output: try_filled(frame_length, 0.0, frame_length)?,
            index: 0,
            hold_factor,
            hold_counter: 0,
            held: 0.0,
        })
    }

    #[inline]
    pub fn frame_length(&self) -> usize {
        self.input.len()
    }

    /// Position the next advancing tick reads and writes.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn hold_factor(&self) -> usize {
        self.hold_factor
    }

    /// Takes effect from the next tick; the frame position is kept.
    pub fn set_hold_factor(&mut self, hold_factor: usize) {
        self.hold_factor = hold_factor;
    }

    /// Advance by one host tick.
    ///
    /// While the hold counter runs, nothing is written and the last emitted
    /// sample repeats.
    #[inline]
    pub fn advance(&mut self, sample: f32) -> FrameTick {
        if self.hold_counter < self.hold_factor {
            self.hold_counter += 1;
            return FrameTick {
                output: self.held,
                frame_complete: false,
            };
        }
        self.hold_counter = 0;

        let frame_length = self.input.len();
        self.input[self.index] = sample;
        self.held = self.output[self.index] / frame_length as f32;
        self.index += 1;

        let frame_complete = self.index == frame_length;
        if frame_complete {
            self.index = 0;
        }

        FrameTick {
            output: self.held,
            frame_complete,
        }
    }

    /// The input frame. Complete whenever `advance()` just reported so.
    #[inline]
    pub fn input(&self) -> &[f32] {
        &self.input
    }

    /// The output frame, scaled by the frame length.
    #[inline]
    pub fn output(&self) -> &[f32] {
        &self.output
    }

    /// Backing storage of the output frame, for swapping in a new one.
    #[inline]
    pub(crate) fn output_buffer_mut(&mut self) -> &mut Vec<f32> {
        &mut self.output
    }

    /// Seed the output frame for a 50/50 blend of `previous`'s playing
    /// output and its partially filled input.
    ///
    /// Positions `previous` never filled count as silence; positions past
    /// its length stay silent.
    pub fn seed_crossfade(&mut self, previous: &FrameBuffer) {
        let scale = self.frame_length() as f32;
        let previous_scale = previous.frame_length() as f32;

        for (i, out) in self.output.iter_mut().enumerate() {
            *out = match previous.output.get(i) {
                Some(&played) => {
                    let pending = if i < previous.index {
                        previous.input[i]
                    } else {
                        0.0
                    };
                    0.5 * (played / previous_scale + pending) * scale
                }
                None => 0.0,
            };
        }
    }
}
