//! Live spectrum display state.
//!
//! The audio thread publishes each completed frame's normalized trace via
//! `ArcSwap`; a renderer on any other thread reads the latest one lock-free.

use arc_swap::ArcSwap;
use core::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared state between one resynthesis channel and its display.
pub struct SpectrumDisplay {
    trace: ArcSwap<Vec<f32>>,
    frames: AtomicU64,
}

impl SpectrumDisplay {
    /// Create with an all-zero trace of `bins` values.
    pub fn new(bins: usize) -> Self {
        Self {
            trace: ArcSwap::from_pointee(vec![0.0; bins]),
            frames: AtomicU64::new(0),
        }
    }

    /// Publish a completed frame's trace.
    ///
    /// Allocates one snapshot per call, which happens once per frame.
    pub fn publish(&self, trace: &[f32]) {
        self.trace.store(Arc::new(trace.to_vec()));
        self.frames.fetch_add(1, Ordering::Release);
    }

    /// Replace the trace with `bins` zeros without counting a frame.
    ///
    /// Called when the frame length changes so readers never see a trace
    /// sized for the old bin count.
    pub fn reset(&self, bins: usize) {
        self.trace.store(Arc::new(vec![0.0; bins]));
    }

    /// Latest published trace.
    pub fn latest(&self) -> Arc<Vec<f32>> {
        self.trace.load_full()
    }

    /// Frames published so far.
    pub fn frames_published(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }
}

impl Default for SpectrumDisplay {
    fn default() -> Self {
        Self::new(0)
    }
}
