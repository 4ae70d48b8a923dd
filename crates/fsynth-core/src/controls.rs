//! Lock-free control cells shared between the host and the audio thread.

use crate::ControlValues;
use atomic_float::AtomicF32;
use core::sync::atomic::{AtomicBool, Ordering};

/// Cache-line aligned atomic control value.
#[derive(Debug)]
#[repr(align(64))]
pub struct ControlCell {
    value: AtomicF32,
}

impl ControlCell {
    pub fn new(value: f32) -> Self {
        Self {
            value: AtomicF32::new(value),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.value.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.value.store(value, Ordering::Release);
    }
}

impl Default for ControlCell {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Every host control of one engine, writable from any thread.
///
/// The audio thread takes a [`snapshot`](SharedControls::snapshot) once per
/// tick; writers never block it.
#[derive(Debug)]
pub struct SharedControls {
    frame_length: ControlCell,
    hold_factor: ControlCell,
    waveform: ControlCell,
    harmonic_limit: ControlCell,
    bypass: AtomicBool,
}

impl SharedControls {
    pub fn new(values: ControlValues) -> Self {
        Self {
            frame_length: ControlCell::new(values.frame_length),
            hold_factor: ControlCell::new(values.hold_factor),
            waveform: ControlCell::new(values.waveform),
            harmonic_limit: ControlCell::new(values.harmonic_limit),
            bypass: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn snapshot(&self) -> ControlValues {
        ControlValues {
            frame_length: self.frame_length.get(),
            hold_factor: self.hold_factor.get(),
            waveform: self.waveform.get(),
            harmonic_limit: self.harmonic_limit.get(),
        }
    }

    pub fn store(&self, values: &ControlValues) {
        self.frame_length.set(values.frame_length);
        self.hold_factor.set(values.hold_factor);
        self.waveform.set(values.waveform);
        self.harmonic_limit.set(values.harmonic_limit);
    }

    pub fn set_frame_length(&self, value: f32) {
        self.frame_length.set(value);
    }

    pub fn set_hold_factor(&self, value: f32) {
        self.hold_factor.set(value);
    }

    pub fn set_waveform(&self, value: f32) {
        self.waveform.set(value);
    }

    pub fn set_harmonic_limit(&self, value: f32) {
        self.harmonic_limit.set(value);
    }

    /// When set, the engine keeps ticking but the host should route the dry input.
    pub fn set_bypass(&self, bypass: bool) {
        self.bypass.store(bypass, Ordering::Release);
    }

    #[inline]
    pub fn is_bypassed(&self) -> bool {
        self.bypass.load(Ordering::Acquire)
    }
}

impl Default for SharedControls {
    fn default() -> Self {
        Self::new(ControlValues::default())
    }
}
