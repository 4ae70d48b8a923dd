//! Display handle for convenient API access

#[cfg(feature = "live")]
use crate::live::SpectrumDisplay;
use crate::magnitude::{compute_magnitudes, normalize};
use rustfft::num_complex::Complex32;
#[cfg(feature = "live")]
use std::sync::Arc;

/// Handle for reading spectrum traces.
///
/// Offline, it turns a spectrum into a display trace. With the `live`
/// feature and a display attached, `latest_trace()` returns what the audio
/// thread last published.
#[derive(Default, Clone)]
pub struct DisplayHandle {
    #[cfg(feature = "live")]
    live: Option<Arc<SpectrumDisplay>>,
}

impl DisplayHandle {
    /// Create an offline handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle reading from a live display
    #[cfg(feature = "live")]
    pub fn with_live(live: Arc<SpectrumDisplay>) -> Self {
        Self { live: Some(live) }
    }

    /// Whether a live display is attached.
    pub fn is_live(&self) -> bool {
        #[cfg(feature = "live")]
        {
            self.live.is_some()
        }
        #[cfg(not(feature = "live"))]
        {
            false
        }
    }

    /// Latest published trace, or an empty one without a live display.
    #[cfg(feature = "live")]
    pub fn latest_trace(&self) -> Arc<Vec<f32>> {
        match &self.live {
            Some(display) => display.latest(),
            None => Arc::new(Vec::new()),
        }
    }

    /// Frames the live display has seen, 0 without one.
    #[cfg(feature = "live")]
    pub fn frames_published(&self) -> u64 {
        self.live
            .as_ref()
            .map_or(0, |display| display.frames_published())
    }

    /// Normalized display trace of a spectrum.
    pub fn trace_of(&self, spectrum: &[Complex32]) -> Vec<f32> {
        let mut trace = compute_magnitudes(spectrum);
        normalize(&mut trace);
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_handle() {
        let handle = DisplayHandle::new();
        assert!(!handle.is_live());

        let trace = handle.trace_of(&[Complex32::new(0.0, 0.0), Complex32::new(2.0, 0.0)]);
        assert_eq!(trace, vec![0.0, 1.0]);
    }

    #[cfg(feature = "live")]
    #[test]
    fn test_live_handle() {
        let display = Arc::new(SpectrumDisplay::new(2));
        let handle = DisplayHandle::with_live(Arc::clone(&display));
        assert!(handle.is_live());

        display.publish(&[0.25, 1.0]);
        assert_eq!(*handle.latest_trace(), vec![0.25, 1.0]);
        assert_eq!(handle.frames_published(), 1);

        assert!(DisplayHandle::new().latest_trace().is_empty());
    }
}
