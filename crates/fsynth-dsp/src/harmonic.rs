//! Harmonic stacking in the frequency domain.
//!
//! Every source bin `b` of a half-spectrum is re-emitted at its integer
//! multiples `b·h`, shaped to approximate a waveform family's harmonic
//! series:
//!
//! | family   | harmonics         | weight | phase offset        |
//! |----------|-------------------|--------|---------------------|
//! | Sine     | `h = 1`           | 1      | 0 (pass-through)    |
//! | Sawtooth | every `h`         | `1/h`  | −π/2 odd, +π/2 even |
//! | Square   | odd `h` only      | `1/h`  | −π/2                |
//!
//! The contribution of source bin `b` (magnitude `m`, phase `φ`) to target
//! `b·h` is `weight · m · e^{i(φ·h + offset)}`. Without the alternating
//! ±π/2 offset the stacked harmonics do not line up into the intended
//! shape.
//!
//! Contributions landing on the same target bin are summed. All stacking
//! reads the untouched input spectrum and accumulates into a zeroed
//! scratch spectrum that replaces the input in one copy at the end. The DC
//! bin is carried through unchanged for every family.

use crate::buffer::{try_filled, try_with_capacity};
use crate::Result;
use fsynth_analysis::Complex32;
use fsynth_core::Waveform;
use std::f32::consts::FRAC_PI_2;

/// One non-silent harmonic of the active family.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HarmonicTap {
    harmonic: usize,
    weight: f32,
    phase_offset: f32,
}

/// Weight and phase offset of harmonic `h` (1-based) for a family.
///
/// Returns `None` for harmonics the family leaves silent.
fn harmonic_tap(waveform: Waveform, h: usize) -> Option<HarmonicTap> {
    let odd = h % 2 == 1;
    let (weight, phase_offset) = match waveform {
        Waveform::Sine if h == 1 => (1.0, 0.0),
        Waveform::Sine => return None,
        Waveform::Square if !odd => return None,
        Waveform::Sawtooth | Waveform::Square => (
            1.0 / h as f32,
            if odd { -FRAC_PI_2 } else { FRAC_PI_2 },
        ),
    };
    Some(HarmonicTap {
        harmonic: h,
        weight,
        phase_offset,
    })
}

/// Redistributes each bin's energy onto its harmonic series.
#[derive(Debug, Clone)]
pub struct HarmonicSynthesizer {
    waveform: Waveform,
    harmonic_limit: usize,
    /// Silent harmonics are left out; ordered by ascending harmonic.
    taps: Vec<HarmonicTap>,
    scratch: Vec<Complex32>,
}

impl HarmonicSynthesizer {
    /// Allocate for the half-spectrum of `frame_length` samples.
    pub fn new(frame_length: usize, waveform: Waveform, harmonic_limit: usize) -> Result<Self> {
        let bins = frame_length / 2 + 1;
        // No source bin can reach past harmonic `bins - 1`, so the table never outgrows this.
        let taps = try_with_capacity(bins, frame_length)?;

        let mut synth = Self {
            waveform,
            harmonic_limit,
            taps,
            scratch: try_filled(bins, Complex32::new(0.0, 0.0), frame_length)?,
        };
        synth.rebuild_taps();
        Ok(synth)
    }

    /// Change family and limit. Takes effect on the next `synthesize()`.
    pub fn set_params(&mut self, waveform: Waveform, harmonic_limit: usize) {
        if waveform == self.waveform && harmonic_limit == self.harmonic_limit {
            return;
        }
        self.waveform = waveform;
        self.harmonic_limit = harmonic_limit;
        self.rebuild_taps();
    }

    #[inline]
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    #[inline]
    pub fn harmonic_limit(&self) -> usize {
        self.harmonic_limit
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.scratch.len()
    }

    /// Harmonics with non-zero weight under the current parameters.
    pub fn active_harmonics(&self) -> impl Iterator<Item = usize> + '_ {
        self.taps.iter().map(|tap| tap.harmonic)
    }

    fn rebuild_taps(&mut self) {
        let nyquist = self.scratch.len() - 1;
        let highest = self.harmonic_limit.min(nyquist.max(1));

        self.taps.clear();
        self.taps
            .extend((1..=highest).filter_map(|h| harmonic_tap(self.waveform, h)));
    }

    /// Replace `spectrum` with its harmonic-stacked counterpart.
    ///
    /// `spectrum` must have exactly [`bins()`](Self::bins) bins.
    pub fn synthesize(&mut self, spectrum: &mut [Complex32]) {
        debug_assert_eq!(spectrum.len(), self.scratch.len());
        let Some((&dc, bins)) = spectrum.split_first() else {
            return;
        };
        let nyquist = bins.len();

        self.scratch.fill(Complex32::new(0.0, 0.0));
        self.scratch[0] = dc;

        for (i, bin) in bins.iter().enumerate() {
            let source = i + 1;
            let (magnitude, phase) = bin.to_polar();
            if magnitude == 0.0 {
                continue;
            }

            for tap in &self.taps {
                let target = source * tap.harmonic;
                if target > nyquist {
                    break;
                }
                let angle = phase * tap.harmonic as f32 + tap.phase_offset;
                self.scratch[target] += Complex32::from_polar(tap.weight * magnitude, angle);
            }
        }

        spectrum.copy_from_slice(&self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn single_bin(bins: usize, source: usize, value: Complex32) -> Vec<Complex32> {
        let mut spectrum = vec![Complex32::new(0.0, 0.0); bins];
        spectrum[source] = value;
        spectrum
    }

    #[test]
    fn test_tap_table() {
        let saw = harmonic_tap(Waveform::Sawtooth, 3).unwrap();
        assert_abs_diff_eq!(saw.weight, 1.0 / 3.0);
        assert_abs_diff_eq!(saw.phase_offset, -FRAC_PI_2);

        let saw_even = harmonic_tap(Waveform::Sawtooth, 2).unwrap();
        assert_abs_diff_eq!(saw_even.phase_offset, FRAC_PI_2);

        assert!(harmonic_tap(Waveform::Square, 4).is_none());
        assert!(harmonic_tap(Waveform::Sine, 2).is_none());

        let sine = harmonic_tap(Waveform::Sine, 1).unwrap();
        assert_eq!((sine.weight, sine.phase_offset), (1.0, 0.0));
    }

    #[test]
    fn test_active_harmonics_respect_limit_and_nyquist() {
        let synth = HarmonicSynthesizer::new(16, Waveform::Square, 40).unwrap();
        assert_eq!(synth.active_harmonics().collect::<Vec<_>>(), vec![1, 3, 5, 7]);

        let synth = HarmonicSynthesizer::new(16, Waveform::Sawtooth, 3).unwrap();
        assert_eq!(synth.active_harmonics().collect::<Vec<_>>(), vec![1, 2, 3]);

        let synth = HarmonicSynthesizer::new(16, Waveform::Sine, 40).unwrap();
        assert_eq!(synth.active_harmonics().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_sine_passes_through() {
        let original: Vec<Complex32> = (0..9)
            .map(|i| Complex32::new(i as f32 - 3.0, (i * i) as f32 * 0.1 - 1.0))
            .collect();
        let mut spectrum = original.clone();

        let mut synth = HarmonicSynthesizer::new(16, Waveform::Sine, 12).unwrap();
        synth.synthesize(&mut spectrum);

        for (out, orig) in spectrum.iter().zip(&original) {
            assert_abs_diff_eq!(out.re, orig.re, epsilon = 1e-5);
            assert_abs_diff_eq!(out.im, orig.im, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sawtooth_energy_placement() {
        // 33 bins (frame length 64), source bin 5: harmonics at 5, 10, ..., 30.
        let bins = 33;
        let source = 5;
        let mut spectrum = single_bin(bins, source, Complex32::new(3.0, 4.0));

        let mut synth = HarmonicSynthesizer::new(64, Waveform::Sawtooth, 4).unwrap();
        synth.synthesize(&mut spectrum);

        for (bin, value) in spectrum.iter().enumerate().skip(1) {
            let h = bin / source;
            if bin % source == 0 && h <= 4 {
                assert_abs_diff_eq!(value.norm(), 5.0 / h as f32, epsilon = 1e-5);
            } else {
                assert_abs_diff_eq!(value.norm(), 0.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_sawtooth_stops_at_nyquist() {
        let bins = 17; // frame length 32, nyquist bin 16
        let mut spectrum = single_bin(bins, 6, Complex32::new(1.0, 0.0));

        let mut synth = HarmonicSynthesizer::new(32, Waveform::Sawtooth, 40).unwrap();
        synth.synthesize(&mut spectrum);

        assert_abs_diff_eq!(spectrum[6].norm(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(spectrum[12].norm(), 0.5, epsilon = 1e-6);
        let total: f32 = spectrum.iter().map(|c| c.norm()).sum();
        assert_abs_diff_eq!(total, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_square_suppresses_even_harmonics() {
        let bins = 65;
        let source = 3;
        let mut spectrum = single_bin(bins, source, Complex32::new(0.0, 2.0));

        let mut synth = HarmonicSynthesizer::new(128, Waveform::Square, 40).unwrap();
        synth.synthesize(&mut spectrum);

        for h in 1..=(bins - 1) / source {
            let magnitude = spectrum[source * h].norm();
            if h % 2 == 0 {
                assert_abs_diff_eq!(magnitude, 0.0);
            } else {
                assert_abs_diff_eq!(magnitude, 2.0 / h as f32, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_phase_offset_alternates() {
        // Source phase 0: harmonic h lands at angle offset(h) exactly.
        let bins = 9;
        let mut spectrum = single_bin(bins, 1, Complex32::new(1.0, 0.0));

        let mut synth = HarmonicSynthesizer::new(16, Waveform::Sawtooth, 4).unwrap();
        synth.synthesize(&mut spectrum);

        // h = 1: -π/2 → (0, -1)
        assert_abs_diff_eq!(spectrum[1].re, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(spectrum[1].im, -1.0, epsilon = 1e-6);
        // h = 2: +π/2 → (0, 1/2)
        assert_abs_diff_eq!(spectrum[2].re, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(spectrum[2].im, 0.5, epsilon = 1e-6);
        // h = 3: -π/2 → (0, -1/3)
        assert_abs_diff_eq!(spectrum[3].im, -1.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_phase_scales_with_harmonic() {
        // Source phase π/4: harmonic 2 lands at 2·π/4 + π/2 = π.
        let bins = 9;
        let value = Complex32::from_polar(2.0, std::f32::consts::FRAC_PI_4);
        let mut spectrum = single_bin(bins, 2, value);

        let mut synth = HarmonicSynthesizer::new(16, Waveform::Sawtooth, 2).unwrap();
        synth.synthesize(&mut spectrum);

        assert_abs_diff_eq!(spectrum[4].re, -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(spectrum[4].im, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_contributions_superpose() {
        // Bin 2's fundamental and bin 1's second harmonic both land on bin 2.
        let bins = 9;
        let mut spectrum = vec![Complex32::new(0.0, 0.0); bins];
        spectrum[1] = Complex32::new(1.0, 0.0);
        spectrum[2] = Complex32::new(1.0, 0.0);

        let mut synth = HarmonicSynthesizer::new(16, Waveform::Sawtooth, 2).unwrap();
        synth.synthesize(&mut spectrum);

        // From bin 2, h = 1: (0, -1). From bin 1, h = 2: (0, +0.5).
        assert_abs_diff_eq!(spectrum[2].re, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(spectrum[2].im, -0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_dc_carried_through() {
        for waveform in Waveform::all() {
            let mut spectrum = single_bin(5, 2, Complex32::new(1.0, 1.0));
            spectrum[0] = Complex32::new(42.0, 0.0);

            let mut synth = HarmonicSynthesizer::new(8, *waveform, 8).unwrap();
            synth.synthesize(&mut spectrum);
            assert_eq!(spectrum[0], Complex32::new(42.0, 0.0));
        }
    }

    #[test]
    fn test_does_not_feed_back() {
        let mut synth = HarmonicSynthesizer::new(32, Waveform::Sawtooth, 8).unwrap();
        let input = single_bin(17, 2, Complex32::new(1.0, 0.0));

        let mut first = input.clone();
        synth.synthesize(&mut first);
        let mut second = input.clone();
        synth.synthesize(&mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn test_set_params_rebuilds_table() {
        let mut synth = HarmonicSynthesizer::new(32, Waveform::Sine, 1).unwrap();
        synth.set_params(Waveform::Square, 6);
        assert_eq!(synth.waveform(), Waveform::Square);
        assert_eq!(synth.harmonic_limit(), 6);
        assert_eq!(synth.active_harmonics().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_single_bin_spectrum() {
        let mut synth = HarmonicSynthesizer::new(1, Waveform::Sawtooth, 4).unwrap();
        let mut spectrum = vec![Complex32::new(7.0, 0.0)];
        synth.synthesize(&mut spectrum);
        assert_eq!(spectrum[0], Complex32::new(7.0, 0.0));
    }
}
