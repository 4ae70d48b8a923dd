//! Test helpers and fixtures for fourier-synth integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (normalization bounds, bypass)
//! - `DSP_EPSILON` (1e-4): One transform round trip on unit-scale signals
//! - `PERCEPTUAL_EPSILON` (0.001): Larger signals, relative spectral levels
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)

#![allow(dead_code)]

pub mod tolerances;

use fourier_synth::prelude::*;

/// Mono synth with the given frame length, waveform ordinal and harmonic limit.
pub fn test_synth(frame_length: usize, waveform: Waveform, harmonic_limit: usize) -> FourierSynth {
    FourierSynth::builder()
        .controls(ControlValues::new(
            frame_length as f32,
            0.0,
            waveform.ordinal() as f32,
            harmonic_limit as f32,
        ))
        .build()
        .expect("Failed to create test synth")
}

/// Feed `input` through a mono synth, returning one output per input sample.
pub fn run(synth: &mut FourierSynth, input: &[f32]) -> Vec<f32> {
    let mut output = vec![0.0; input.len()];
    synth
        .process_block(input, &mut output)
        .expect("Processing failed");
    output
}

/// `signal` followed by `padding` zeros.
pub fn padded(signal: &[f32], padding: usize) -> Vec<f32> {
    let mut samples = signal.to_vec();
    samples.resize(signal.len() + padding, 0.0);
    samples
}

/// One frame of a cosine completing exactly `bin` cycles over `frame_length` samples.
pub fn generate_bin_cosine(bin: usize, frame_length: usize, amplitude: f32) -> Vec<f32> {
    (0..frame_length)
        .map(|i| {
            let phase = 2.0 * std::f64::consts::PI * (bin * i) as f64 / frame_length as f64;
            amplitude * phase.cos() as f32
        })
        .collect()
}

/// Generate an integer staircase signal [start, start + step, ...] as f32.
pub fn generate_staircase(start: f32, step: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples).map(|i| start + step * i as f32).collect()
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / u32::MAX as f32) * 4.0 - 1.0
        })
        .collect()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Assert two signals match sample for sample within tolerance.
pub fn assert_signals_close(actual: &[f32], expected: &[f32], tolerance: f32) {
    assert_eq!(actual.len(), expected.len(), "Signal lengths differ");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "Sample {} differs: got {}, expected {} (tolerance {})",
            i,
            a,
            e,
            tolerance
        );
    }
}

/// Assert that a signal is approximately silent (all values near zero).
pub fn assert_silence(samples: &[f32], tolerance: f32) {
    let max = peak(samples);
    assert!(
        max <= tolerance,
        "Expected silence, but peak amplitude was {}",
        max
    );
}
