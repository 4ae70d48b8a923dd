//! Live display publishing tests
//!
//! Run with:
//! ```bash
//! cargo test -p fourier-synth --test display_tests --features "live"
//! ```

#![cfg(feature = "live")]

#[path = "helpers/mod.rs"]
mod helpers;

use fourier_synth::prelude::*;
use helpers::tolerances::*;
use helpers::{generate_bin_cosine, run};

fn display_synth(frame_length: usize, channels: usize) -> FourierSynth {
    FourierSynth::builder()
        .channels(channels)
        .controls(ControlValues::new(frame_length as f32, 0.0, 0.0, 1.0))
        .display(true)
        .build()
        .unwrap()
}

#[test]
fn test_display_disabled_by_default() {
    let synth = FourierSynth::builder().build().unwrap();
    assert!(synth.display(0).is_none());
}

#[test]
fn test_display_publishes_each_frame() {
    let mut synth = display_synth(16, 1);
    let display = synth.display(0).unwrap();
    assert!(display.is_live());
    assert_eq!(display.latest_trace().len(), 9);

    let frame = generate_bin_cosine(3, 16, 1.0);
    run(&mut synth, &frame);
    run(&mut synth, &frame);

    assert_eq!(display.frames_published(), 2);
    let trace = display.latest_trace();
    assert_eq!(trace.as_slice(), synth.magnitudes(0).unwrap());
    assert!((trace[3] - 1.0).abs() < PERCEPTUAL_EPSILON);
}

#[test]
fn test_display_read_from_another_thread() {
    let mut synth = display_synth(8, 2);
    let display = synth.display(1).unwrap();

    let mut out = [0.0; 2];
    for _ in 0..8 {
        synth.process(&[0.0, 1.0], &mut out).unwrap();
    }

    let reader = std::thread::spawn(move || (display.frames_published(), display.latest_trace()));
    let (frames, trace) = reader.join().unwrap();
    assert_eq!(frames, 1);
    assert!((trace[0] - 1.0).abs() < FLOAT_EPSILON);
}

#[test]
fn test_display_resized_on_frame_length_change() {
    let mut synth = display_synth(16, 1);
    let display = synth.display(0).unwrap();
    run(&mut synth, &[1.0; 16]);

    synth.controls().set_frame_length(4.0);
    run(&mut synth, &[0.0]);

    assert_eq!(display.latest_trace().len(), 3);
    assert_eq!(display.frames_published(), 1);
}
