//! Frame-based spectral resynthesis.
//!
//! Input is accumulated one sample per host tick into a fixed-size frame.
//! Each completed frame is transformed to the frequency domain, every bin is
//! re-emitted as a harmonic series shaped like a sine, sawtooth or square
//! wave, and the result is transformed back and played out while the next
//! frame fills. All buffers are allocated when the frame length is set.

mod error;
pub use error::{Error, Result};

mod buffer;

pub mod transform;
pub use transform::TransformBackend;

pub mod frame;
pub use frame::{FrameBuffer, FrameTick};

pub mod harmonic;
pub use harmonic::HarmonicSynthesizer;

pub mod detector;
pub use detector::{ChangeKind, ParameterChangeDetector};

mod channel;
pub use channel::{PreparedFrame, ResynthChannel};

mod engine;
pub use engine::ResynthEngine;
