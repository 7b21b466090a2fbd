//! Scalar precision for signal buffers
//!
//! The scalar width is a type parameter of every buffer and pool. `f32` and
//! `f64` are the two supported precisions; each carries the tag used in raw
//! dump filenames.

use std::fmt::{Debug, LowerExp};

use bytemuck::Pod;
use num_traits::Float;

/// A real scalar a signal buffer can hold
pub trait Sample: Float + Pod + LowerExp + Debug + Send + Sync + 'static {
    /// Tag used in raw filenames for real buffers of this precision
    const TYPE_TAG: &'static str;

    /// Convert to the 32-bit float stored in WAV files
    fn to_wav_sample(self) -> f32;
}

impl Sample for f32 {
    const TYPE_TAG: &'static str = "float";

    #[inline]
    fn to_wav_sample(self) -> f32 {
        self
    }
}

impl Sample for f64 {
    const TYPE_TAG: &'static str = "double";

    #[inline]
    fn to_wav_sample(self) -> f32 {
        self as f32
    }
}
