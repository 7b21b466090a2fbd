//! Signal Buffer Pool Module
//!
//! Data model consumed by the exporters:
//! - Scalar precision (`f32` or `f64`)
//! - Named real/complex buffers
//! - Ordered pools of buffers

pub mod buffer;
pub mod collection;
pub mod sample;

pub use buffer::{BufferData, SignalBuffer, COMPLEX_TAG, REAL_KIND_LABEL};
pub use collection::SignalBufferPool;
pub use sample::Sample;
