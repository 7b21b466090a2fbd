//! sigbuf-export - Signal Buffer Pool Export Helpers
//!
//! Test-support crate that writes the named signal buffers of a pool to
//! disk so intermediate DSP results can be inspected after a test run.
//!
//! # Formats
//!
//! - Script: one matrix-literal script per buffer plus a manifest sourcing
//!   them all, loadable in MATLAB/Octave
//! - Raw: headerless native-endian scalars, one file per buffer
//! - WAV: 32-bit float WAV, mono for real buffers, stereo (re/im) for
//!   complex buffers
//!
//! Buffers hold `f32` or `f64` scalars, selected through the [`Sample`]
//! type parameter.

pub mod config;
pub mod dump;
pub mod error;
pub mod export;
pub mod logging;
pub mod pool;

pub use config::{ExportConfig, ExportFormat};
pub use error::{ExportError, Result};
pub use export::{export_raw, export_script, export_wav, ExportTarget, PoolExporter};
pub use logging::init_test_logging;
pub use pool::{BufferData, Sample, SignalBuffer, SignalBufferPool};

pub use num_complex::Complex;
