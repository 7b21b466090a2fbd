//! Signal Buffers
//!
//! A signal buffer is a named array of real or complex samples plus the
//! sample rate it was produced at. Buffers are read-only to the exporters.

use num_complex::Complex;

use crate::error::{ExportError, Result};
use crate::pool::sample::Sample;

/// Label used for complex buffers in raw filenames and manifest comments
pub const COMPLEX_TAG: &str = "complex";

/// Label used for real buffers in manifest comments, whatever the precision
pub const REAL_KIND_LABEL: &str = "float";

/// Sample storage of a buffer
#[derive(Debug, Clone, PartialEq)]
pub enum BufferData<T: Sample> {
    /// One scalar per sample
    Real(Vec<T>),
    /// One complex value per sample
    Complex(Vec<Complex<T>>),
}

impl<T: Sample> BufferData<T> {
    /// Number of samples (a complex value counts as one sample)
    pub fn len(&self) -> usize {
        match self {
            BufferData::Real(data) => data.len(),
            BufferData::Complex(data) => data.len(),
        }
    }

    /// Check if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the samples are complex
    pub fn is_complex(&self) -> bool {
        matches!(self, BufferData::Complex(_))
    }

    /// WAV channel count: complex samples go out as interleaved left/right
    pub fn channels(&self) -> u16 {
        if self.is_complex() {
            2
        } else {
            1
        }
    }

    /// Tag used in raw dump filenames
    pub fn raw_tag(&self) -> &'static str {
        if self.is_complex() {
            COMPLEX_TAG
        } else {
            T::TYPE_TAG
        }
    }

    /// Kind label used in manifest comments
    pub fn kind_label(&self) -> &'static str {
        if self.is_complex() {
            COMPLEX_TAG
        } else {
            REAL_KIND_LABEL
        }
    }

    /// Flat view of the scalars, complex samples interleaved as (re, im)
    ///
    /// `Complex<T>` is `#[repr(C)]` with exactly two `T` fields. The cast
    /// checks that layout and fails with [`ExportError::ComplexLayout`] if
    /// it ever does not hold, instead of reading past the samples.
    pub fn as_scalars(&self) -> Result<&[T]> {
        match self {
            BufferData::Real(data) => Ok(data.as_slice()),
            BufferData::Complex(data) => {
                let scalars: &[T] = bytemuck::try_cast_slice(data).map_err(|e| {
                    ExportError::ComplexLayout {
                        reason: format!("{:?}", e),
                    }
                })?;

                if scalars.len() != data.len() * 2 {
                    return Err(ExportError::ComplexLayout {
                        reason: format!(
                            "{} complex samples viewed as {} scalars",
                            data.len(),
                            scalars.len()
                        ),
                    });
                }

                Ok(scalars)
            }
        }
    }

    /// Largest sample magnitude, zero for an empty buffer
    pub fn peak_magnitude(&self) -> T {
        match self {
            BufferData::Real(data) => data.iter().fold(T::zero(), |peak, &s| peak.max(s.abs())),
            BufferData::Complex(data) => data.iter().fold(T::zero(), |peak, s| peak.max(s.norm())),
        }
    }
}

/// A named buffer of samples owned by a pool
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBuffer<T: Sample> {
    name: String,
    data: BufferData<T>,
    sample_rate: u32,
}

impl<T: Sample> SignalBuffer<T> {
    /// Create a buffer of real samples
    pub fn real(name: impl Into<String>, samples: Vec<T>, sample_rate: u32) -> Self {
        SignalBuffer {
            name: name.into(),
            data: BufferData::Real(samples),
            sample_rate,
        }
    }

    /// Create a buffer of complex samples
    pub fn complex(name: impl Into<String>, samples: Vec<Complex<T>>, sample_rate: u32) -> Self {
        SignalBuffer {
            name: name.into(),
            data: BufferData::Complex(samples),
            sample_rate,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &BufferData<T> {
        &self.data
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_complex(&self) -> bool {
        self.data.is_complex()
    }
}
