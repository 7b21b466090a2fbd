//! Single-array dump primitives
//!
//! Writers for one real or complex array to a script matrix literal or to a
//! headerless raw file, and the WAV sink used by the WAV exporter.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use num_complex::Complex;
use tracing::debug;

use crate::error::{ExportError, Result};
use crate::pool::Sample;

/// Bits per sample of the float WAV container
pub const WAV_BITS_PER_SAMPLE: u16 = 32;

// ============================================================================
// Script dumps
// ============================================================================

/// Write a real array as `label = [ ... ];`, one value per line
pub fn dump_real_to_script<T: Sample>(data: &[T], path: &Path, label: &str) -> Result<()> {
    write_script(path, label, data, |out, value| writeln!(out, "  {:e}", value))
}

/// Write a complex array as `label = [ ... ];` using `complex(re, im)` entries
pub fn dump_complex_to_script<T: Sample>(
    data: &[Complex<T>],
    path: &Path,
    label: &str,
) -> Result<()> {
    write_script(path, label, data, |out, value| {
        writeln!(out, "  complex({:e}, {:e})", value.re, value.im)
    })
}

fn write_script<E, F>(path: &Path, label: &str, items: &[E], write_item: F) -> Result<()>
where
    F: FnMut(&mut BufWriter<File>, &E) -> io::Result<()>,
{
    let file = File::create(path).map_err(|source| ExportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    write_matrix(&mut out, label, items, write_item)
        .and_then(|_| out.flush())
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}

fn write_matrix<W, E, F>(out: &mut W, label: &str, items: &[E], mut write_item: F) -> io::Result<()>
where
    W: Write,
    F: FnMut(&mut W, &E) -> io::Result<()>,
{
    writeln!(out, "{} = [", label)?;
    for item in items {
        write_item(out, item)?;
    }
    writeln!(out, "];")
}

// ============================================================================
// Raw dumps
// ============================================================================

/// Write a real array as native-endian scalars, no header
pub fn dump_real_to_raw<T: Sample>(data: &[T], path: &Path) -> Result<()> {
    write_raw(bytemuck::cast_slice(data), path)
}

/// Write a complex array as interleaved native-endian (re, im) scalars
pub fn dump_complex_to_raw<T: Sample>(data: &[Complex<T>], path: &Path) -> Result<()> {
    write_raw(bytemuck::cast_slice(data), path)
}

fn write_raw(bytes: &[u8], path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|source| ExportError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    file.write_all(bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// WAV sink
// ============================================================================

/// Float WAV file open for writing
///
/// Dropping the sink without calling [`WavSink::finalize`] still closes the
/// file and patches the header, so every exit path releases it.
pub struct WavSink {
    writer: WavWriter<BufWriter<File>>,
    path: PathBuf,
}

impl WavSink {
    /// Open a 32-bit float WAV file
    pub fn create(path: &Path, channels: u16, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(ExportError::SinkOpen {
                path: path.to_path_buf(),
                reason: "sample rate must be non-zero".to_string(),
            });
        }

        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: WAV_BITS_PER_SAMPLE,
            sample_format: SampleFormat::Float,
        };

        let writer = WavWriter::create(path, spec).map_err(|e| ExportError::SinkOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(WavSink {
            writer,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write interleaved scalars, returning how many were written
    ///
    /// Stops at the first codec error; the caller compares the count with
    /// what it asked for.
    pub fn write_floats<T: Sample>(&mut self, samples: &[T]) -> usize {
        for (written, &sample) in samples.iter().enumerate() {
            if let Err(e) = self.writer.write_sample(sample.to_wav_sample()) {
                debug!(path = %self.path.display(), written, "WAV write stopped: {}", e);
                return written;
            }
        }

        samples.len()
    }

    /// Flush and close the file
    pub fn finalize(self) -> Result<()> {
        let path = self.path;
        self.writer.finalize().map_err(|e| ExportError::SinkClose {
            path,
            reason: e.to_string(),
        })
    }
}
