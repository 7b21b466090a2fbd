//! WAV exporter
//!
//! Real buffers become mono float WAV files. Complex buffers become stereo
//! files with the real part on the left channel and the imaginary part on
//! the right.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::dump::WavSink;
use crate::error::{ExportError, Result};
use crate::export::filename::ExportTarget;
use crate::pool::{BufferData, Sample};

/// Dump one buffer to `<directory>/<name>.wav`
pub fn export_wav<T: Sample>(
    data: &BufferData<T>,
    sample_rate: u32,
    directory: &str,
    name: &str,
) -> Result<PathBuf> {
    write_wav_buffer(data, sample_rate, directory, name)
        .inspect_err(|e| error!(buffer = name, code = e.error_code(), "WAV export failed: {}", e))
}

fn write_wav_buffer<T: Sample>(
    data: &BufferData<T>,
    sample_rate: u32,
    directory: &str,
    name: &str,
) -> Result<PathBuf> {
    let path = PathBuf::from(ExportTarget::wav(directory, name).file_name()?);
    let channels = data.channels();

    // No file is created when the layout check fails.
    let scalars = data.as_scalars()?;

    let mut sink = WavSink::create(&path, channels, sample_rate)?;

    let requested = data.len() * channels as usize;
    let written = sink.write_floats(scalars);
    check_written(&path, written, requested)?;

    debug!(
        path = %sink.path().display(),
        channels,
        sample_rate,
        frames = data.len(),
        "WAV buffer written"
    );

    sink.finalize()?;
    Ok(path)
}

fn check_written(path: &Path, written: usize, requested: usize) -> Result<()> {
    if written != requested {
        return Err(ExportError::ShortWrite {
            path: path.to_path_buf(),
            written,
            requested,
        });
    }

    Ok(())
}
