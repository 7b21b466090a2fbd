//! Raw exporter
//!
//! One headerless file per buffer, named after the scalar precision or
//! `complex`.

use std::path::PathBuf;

use tracing::{debug, error};

use crate::dump::{dump_complex_to_raw, dump_real_to_raw};
use crate::error::Result;
use crate::export::filename::ExportTarget;
use crate::pool::{BufferData, Sample};

/// Dump one buffer to `<directory>/<name>-<tag>.raw`
pub fn export_raw<T: Sample>(data: &BufferData<T>, directory: &str, name: &str) -> Result<PathBuf> {
    write_raw_buffer(data, directory, name)
        .inspect_err(|e| error!(buffer = name, code = e.error_code(), "raw export failed: {}", e))
}

fn write_raw_buffer<T: Sample>(data: &BufferData<T>, directory: &str, name: &str) -> Result<PathBuf> {
    let path = PathBuf::from(ExportTarget::raw(directory, name, data.raw_tag()).file_name()?);

    match data {
        BufferData::Real(samples) => dump_real_to_raw(samples, &path)?,
        BufferData::Complex(samples) => dump_complex_to_raw(samples, &path)?,
    }

    debug!(path = %path.display(), samples = data.len(), "raw buffer written");
    Ok(path)
}
