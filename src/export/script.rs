//! Script exporter
//!
//! Each buffer becomes a script assigning a matrix literal named after the
//! buffer. A pool dump also writes a manifest, `<poolName>.m`, that sources
//! every per-buffer script in pool order.

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, TimeZone};
use tracing::{debug, error};

use crate::dump::{dump_complex_to_script, dump_real_to_script};
use crate::error::Result;
use crate::export::filename::ExportTarget;
use crate::pool::{BufferData, Sample, SignalBuffer};

/// Timestamp layout of the manifest header, e.g. `Mon Mar  7 09:05:01 2016`
pub const MANIFEST_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Dump one buffer to `<directory>/<name>.m`
pub fn export_script<T: Sample>(data: &BufferData<T>, directory: &str, name: &str) -> Result<PathBuf> {
    write_script_buffer(data, directory, name)
        .inspect_err(|e| error!(buffer = name, code = e.error_code(), "script export failed: {}", e))
}

fn write_script_buffer<T: Sample>(data: &BufferData<T>, directory: &str, name: &str) -> Result<PathBuf> {
    let path = PathBuf::from(ExportTarget::script(directory, name).file_name()?);

    match data {
        BufferData::Real(samples) => dump_real_to_script(samples, &path, name)?,
        BufferData::Complex(samples) => dump_complex_to_script(samples, &path, name)?,
    }

    debug!(path = %path.display(), samples = data.len(), "script buffer written");
    Ok(path)
}

/// Write the comment block opening a manifest
pub fn write_manifest_header<W, Tz>(out: &mut W, pool_name: &str, now: &DateTime<Tz>) -> io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    writeln!(out, "% Autogenerated MATLAB script for sigbuf pool `{}'", pool_name)?;
    writeln!(out, "% File generated on {}", now.format(MANIFEST_TIME_FORMAT))
}

/// Write the manifest lines describing and sourcing one exported buffer
pub fn write_manifest_entry<W: Write, T: Sample>(
    out: &mut W,
    pool_name: &str,
    buffer: &SignalBuffer<T>,
) -> io::Result<()> {
    writeln!(
        out,
        "% {}: {} buffer, {} elements",
        buffer.name(),
        buffer.data().kind_label(),
        buffer.len()
    )?;
    writeln!(out, "source('{}/{}.m');", pool_name, buffer.name())?;
    writeln!(out)
}
