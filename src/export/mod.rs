//! Pool Export Module
//!
//! Dumps every buffer of a pool in one of three formats:
//! - Script: `<pool>/<buffer>.m` per buffer plus a `<pool>.m` manifest
//! - Raw: `<pool>/<buffer>-<tag>.raw` per buffer
//! - WAV: `<pool>/<buffer>.wav` per buffer
//!
//! Every pool dump stops at the first buffer that fails. Files written for
//! earlier buffers are left on disk.

mod filename;
mod raw;
mod script;
mod wav;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Local;
use tracing::{error, info, warn};

use crate::config::{ExportConfig, ExportFormat};
use crate::error::{ExportError, Result};
use crate::pool::{Sample, SignalBuffer, SignalBufferPool};

pub use filename::{ExportTarget, FileKind};
pub use raw::export_raw;
pub use script::{export_script, write_manifest_entry, write_manifest_header, MANIFEST_TIME_FORMAT};
pub use wav::export_wav;

/// Writes whole pools to disk according to an [`ExportConfig`]
#[derive(Debug, Clone, Default)]
pub struct PoolExporter {
    config: ExportConfig,
}

impl PoolExporter {
    pub fn new(config: ExportConfig) -> Self {
        PoolExporter { config }
    }

    /// Directory the pool's buffers are written to: `<root>/<poolName>`
    pub fn pool_directory(&self, pool_name: &str) -> Result<String> {
        self.resolve(pool_name, "pool directory")
    }

    /// Path of the pool's script manifest: `<root>/<poolName>.m`
    pub fn manifest_path(&self, pool_name: &str) -> Result<String> {
        let file_name = ExportTarget::manifest(pool_name).file_name()?;
        self.resolve(&file_name, "manifest filename")
    }

    fn resolve(&self, relative: &str, what: &'static str) -> Result<String> {
        if self.config.output_root.is_empty() {
            filename::concat_path(&[relative], what)
        } else {
            let root = self.config.output_root.trim_end_matches('/');
            filename::concat_path(&[root, "/", relative], what)
        }
    }

    /// Dump the pool in one format
    pub fn dump<T: Sample>(&self, format: ExportFormat, pool: &SignalBufferPool<T>) -> Result<()> {
        match format {
            ExportFormat::Script => self.dump_script(pool),
            ExportFormat::Raw => self.dump_raw(pool),
            ExportFormat::Wav => self.dump_wav(pool),
        }
    }

    /// Dump the pool in every configured format, stopping at the first failure
    pub fn dump_all<T: Sample>(&self, pool: &SignalBufferPool<T>) -> Result<()> {
        for &format in &self.config.formats {
            self.dump(format, pool)?;
        }

        Ok(())
    }

    /// Write `<pool>/<buffer>.m` for every buffer and the `<pool>.m` manifest
    pub fn dump_script<T: Sample>(&self, pool: &SignalBufferPool<T>) -> Result<()> {
        let manifest = PathBuf::from(self.manifest_path(pool.name())?);
        let directory = self.prepare_directory(pool.name())?;

        let file = File::create(&manifest).map_err(|source| {
            let err = ExportError::Open {
                path: manifest.clone(),
                source,
            };
            error!(pool = pool.name(), "Cannot create main script: {}", err);
            err
        })?;
        let mut out = BufWriter::new(file);

        let manifest_write_error = |source: std::io::Error| {
            let err = ExportError::Write {
                path: manifest.clone(),
                source,
            };
            error!(pool = pool.name(), "{}", err);
            err
        };

        write_manifest_header(&mut out, pool.name(), &Local::now()).map_err(manifest_write_error)?;

        let exported = self.traverse(ExportFormat::Script, pool, |buffer| {
            export_script(buffer.data(), &directory, buffer.name())?;
            write_manifest_entry(&mut out, pool.name(), buffer).map_err(manifest_write_error)
        })?;

        out.flush().map_err(manifest_write_error)?;

        info!(
            pool = pool.name(),
            buffers = exported,
            manifest = %manifest.display(),
            "script pool dump complete"
        );
        Ok(())
    }

    /// Write `<pool>/<buffer>-<tag>.raw` for every buffer
    pub fn dump_raw<T: Sample>(&self, pool: &SignalBufferPool<T>) -> Result<()> {
        let directory = self.prepare_directory(pool.name())?;

        let exported = self.traverse(ExportFormat::Raw, pool, |buffer| {
            export_raw(buffer.data(), &directory, buffer.name()).map(|_| ())
        })?;

        info!(pool = pool.name(), buffers = exported, "raw pool dump complete");
        Ok(())
    }

    /// Write `<pool>/<buffer>.wav` for every buffer, each at its own sample rate
    pub fn dump_wav<T: Sample>(&self, pool: &SignalBufferPool<T>) -> Result<()> {
        let directory = self.prepare_directory(pool.name())?;

        let exported = self.traverse(ExportFormat::Wav, pool, |buffer| {
            export_wav(buffer.data(), buffer.sample_rate(), &directory, buffer.name()).map(|_| ())
        })?;

        info!(pool = pool.name(), buffers = exported, "WAV pool dump complete");
        Ok(())
    }

    fn prepare_directory(&self, pool_name: &str) -> Result<String> {
        let directory = self.pool_directory(pool_name)?;

        if self.config.create_directories {
            fs::create_dir_all(&directory).map_err(|source| ExportError::DirectoryCreate {
                path: PathBuf::from(&directory),
                source,
            })?;
        }

        Ok(directory)
    }

    /// Visit buffers in pool order, stopping at the first failure
    fn traverse<T, F>(&self, format: ExportFormat, pool: &SignalBufferPool<T>, mut export: F) -> Result<usize>
    where
        T: Sample,
        F: FnMut(&SignalBuffer<T>) -> Result<()>,
    {
        info!(pool = pool.name(), buffers = pool.len(), %format, "dumping pool");

        for (index, buffer) in pool.iter().enumerate() {
            if let Err(e) = export(buffer) {
                warn!(
                    pool = pool.name(),
                    buffer = buffer.name(),
                    exported = index,
                    remaining = pool.len() - index - 1,
                    %format,
                    "aborting pool dump"
                );
                return Err(e);
            }
        }

        Ok(pool.len())
    }
}
