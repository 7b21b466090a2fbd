//! Export configuration
//!
//! Controls where pool dumps land and which formats `dump_all` produces.
//! The defaults reproduce the plain layout: manifest in the working
//! directory, per-buffer files under `<poolName>/`, directory not created.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};

/// Output format of a pool dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Per-buffer scripts plus a manifest sourcing them
    Script,
    /// Headerless native-endian scalars
    Raw,
    /// 32-bit float WAV
    Wav,
}

impl ExportFormat {
    /// All formats, in the order `dump_all` uses by default
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Script, ExportFormat::Raw, ExportFormat::Wav];
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Script => write!(f, "script"),
            ExportFormat::Raw => write!(f, "raw"),
            ExportFormat::Wav => write!(f, "wav"),
        }
    }
}

/// Configuration for [`crate::export::PoolExporter`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Prefix for the pool directory and the manifest (empty: working directory)
    pub output_root: String,
    /// Create the pool directory before writing
    pub create_directories: bool,
    /// Formats written by `dump_all`
    pub formats: Vec<ExportFormat>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            output_root: String::new(),
            create_directories: false,
            formats: ExportFormat::ALL.to_vec(),
        }
    }
}

impl ExportConfig {
    /// Create a config writing under the given root
    pub fn with_root(output_root: impl Into<String>) -> Self {
        ExportConfig {
            output_root: output_root.into(),
            ..Default::default()
        }
    }

    /// Create the pool directory before writing
    pub fn creating_directories(mut self) -> Self {
        self.create_directories = true;
        self
    }

    /// Restrict `dump_all` to the given formats
    pub fn with_formats(mut self, formats: &[ExportFormat]) -> Self {
        self.formats = formats.to_vec();
        self
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ExportError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }
}
