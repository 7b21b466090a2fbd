//! Destination filenames
//!
//! | Format   | Pattern                          |
//! |----------|----------------------------------|
//! | Script   | `<directory>/<name>.m`           |
//! | Raw      | `<directory>/<name>-<tag>.raw`   |
//! | WAV      | `<directory>/<name>.wav`         |
//! | Manifest | `<poolName>.m`                   |
//!
//! Names are plain string concatenations with `/` as separator. Characters
//! that are illegal on the target filesystem are not checked.

use crate::error::{ExportError, Result};

/// Kind of file a target names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind<'a> {
    Script,
    Raw { tag: &'a str },
    Wav,
    Manifest,
}

/// Directory, base name and kind of one destination file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportTarget<'a> {
    pub directory: Option<&'a str>,
    pub name: &'a str,
    pub kind: FileKind<'a>,
}

impl<'a> ExportTarget<'a> {
    pub fn script(directory: &'a str, name: &'a str) -> Self {
        ExportTarget {
            directory: Some(directory),
            name,
            kind: FileKind::Script,
        }
    }

    pub fn raw(directory: &'a str, name: &'a str, tag: &'a str) -> Self {
        ExportTarget {
            directory: Some(directory),
            name,
            kind: FileKind::Raw { tag },
        }
    }

    pub fn wav(directory: &'a str, name: &'a str) -> Self {
        ExportTarget {
            directory: Some(directory),
            name,
            kind: FileKind::Wav,
        }
    }

    /// Manifest of a pool, relative to the working directory
    pub fn manifest(pool_name: &'a str) -> Self {
        ExportTarget {
            directory: None,
            name: pool_name,
            kind: FileKind::Manifest,
        }
    }

    /// Build the filename
    pub fn file_name(&self) -> Result<String> {
        let mut parts: Vec<&str> = Vec::with_capacity(6);

        if let Some(directory) = self.directory {
            parts.push(directory);
            parts.push("/");
        }
        parts.push(self.name);

        match self.kind {
            FileKind::Script | FileKind::Manifest => parts.push(".m"),
            FileKind::Raw { tag } => parts.extend(["-", tag, ".raw"]),
            FileKind::Wav => parts.push(".wav"),
        }

        concat_path(&parts, "filename")
    }
}

/// Join `parts` into one string, reporting allocation failure instead of aborting
pub(crate) fn concat_path(parts: &[&str], what: &'static str) -> Result<String> {
    let len: usize = parts.iter().map(|p| p.len()).sum();

    let mut path = String::new();
    path.try_reserve_exact(len)
        .map_err(|source| ExportError::Allocation { what, source })?;

    for part in parts {
        path.push_str(part);
    }

    Ok(path)
}
