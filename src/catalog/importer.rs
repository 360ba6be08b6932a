//! Bundle entry import
//!
//! Rebuilds one bundle entry per accepted source image. The first filesystem
//! failure stops the run; entries written before it are kept as they are.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{ConfigError, ImportConfig};

use super::descriptor::{Descriptor, DESCRIPTOR_FILE};
use super::source::{scan_source, SkippedEntry, SourceImage};

/// Import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// Naming options are unusable
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    /// The asset catalog directory has to exist before importing
    #[error("Target directory {} does not exist", .0.display())]
    TargetMissing(PathBuf),

    #[error("Target {} is not a directory", .0.display())]
    TargetNotDirectory(PathBuf),

    /// A filesystem operation failed mid-run
    #[error("failed to {op} {}", .path.display())]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize descriptor for {}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ImportError {
    pub(crate) fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        ImportError::Filesystem {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Outcome of a completed import run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Identifiers of the rebuilt entries, in processing order
    pub imported: Vec<String>,
    pub skipped: Vec<SkippedEntry>,
}

impl ImportSummary {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Import every accepted image from `config.source_dir` into
/// `config.target_dir`
pub fn import(config: &ImportConfig) -> Result<ImportSummary, ImportError> {
    config.validate()?;

    let target = &config.target_dir;
    if !target.exists() {
        return Err(ImportError::TargetMissing(target.clone()));
    }
    if !target.is_dir() {
        return Err(ImportError::TargetNotDirectory(target.clone()));
    }

    log::info!("Scanning {}...", config.source_dir.display());
    let scan = scan_source(config)?;

    let mut summary = ImportSummary {
        imported: Vec::with_capacity(scan.accepted.len()),
        skipped: scan.skipped,
    };

    for image in &scan.accepted {
        log::info!("Processing {}...", image.identifier);
        import_one(config, image)?;
        summary.imported.push(image.identifier.clone());
    }

    log::info!("Done importing assets.");
    Ok(summary)
}

/// Rebuild the bundle entry for a single image
fn import_one(config: &ImportConfig, image: &SourceImage) -> Result<(), ImportError> {
    let entry = config.entry_path(&image.identifier);

    remove_entry(&entry)?;
    fs::create_dir_all(&entry).map_err(|e| ImportError::io("create", &entry, e))?;

    let payload = entry.join(&config.payload_filename);
    copy_payload(&image.path, &payload).map_err(|e| ImportError::io("copy", &image.path, e))?;
    log::debug!("Copied {} -> {}", image.path.display(), payload.display());

    let descriptor_path = entry.join(DESCRIPTOR_FILE);
    let json = Descriptor::for_payload(&config.payload_filename, &config.density_tags)
        .to_json()
        .map_err(|source| ImportError::Serialization {
            path: descriptor_path.clone(),
            source,
        })?;
    fs::write(&descriptor_path, json).map_err(|e| ImportError::io("write", &descriptor_path, e))?;

    Ok(())
}

/// Delete whatever currently sits at an entry path
fn remove_entry(entry: &Path) -> Result<(), ImportError> {
    let meta = match fs::symlink_metadata(entry) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ImportError::io("inspect", entry, e)),
    };

    log::debug!("Removing existing {}", entry.display());
    let result = if meta.is_dir() {
        fs::remove_dir_all(entry)
    } else {
        fs::remove_file(entry)
    };
    result.map_err(|e| ImportError::io("remove", entry, e))
}

/// Copy file contents and keep the source modification time
fn copy_payload(src: &Path, dst: &Path) -> io::Result<()> {
    let mut reader = File::open(src)?;
    let mut writer = File::create(dst)?;
    io::copy(&mut reader, &mut writer)?;

    match reader.metadata().and_then(|m| m.modified()) {
        Ok(modified) => writer.set_modified(modified)?,
        Err(e) => log::warn!("Could not read modification time of {}: {}", src.display(), e),
    }
    Ok(())
}
