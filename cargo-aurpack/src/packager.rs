use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use sha2::{Digest, Sha256};

use crate::error::AurPackError;
use crate::pkgbuild::ARCH;

/// File name of the release archive, as referenced by the PKGBUILD `source`
pub fn archive_name(name: &str, version: &str) -> String {
    format!("{name}-{version}-{ARCH}.tar.gz")
}

/// A file to put in the archive under a fixed entry name
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub source: PathBuf,
    pub name: String,
}

impl ArchiveEntry {
    pub fn new(source: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
        }
    }
}

/// Create a tar.gz archive at `archive_path` from `entries`.
///
/// Entries whose source is missing are skipped and reported as an error once
/// the archive with the remaining files has been written.
pub fn create_tar_gz(archive_path: &Path, entries: &[ArchiveEntry]) -> Result<PathBuf> {
    let tar_file = File::create(archive_path)?;
    let gz_encoder = flate2::write::GzEncoder::new(tar_file, flate2::Compression::default());
    let mut tar_builder = tar::Builder::new(gz_encoder);

    let mut missing = Vec::new();
    for entry in entries {
        if !entry.source.is_file() {
            missing.push(entry.source.display().to_string());
            continue;
        }
        let mut file = File::open(&entry.source)?;
        tar_builder.append_file(&entry.name, &mut file)?;
    }

    tar_builder.into_inner()?.finish()?;

    if !missing.is_empty() {
        return Err(AurPackError::Package(format!(
            "{} not found, left out of {}",
            missing.join(", "),
            archive_path.display()
        ))
        .into());
    }

    tracing::info!("Created archive: {}", archive_path.display());
    Ok(archive_path.to_path_buf())
}

/// SHA256 of a file, hex encoded
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Remove what a previous makepkg run left behind: `src/`, `pkg/` and `*.zst`
pub fn clean_build_artifacts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for sub in ["src", "pkg"] {
        let path = dir.join(sub);
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
            removed.push(path);
        }
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_zst = path.extension().and_then(|ext| ext.to_str()) == Some("zst");

        if is_zst && path.is_file() {
            fs::remove_file(&path)?;
            removed.push(path);
        }
    }

    tracing::debug!("Removed {} build artifacts from {}", removed.len(), dir.display());
    Ok(removed)
}
