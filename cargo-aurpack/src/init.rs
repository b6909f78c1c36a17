use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::cli::Args;
use crate::config::Config;
use crate::error::AurPackError;
use crate::manifest::PackageManifest;

/// Writes a starting `.config/aurpack.toml` for the project
pub struct Initializer {
    force: bool,
}

impl Initializer {
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    pub fn run(&self, args: &Args) -> Result<PathBuf> {
        let manifest = PackageManifest::from_path(&args.manifest_path)?;
        let path = args.config_path();

        if path.exists() && !self.force {
            return Err(AurPackError::Config(format!(
                "{} already exists, use --force to overwrite",
                path.display()
            ))
            .into());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(&Config::template(&manifest.name))
            .map_err(|e| AurPackError::Config(e.to_string()))?;
        fs::write(&path, content)?;

        tracing::info!("Wrote {}", path.display());
        Ok(path)
    }
}
