use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{Args, ChecksumMode};
use crate::error::AurPackError;
use crate::exec::resolve;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,

    #[serde(default)]
    pub assets: AssetsConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct DefaultConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aur_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkgrel: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<ChecksumMode>,

    #[serde(default)]
    pub strict: bool,
}

/// Files shipped next to the binary, relative to the project root
#[derive(Debug, Deserialize, Serialize)]
pub struct AssetsConfig {
    #[serde(default = "default_license")]
    pub license: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop: Option<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            license: default_license(),
            icon: None,
            desktop: None,
        }
    }
}

fn default_license() -> PathBuf {
    PathBuf::from("LICENSE")
}

impl AssetsConfig {
    pub fn license_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.license)
    }

    /// Icon, `assets/<name>.svg` unless configured
    pub fn icon_path(&self, root: &Path, name: &str) -> PathBuf {
        let icon = self
            .icon
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("assets/{name}.svg")));
        resolve(root, &icon)
    }

    /// Desktop entry, `contrib/<name>.desktop` unless configured
    pub fn desktop_path(&self, root: &Path, name: &str) -> PathBuf {
        let desktop = self
            .desktop
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("contrib/{name}.desktop")));
        resolve(root, &desktop)
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Load the project configuration, falling back to the user-wide one.
    /// An `explicit` path must exist.
    pub fn discover(project_path: &Path, explicit: bool) -> Result<Self> {
        if project_path.exists() {
            tracing::debug!("Using configuration {}", project_path.display());
            return Self::load(project_path);
        }

        if explicit {
            return Err(AurPackError::Config(format!(
                "{} does not exist",
                project_path.display()
            ))
            .into());
        }

        let user_path = Self::default_path();
        if user_path.exists() {
            tracing::debug!("Using configuration {}", user_path.display());
        }
        Self::load(&user_path)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("aurpack.toml"))
            .unwrap_or_else(|| PathBuf::from("~/.config/aurpack.toml"))
    }

    /// Merge configuration with command line arguments
    pub fn merge_with_args(&self, args: &mut Args) {
        if args.aur_dir.is_none() {
            args.aur_dir = self.default.aur_dir.clone();
        }

        if args.remote.is_none() {
            args.remote = self.default.remote.clone();
        }

        if args.pkgrel.is_none() {
            args.pkgrel = self.default.pkgrel;
        }

        if args.checksum.is_none() {
            args.checksum = self.default.checksum;
        }

        if !args.strict && self.default.strict {
            args.strict = true;
        }
    }

    /// Starting point written by `cargo aurpack init`
    pub fn template(name: &str) -> Self {
        Config {
            default: DefaultConfig {
                aur_dir: Some(PathBuf::from("contrib/aur")),
                remote: Some(format!("ssh://aur@aur.archlinux.org/{name}-bin.git")),
                pkgrel: Some(1),
                checksum: Some(ChecksumMode::Updpkgsums),
                strict: false,
            },
            assets: AssetsConfig {
                license: default_license(),
                icon: Some(PathBuf::from(format!("assets/{name}.svg"))),
                desktop: Some(PathBuf::from(format!("contrib/{name}.desktop"))),
            },
        }
    }
}
