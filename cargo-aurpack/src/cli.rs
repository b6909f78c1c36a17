use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::exec::resolve;

#[derive(Parser, Debug)]
#[clap(
    name = "cargo-aurpack",
    version,
    about = "Build and check AUR -bin packages for Rust binaries",
    long_about = None,
    bin_name = "cargo"
)]
pub enum CargoCli {
    #[clap(name = "aurpack")]
    Aurpack(AurpackCli),
}

#[derive(Parser, Debug, Clone)]
#[clap(version, about, long_about = None)]
pub struct AurpackCli {
    #[clap(subcommand)]
    pub command: Option<Command>,

    /// Path to Cargo.toml. Its directory is the project root.
    #[clap(long, default_value = "Cargo.toml", global = true)]
    pub manifest_path: PathBuf,

    /// AUR repository checkout, relative to the project root
    /// [default: contrib/aur]
    #[clap(long, global = true)]
    pub aur_dir: Option<PathBuf>,

    /// Clone URL of the AUR repository
    /// [default: ssh://aur@aur.archlinux.org/<name>-bin.git]
    #[clap(long, global = true)]
    pub remote: Option<String>,

    /// PKGBUILD pkgrel [default: 1]
    #[clap(long, global = true)]
    pub pkgrel: Option<u32>,

    /// How sha256sums gets filled in [default: updpkgsums]
    #[clap(long, global = true)]
    pub checksum: Option<ChecksumMode>,

    /// Stop at the first failing step instead of carrying on
    #[clap(long, global = true)]
    pub strict: bool,

    /// Configuration file path [default: <root>/.config/aurpack.toml]
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write a default .config/aurpack.toml for the project
    Init {
        /// Overwrite an existing configuration file
        #[clap(long)]
        force: bool,
    },

    /// Print the generated PKGBUILD to stdout
    Pkgbuild,
}

#[derive(Debug, Clone)]
pub struct Args {
    pub manifest_path: PathBuf,
    pub aur_dir: Option<PathBuf>,
    pub remote: Option<String>,
    pub pkgrel: Option<u32>,
    pub checksum: Option<ChecksumMode>,
    pub strict: bool,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            manifest_path: PathBuf::from("Cargo.toml"),
            aur_dir: None,
            remote: None,
            pkgrel: None,
            checksum: None,
            strict: false,
            config: None,
            verbose: false,
        }
    }
}

impl From<AurpackCli> for Args {
    fn from(cli: AurpackCli) -> Self {
        Args {
            manifest_path: cli.manifest_path,
            aur_dir: cli.aur_dir,
            remote: cli.remote,
            pkgrel: cli.pkgrel,
            checksum: cli.checksum,
            strict: cli.strict,
            config: cli.config,
            verbose: cli.verbose,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumMode {
    /// Run `updpkgsums` from pacman-contrib
    #[default]
    Updpkgsums,
    /// Hash the archive in-process
    Inline,
}

impl std::fmt::Display for ChecksumMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChecksumMode::Updpkgsums => write!(f, "updpkgsums"),
            ChecksumMode::Inline => write!(f, "inline"),
        }
    }
}

impl Args {
    /// Directory containing Cargo.toml
    pub fn project_root(&self) -> PathBuf {
        match self.manifest_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// AUR checkout, resolved against the project root
    pub fn aur_dir(&self) -> PathBuf {
        let dir = self
            .aur_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("contrib/aur"));
        resolve(&self.project_root(), &dir)
    }

    /// Clone URL, defaulting to the AUR `-bin` repository of `name`
    pub fn remote(&self, name: &str) -> String {
        self.remote
            .clone()
            .unwrap_or_else(|| format!("ssh://aur@aur.archlinux.org/{name}-bin.git"))
    }

    pub fn pkgrel(&self) -> u32 {
        self.pkgrel.unwrap_or(1)
    }

    pub fn checksum(&self) -> ChecksumMode {
        self.checksum.unwrap_or_default()
    }

    /// Configuration file, resolved against the project root
    pub fn config_path(&self) -> PathBuf {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(".config/aurpack.toml"));
        resolve(&self.project_root(), &path)
    }
}
