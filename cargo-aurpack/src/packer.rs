use anyhow::{Context, Result};
use git2::Repository;
use std::fs;
use std::path::PathBuf;

use crate::cli::{Args, ChecksumMode};
use crate::config::Config;
use crate::error::AurPackError;
use crate::exec::{Executor, SystemExecutor, ToolCommand};
use crate::manifest::PackageManifest;
use crate::packager::{self, ArchiveEntry};
use crate::pkgbuild;

const GREEN: &str = "\x1b[92m";
const RESET: &str = "\x1b[0m";

fn announce(message: &str) {
    println!(":: {message}");
}

fn highlight(text: &str) -> String {
    format!("{GREEN}{text}{RESET}")
}

pub struct Packer<E: Executor = SystemExecutor> {
    args: Args,
    config: Config,
    manifest: PackageManifest,
    executor: E,
}

impl Packer<SystemExecutor> {
    pub fn new(args: Args) -> Result<Self> {
        Self::with_executor(args, SystemExecutor)
    }
}

impl<E: Executor> Packer<E> {
    pub fn with_executor(mut args: Args, executor: E) -> Result<Self> {
        // Nothing may run before we know we are in a Rust project
        let manifest = PackageManifest::from_path(&args.manifest_path)?;

        let config = Config::discover(&args.config_path(), args.config.is_some())
            .context("Failed to load configuration")?;
        config.merge_with_args(&mut args);

        tracing::debug!(
            "Packaging {} {} into {}",
            manifest.name,
            manifest.version,
            args.aur_dir().display()
        );

        Ok(Self {
            args,
            config,
            manifest,
            executor,
        })
    }

    fn root(&self) -> PathBuf {
        self.args.project_root()
    }

    fn pkgbuild_path(&self) -> PathBuf {
        self.args.aur_dir().join("PKGBUILD")
    }

    /// Location of the generated archive
    pub fn archive_path(&self) -> PathBuf {
        self.args
            .aur_dir()
            .join(packager::archive_name(&self.manifest.name, &self.manifest.version))
    }

    fn binary_path(&self) -> PathBuf {
        self.root()
            .join("target")
            .join("release")
            .join(&self.manifest.name)
    }

    /// Run all steps in order. Failures are logged and skipped unless strict.
    pub fn run(&self) -> Result<()> {
        let steps: [(&str, fn(&Self) -> Result<()>); 5] = [
            ("clone_aur", Self::clone_aur),
            ("build_binary", Self::build_binary),
            ("make_pkgbuild", Self::make_pkgbuild),
            ("make_targz", Self::make_targz),
            ("makepkg", Self::makepkg),
        ];

        for (name, step) in steps {
            if let Err(e) = step(self) {
                if self.args.strict {
                    return Err(e.context(format!("{name} failed")));
                }
                tracing::warn!("{} failed: {:#}", name, e);
            }
        }

        announce(&highlight("Done"));
        Ok(())
    }

    /// Clone the AUR repository unless the checkout already exists
    pub fn clone_aur(&self) -> Result<()> {
        let aur_dir = self.args.aur_dir();

        if aur_dir.exists() {
            if Repository::open(&aur_dir).is_err() {
                tracing::warn!("{} exists but is not a git repository", aur_dir.display());
            } else {
                tracing::debug!("{} already cloned", aur_dir.display());
            }
            return Ok(());
        }

        announce("Cloning AUR package");
        let cmd = ToolCommand::new("git", self.root())
            .arg("clone")
            .arg(self.args.remote(&self.manifest.name))
            .arg(&aur_dir);
        self.invoke(&cmd)
    }

    /// `cargo build --release`, then strip the binary in place
    pub fn build_binary(&self) -> Result<()> {
        announce(&format!("Building {}", highlight(&self.manifest.name)));

        let build = ToolCommand::new("cargo", self.root())
            .arg("build")
            .arg("--release");
        self.invoke(&build)?;

        let strip = ToolCommand::new("strip", self.root()).arg(self.binary_path());
        self.invoke(&strip)
    }

    /// Write the PKGBUILD with a placeholder checksum
    pub fn make_pkgbuild(&self) -> Result<()> {
        announce(&format!("Generating {}", highlight("PKGBUILD")));

        let path = self.pkgbuild_path();
        fs::write(&path, self.render_pkgbuild())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn render_pkgbuild(&self) -> String {
        pkgbuild::render(&self.manifest, self.args.pkgrel())
    }

    /// Archive the binary and assets, then fill in the checksum
    pub fn make_targz(&self) -> Result<()> {
        let archive_path = self.archive_path();
        let filename = packager::archive_name(&self.manifest.name, &self.manifest.version);
        announce(&format!("Generating {}", highlight(&filename)));

        let root = self.root();
        let name = &self.manifest.name;
        let assets = &self.config.assets;
        let entries = [
            ArchiveEntry::new(assets.license_path(&root), "LICENSE"),
            ArchiveEntry::new(self.binary_path(), name.as_str()),
            ArchiveEntry::new(assets.icon_path(&root, name), format!("{name}.svg")),
            ArchiveEntry::new(assets.desktop_path(&root, name), format!("{name}.desktop")),
        ];
        // Missing files leave a partial archive, which still gets a checksum
        if let Err(e) = packager::create_tar_gz(&archive_path, &entries) {
            if self.args.strict {
                return Err(e);
            }
            tracing::warn!("Archive incomplete: {:#}", e);
        }

        match self.args.checksum() {
            ChecksumMode::Updpkgsums => {
                let cmd = ToolCommand::new("updpkgsums", self.args.aur_dir()).arg("PKGBUILD");
                self.invoke(&cmd)
            }
            ChecksumMode::Inline => {
                let sha256 = packager::sha256_file(&archive_path)?;
                pkgbuild::fill_checksum(&self.pkgbuild_path(), &sha256)?;
                Ok(())
            }
        }
    }

    /// Regenerate .SRCINFO and do a clean local makepkg
    pub fn makepkg(&self) -> Result<()> {
        let aur_dir = self.args.aur_dir();

        announce("makepkg [.SRCINFO]");
        let srcinfo = ToolCommand::new("makepkg", &aur_dir)
            .arg("--printsrcinfo")
            .stdout_to(".SRCINFO");
        self.invoke(&srcinfo)?;

        announce("makepkg [check]");
        let removed = packager::clean_build_artifacts(&aur_dir)
            .with_context(|| format!("Failed to clean {}", aur_dir.display()))?;
        for path in &removed {
            tracing::debug!("Removed {}", path.display());
        }

        self.invoke(&ToolCommand::new("makepkg", &aur_dir))
    }

    /// Run a tool. A failure is only an error in strict mode.
    fn invoke(&self, command: &ToolCommand) -> Result<()> {
        let reason = match self.executor.execute(command) {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => status.to_string(),
            Err(e) => e.to_string(),
        };

        if self.args.strict {
            return Err(AurPackError::ToolFailed {
                command: command.to_string(),
                reason,
            }
            .into());
        }

        tracing::warn!("`{}` failed: {}", command, reason);
        Ok(())
    }
}
