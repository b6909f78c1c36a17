//! # cargo-aurpack
//!
//! A cargo subcommand that packages a Rust binary for the Arch User
//! Repository as a `<name>-bin` package.
//!
//! ## Overview
//!
//! `cargo-aurpack` reads package metadata from `Cargo.toml`, makes sure the
//! AUR repository is checked out, builds and strips the release binary,
//! writes a `PKGBUILD`, archives the binary with its license, icon and
//! desktop entry, and finally runs `makepkg` to regenerate `.SRCINFO` and
//! check that the package builds.
//!
//! ## Usage
//!
//! ```bash
//! # Build everything into contrib/aur
//! cargo aurpack
//!
//! # Fill sha256sums without pacman-contrib installed
//! cargo aurpack --checksum inline
//!
//! # Only look at the PKGBUILD
//! cargo aurpack pkgbuild
//!
//! # Abort on the first failing tool
//! cargo aurpack --strict
//! ```
//!
//! ## Manifest
//!
//! Arch dependencies are read from `[package.metadata]`:
//!
//! ```toml
//! [package.metadata]
//! depends = ["mpv"]
//! optdepends = ["yt-dlp"]
//! ```
//!
//! The generated archive, `<name>-<version>-x86_64.tar.gz`, is what the
//! PKGBUILD expects to download from the GitHub release `v<version>`, so
//! upload it there afterwards.
//!
//! ## Configuration
//!
//! Configuration can be specified in `.config/aurpack.toml` in your project
//! directory or `~/.config/aurpack.toml` for user-wide settings.

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration file handling and default settings management
pub mod config;

/// Error types and error handling utilities
pub mod error;

/// External tool invocation
pub mod exec;

/// `cargo aurpack init`
pub mod init;

/// Package metadata read from Cargo.toml
pub mod manifest;

/// The packaging steps and their order
pub mod packer;

/// Archive creation, checksums and makepkg cleanup
pub mod packager;

/// PKGBUILD rendering
pub mod pkgbuild;
