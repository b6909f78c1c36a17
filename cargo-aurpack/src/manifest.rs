use cargo_manifest::{Manifest, MaybeInherited, WorkspacePackage};
use serde::Deserialize;
use std::path::Path;

use crate::error::{AurPackError, Result};

/// Package metadata needed to build an AUR `-bin` package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub license: String,
    pub repository: String,
    pub depends: Vec<String>,
    pub optdepends: Vec<String>,
}

/// `[package.metadata]` keys read by cargo-aurpack
#[derive(Debug, Default, Deserialize)]
struct AurMetadata {
    #[serde(default)]
    depends: Vec<String>,
    #[serde(default)]
    optdepends: Vec<String>,
}

impl PackageManifest {
    /// Read the manifest at `path`, resolving `*.workspace = true` fields
    /// against the enclosing workspace.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AurPackError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }

        let manifest = Manifest::from_path(path)?;
        let package = manifest
            .package
            .ok_or(AurPackError::MissingField("package"))?;

        let workspace = match manifest.workspace.and_then(|ws| ws.package) {
            Some(ws_package) => Some(ws_package),
            None => path
                .canonicalize()
                .ok()
                .and_then(|p| p.parent().and_then(Path::parent).map(Path::to_path_buf))
                .and_then(|dir| find_workspace_package(&dir)),
        };
        let ws = workspace.as_ref();

        let version = resolve(package.version, || ws.and_then(|w| w.version.clone()))
            .ok_or(AurPackError::MissingField("package.version"))?;
        let description = resolve(package.description, || {
            ws.and_then(|w| w.description.clone())
        })
        .ok_or(AurPackError::MissingField("package.description"))?;
        let author = resolve(package.authors, || ws.and_then(|w| w.authors.clone()))
            .and_then(|authors| authors.into_iter().next())
            .ok_or(AurPackError::MissingField("package.authors"))?;
        let license = resolve(package.license, || ws.and_then(|w| w.license.clone()))
            .ok_or(AurPackError::MissingField("package.license"))?;
        let repository = resolve(package.repository, || {
            ws.and_then(|w| w.repository.clone())
        })
        .ok_or(AurPackError::MissingField("package.repository"))?;

        let metadata: AurMetadata = match package.metadata {
            Some(value) => value
                .try_into()
                .map_err(|e: toml::de::Error| AurPackError::Metadata(e.to_string()))?,
            None => AurMetadata::default(),
        };

        Ok(Self {
            name: package.name,
            version,
            description,
            author,
            license,
            repository,
            depends: metadata.depends,
            optdepends: metadata.optdepends,
        })
    }
}

fn resolve<T>(
    field: Option<MaybeInherited<T>>,
    inherited: impl FnOnce() -> Option<T>,
) -> Option<T> {
    match field {
        Some(MaybeInherited::Local(value)) => Some(value),
        Some(MaybeInherited::Inherited { .. }) => inherited(),
        None => None,
    }
}

/// Find `[workspace.package]` by looking up parent directories
fn find_workspace_package(start: &Path) -> Option<WorkspacePackage> {
    for dir in start.ancestors() {
        let manifest_path = dir.join("Cargo.toml");
        if !manifest_path.exists() {
            continue;
        }

        if let Ok(manifest) = Manifest::from_path(&manifest_path) {
            if let Some(workspace) = manifest.workspace {
                return workspace.package;
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_package_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        fs::write(
            &path,
            r#"[package]
name = "tori"
version = "0.1.0"
edition = "2021"
description = "The frictionless music player for the terminal"
authors = ["Leonardo Riether <riether.leonardo@gmail.com>", "Someone Else"]
license = "GPL-3.0-or-later"
repository = "https://github.com/LeoRiether/tori"

[package.metadata]
depends = ["mpv", "pipewire"]
optdepends = ["yt-dlp", "xdg-utils"]
"#,
        )
        .unwrap();

        let manifest = PackageManifest::from_path(&path).unwrap();
        assert_eq!(manifest.name, "tori");
        assert_eq!(manifest.version, "0.1.0");
        assert_eq!(manifest.author, "Leonardo Riether <riether.leonardo@gmail.com>");
        assert_eq!(manifest.license, "GPL-3.0-or-later");
        assert_eq!(manifest.repository, "https://github.com/LeoRiether/tori");
        assert_eq!(manifest.depends, vec!["mpv", "pipewire"]);
        assert_eq!(manifest.optdepends, vec!["yt-dlp", "xdg-utils"]);
    }

    #[test]
    fn test_missing_metadata_defaults_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        fs::write(
            &path,
            r#"[package]
name = "tool"
version = "1.0.0"
description = "A tool"
authors = ["Dev"]
license = "MIT"
repository = "https://github.com/dev/tool"
"#,
        )
        .unwrap();

        let manifest = PackageManifest::from_path(&path).unwrap();
        assert!(manifest.depends.is_empty());
        assert!(manifest.optdepends.is_empty());
    }

    #[test]
    fn test_missing_license_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        fs::write(
            &path,
            r#"[package]
name = "tool"
version = "1.0.0"
description = "A tool"
authors = ["Dev"]
repository = "https://github.com/dev/tool"
"#,
        )
        .unwrap();

        let err = PackageManifest::from_path(&path).unwrap_err();
        assert!(matches!(err, AurPackError::MissingField("package.license")));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempdir().unwrap();
        let err = PackageManifest::from_path(&dir.path().join("Cargo.toml")).unwrap_err();
        assert!(matches!(err, AurPackError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_inherited_fields_resolve_from_workspace() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            r#"[workspace]
members = ["player"]
resolver = "2"

[workspace.package]
version = "2.3.4"
authors = ["Workspace Author"]
description = "Shared description"
license = "MIT"
repository = "https://github.com/org/player"
"#,
        )
        .unwrap();

        fs::create_dir(dir.path().join("player")).unwrap();
        let member = dir.path().join("player").join("Cargo.toml");
        fs::write(
            &member,
            r#"[package]
name = "player"
version.workspace = true
authors.workspace = true
description.workspace = true
license.workspace = true
repository.workspace = true

[package.metadata]
depends = ["alsa-lib"]
"#,
        )
        .unwrap();

        let manifest = PackageManifest::from_path(&member).unwrap();
        assert_eq!(manifest.version, "2.3.4");
        assert_eq!(manifest.author, "Workspace Author");
        assert_eq!(manifest.description, "Shared description");
        assert_eq!(manifest.license, "MIT");
        assert_eq!(manifest.repository, "https://github.com/org/player");
        assert_eq!(manifest.depends, vec!["alsa-lib"]);
    }
}
