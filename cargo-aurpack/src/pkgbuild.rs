use std::fs;
use std::path::Path;

use crate::error::{AurPackError, Result};
use crate::manifest::PackageManifest;

/// Value written to `sha256sums` until the checksum step replaces it
pub const CHECKSUM_PLACEHOLDER: &str = "we'll see";

/// Architecture of the packaged binary
pub const ARCH: &str = "x86_64";

/// Quote each entry and join with spaces, as a bash array body
fn bash_array(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the PKGBUILD for the `-bin` package of `manifest`
pub fn render(manifest: &PackageManifest, pkgrel: u32) -> String {
    let PackageManifest {
        name,
        version,
        description,
        author,
        license,
        repository,
        depends,
        optdepends,
    } = manifest;

    format!(
        r#"# Maintainer: {author}

pkgname={name}-bin
pkgver={version}
pkgrel={pkgrel}
pkgdesc="{description}"
url="{repository}"
license=("{license}")
arch=("{ARCH}")
provides=("{name}")
conflicts=("{name}")
depends=({depends})
optdepends=({optdepends})
source=("{repository}/releases/download/v$pkgver/{name}-$pkgver-{ARCH}.tar.gz")
sha256sums=("{CHECKSUM_PLACEHOLDER}")

package() {{
    install -dm755 "$pkgdir/usr/bin"
    install -dm755 "$pkgdir/usr/share/licenses/$pkgname"
    install -dm755 "$pkgdir/usr/share/applications"
    install -dm755 "$pkgdir/usr/share/pixmaps"

    install -Dm755 {name} -t "$pkgdir/usr/bin"
    install -Dm644 LICENSE "$pkgdir/usr/share/licenses/$pkgname/LICENSE"

    install -Dm644 {name}.desktop "$pkgdir/usr/share/applications/{name}.desktop"
    install -Dm644 {name}.svg "$pkgdir/usr/share/pixmaps/"
}}
"#,
        depends = bash_array(depends),
        optdepends = bash_array(optdepends),
    )
}

/// Replace the checksum placeholder in the PKGBUILD at `path` with `sha256`
pub fn fill_checksum(path: &Path, sha256: &str) -> Result<()> {
    let content = fs::read_to_string(path)?;
    let placeholder = format!("sha256sums=(\"{CHECKSUM_PLACEHOLDER}\")");

    if !content.contains(&placeholder) {
        return Err(AurPackError::PlaceholderMissing {
            path: path.display().to_string(),
        });
    }

    let filled = content.replacen(&placeholder, &format!("sha256sums=(\"{sha256}\")"), 1);
    fs::write(path, filled)?;

    tracing::debug!("Filled sha256sums in {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn manifest() -> PackageManifest {
        PackageManifest {
            name: "tori".to_string(),
            version: "0.1.0".to_string(),
            description: "The frictionless music player for the terminal".to_string(),
            author: "Leonardo Riether <riether.leonardo@gmail.com>".to_string(),
            license: "GPL-3.0-or-later".to_string(),
            repository: "https://github.com/LeoRiether/tori".to_string(),
            depends: vec!["gtk3".to_string()],
            optdepends: vec!["xdg-utils".to_string()],
        }
    }

    #[test]
    fn test_bash_array() {
        assert_eq!(bash_array(&[]), "");
        assert_eq!(
            bash_array(&["mpv".to_string(), "yt-dlp".to_string()]),
            "\"mpv\" \"yt-dlp\""
        );
    }

    #[test]
    fn test_render_header() {
        let content = render(&manifest(), 1);
        let header: Vec<&str> = content.lines().take(15).collect();

        assert_eq!(
            header,
            vec![
                "# Maintainer: Leonardo Riether <riether.leonardo@gmail.com>",
                "",
                "pkgname=tori-bin",
                "pkgver=0.1.0",
                "pkgrel=1",
                "pkgdesc=\"The frictionless music player for the terminal\"",
                "url=\"https://github.com/LeoRiether/tori\"",
                "license=(\"GPL-3.0-or-later\")",
                "arch=(\"x86_64\")",
                "provides=(\"tori\")",
                "conflicts=(\"tori\")",
                "depends=(\"gtk3\")",
                "optdepends=(\"xdg-utils\")",
                "source=(\"https://github.com/LeoRiether/tori/releases/download/v$pkgver/tori-$pkgver-x86_64.tar.gz\")",
                "sha256sums=(\"we'll see\")",
            ]
        );
    }

    #[test]
    fn test_render_package_function() {
        let content = render(&manifest(), 3);
        assert!(content.contains("pkgrel=3\n"));
        assert!(content.contains("\npackage() {\n"));
        assert!(content.contains("    install -Dm755 tori -t \"$pkgdir/usr/bin\"\n"));
        assert!(content.contains(
            "    install -Dm644 tori.desktop \"$pkgdir/usr/share/applications/tori.desktop\"\n"
        ));
        assert!(content.contains("    install -Dm644 tori.svg \"$pkgdir/usr/share/pixmaps/\"\n"));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn test_fill_checksum() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("PKGBUILD");
        fs::write(&path, render(&manifest(), 1)).unwrap();

        fill_checksum(&path, "abc123").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("sha256sums=(\"abc123\")"));
        assert!(!content.contains(CHECKSUM_PLACEHOLDER));
    }

    #[test]
    fn test_fill_checksum_without_placeholder() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("PKGBUILD");
        fs::write(&path, "sha256sums=(\"SKIP\")\n").unwrap();

        let err = fill_checksum(&path, "abc123").unwrap_err();
        assert!(matches!(err, AurPackError::PlaceholderMissing { .. }));
    }
}
