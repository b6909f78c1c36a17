use cargo_aurpack::manifest::PackageManifest;
use cargo_aurpack::packager::archive_name;
use cargo_aurpack::pkgbuild::{render, CHECKSUM_PLACEHOLDER};

fn manifest(depends: &[&str], optdepends: &[&str]) -> PackageManifest {
    PackageManifest {
        name: "tori".to_string(),
        version: "0.1.0".to_string(),
        description: "Terminal music player with \"quotes\"".to_string(),
        author: "Leonardo Riether <riether.leonardo@gmail.com>".to_string(),
        license: "GPL-3.0-or-later".to_string(),
        repository: "https://github.com/LeoRiether/tori".to_string(),
        depends: depends.iter().map(|s| s.to_string()).collect(),
        optdepends: optdepends.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_single_dependencies() {
    let content = render(&manifest(&["gtk3"], &["xdg-utils"]), 1);

    assert!(content.contains("\ndepends=(\"gtk3\")\n"));
    assert!(content.contains("\noptdepends=(\"xdg-utils\")\n"));
}

#[test]
fn test_dependencies_keep_order() {
    let content = render(&manifest(&["mpv", "pipewire", "alsa-lib"], &[]), 1);

    assert!(content.contains("\ndepends=(\"mpv\" \"pipewire\" \"alsa-lib\")\n"));
    assert!(content.contains("\noptdepends=()\n"));
}

#[test]
fn test_fields_are_substituted_verbatim() {
    let m = manifest(&[], &[]);
    let content = render(&m, 1);

    assert!(content.starts_with("# Maintainer: Leonardo Riether <riether.leonardo@gmail.com>\n"));
    assert!(content.contains("\npkgver=0.1.0\n"));
    assert!(content.contains("\npkgdesc=\"Terminal music player with \"quotes\"\"\n"));
    assert!(content.contains("\nurl=\"https://github.com/LeoRiether/tori\"\n"));
    assert!(content.contains("\nlicense=(\"GPL-3.0-or-later\")\n"));
    assert!(content.contains(&format!("\nsha256sums=(\"{CHECKSUM_PLACEHOLDER}\")\n")));
}

#[test]
fn test_source_matches_archive_name() {
    let m = manifest(&[], &[]);
    let content = render(&m, 1);

    let source = content
        .lines()
        .find(|line| line.starts_with("source="))
        .unwrap();
    let expected = archive_name(&m.name, "$pkgver");
    assert!(source.ends_with(&format!("/releases/download/v$pkgver/{expected}\")")));
    assert_eq!(archive_name("tori", "1.2.0"), "tori-1.2.0-x86_64.tar.gz");
}
