#![allow(dead_code)]

use pathtree::settings::TreeSettings;
use pathtree::tree::{build_forest, Forest, PathDescriptor};
use std::fs;
use tempfile::TempDir;

/// Default settings with icons turned off, so expected strings stay readable.
pub fn plain_settings() -> TreeSettings {
    TreeSettings {
        show_icons: false,
        ..TreeSettings::default()
    }
}

/// Build a forest from bare paths (zero size, epoch timestamps).
pub fn forest_of(paths: &[&str]) -> Forest {
    build_forest(paths.iter().map(|p| PathDescriptor::from_path(*p)))
}

/// Build a forest from `(path, size)` pairs.
pub fn forest_with_sizes(entries: &[(&str, u64)]) -> Forest {
    build_forest(entries.iter().map(|(p, size)| {
        PathDescriptor::new(*p, *size, std::time::SystemTime::UNIX_EPOCH)
    }))
}

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create files holding
/// `content`.
pub fn create_fixture_with(paths: &[&str], content: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, content).unwrap();
        }
    }
    tmp
}

pub fn create_fixture(paths: &[&str]) -> TempDir {
    create_fixture_with(paths, "")
}

/// Rendered lines with trailing newline removed, for line-by-line asserts.
pub fn lines_of(text: &str) -> Vec<&str> {
    text.lines().collect()
}
