//! Descriptor sources: everything that turns the outside world into a flat,
//! fully materialised list of [`PathDescriptor`]s before a build.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

use crate::tree::PathDescriptor;

/// Abstraction over descriptor collection so it can be swapped or mocked.
pub trait DescriptorSource {
    fn descriptors(&self) -> Result<Vec<PathDescriptor>>;
}

/// Walks a directory and reports every regular file beneath it.
pub struct WalkdirSource {
    root: PathBuf,
    include_root_name: bool,
}

impl WalkdirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_root_name: true,
        }
    }

    /// Whether descriptor paths start with the root folder's own name, as a
    /// folder upload would report them.
    pub fn include_root_name(mut self, include: bool) -> Self {
        self.include_root_name = include;
        self
    }

    fn root_name(&self) -> Option<String> {
        let resolved = self.root.canonicalize().ok()?;
        resolved
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
    }
}

impl DescriptorSource for WalkdirSource {
    fn descriptors(&self) -> Result<Vec<PathDescriptor>> {
        let meta = std::fs::metadata(&self.root)
            .with_context(|| format!("{}: failed to read", self.root.display()))?;
        anyhow::ensure!(meta.is_dir(), "{}: Not a directory", self.root.display());

        let root_name = if self.include_root_name {
            self.root_name()
        } else {
            None
        };

        let mut out = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| p.display().to_string());
                    tracing::warn!(path = ?path, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| entry.path());
            let mut relative_path = slash_path(relative);
            if let Some(name) = &root_name {
                relative_path = format!("{name}/{relative_path}");
            }

            let (size_bytes, modified_at) = match entry.metadata() {
                Ok(m) => (m.len(), m.modified().unwrap_or(SystemTime::UNIX_EPOCH)),
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), error = %e, "missing metadata");
                    (0, SystemTime::UNIX_EPOCH)
                }
            };
            out.push(PathDescriptor::new(relative_path, size_bytes, modified_at));
        }

        tracing::debug!(root = %self.root.display(), files = out.len(), "walk complete");
        Ok(out)
    }
}

/// Join path components with `/` regardless of platform.
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Reads a manifest: one descriptor per line as `path[\tsize[\tmtime_secs]]`.
pub struct ManifestSource {
    text: String,
}

impl ManifestSource {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .context("failed to read manifest")?;
        Ok(Self { text })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("{}: failed to open manifest", path.display()))?;
        Ok(Self { text })
    }
}

impl DescriptorSource for ManifestSource {
    fn descriptors(&self) -> Result<Vec<PathDescriptor>> {
        Ok(self.text.lines().filter_map(parse_manifest_line).collect())
    }
}

/// Parse one manifest line. Blank lines yield `None`; unparsable numbers
/// fall back to zero.
pub fn parse_manifest_line(line: &str) -> Option<PathDescriptor> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields = line.split('\t');
    let path = fields.next()?.trim();
    if path.is_empty() {
        return None;
    }
    let size_bytes = fields
        .next()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let modified_at = fields
        .next()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .and_then(|secs| SystemTime::UNIX_EPOCH.checked_add(Duration::from_secs(secs)))
        .unwrap_or(SystemTime::UNIX_EPOCH);
    let path = path.replace('\\', "/");
    let path = path.strip_prefix("./").unwrap_or(&path).to_string();
    Some(PathDescriptor::new(path, size_bytes, modified_at))
}
