use globset::{Glob, GlobSet, GlobSetBuilder};
use std::cmp::Ordering;

use super::{Node, NodeKind};
use crate::settings::{SortBy, TreeSettings};

/// Compiled exclusion rules for node names.
///
/// Plain patterns match as substrings. Patterns containing glob
/// metacharacters also match as globs against the whole name. Names
/// starting with `.` are always excluded.
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    substrings: Vec<String>,
    globs: GlobSet,
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

impl ExcludeSet {
    /// Compile a pattern list. Empty patterns are ignored and invalid globs
    /// fall back to substring matching.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut substrings = Vec::new();
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() {
                continue;
            }
            substrings.push(pattern.to_string());
            if is_glob(pattern) {
                match Glob::new(pattern) {
                    Ok(g) => {
                        builder.add(g);
                    }
                    Err(e) => {
                        tracing::warn!(pattern, error = %e, "invalid glob, matching as substring only");
                    }
                }
            }
        }
        let globs = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to build exclude globs");
            GlobSet::empty()
        });
        Self { substrings, globs }
    }

    pub fn from_settings(settings: &TreeSettings) -> Self {
        Self::new(&settings.exclude_patterns)
    }

    /// Whether a node with this name is hidden from the rendered tree.
    pub fn is_excluded(&self, name: &str) -> bool {
        name.starts_with('.')
            || self.substrings.iter().any(|p| name.contains(p.as_str()))
            || self.globs.is_match(name)
    }
}

/// Apply exclusion and the file-visibility flag to one sibling list.
pub(crate) fn filter_nodes<'a>(
    nodes: &'a [Node],
    excludes: &ExcludeSet,
    show_files: bool,
) -> Vec<&'a Node> {
    nodes
        .iter()
        .filter(|n| show_files || n.kind == NodeKind::Folder)
        .filter(|n| !excludes.is_excluded(&n.name))
        .collect()
}

/// Order a sibling list in place.
pub(crate) fn sort_nodes(nodes: &mut [&Node], sort_by: SortBy) {
    nodes.sort_by(|a, b| compare(a, b, sort_by));
}

fn compare(a: &Node, b: &Node, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Name => name_cmp(&a.name, &b.name),
        SortBy::Type => folders_first(a, b).then_with(|| name_cmp(&a.name, &b.name)),
        SortBy::Size => folders_first(a, b)
            .then_with(|| match (a.kind, b.kind) {
                (NodeKind::File, NodeKind::File) => {
                    b.size_bytes.unwrap_or(0).cmp(&a.size_bytes.unwrap_or(0))
                }
                _ => Ordering::Equal,
            })
            .then_with(|| name_cmp(&a.name, &b.name)),
    }
}

fn folders_first(a: &Node, b: &Node) -> Ordering {
    match (a.kind, b.kind) {
        (NodeKind::Folder, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Folder) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Case-insensitive alphabetical, lowercase before uppercase on ties.
pub(crate) fn name_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> Node {
        Node {
            name: name.to_string(),
            kind: NodeKind::File,
            path: name.to_string(),
            children: Vec::new(),
            size_bytes: Some(size),
            modified_at: None,
        }
    }

    fn folder(name: &str) -> Node {
        Node {
            name: name.to_string(),
            kind: NodeKind::Folder,
            path: name.to_string(),
            children: Vec::new(),
            size_bytes: None,
            modified_at: None,
        }
    }

    fn sorted(nodes: &[Node], sort_by: SortBy) -> Vec<&str> {
        let mut refs: Vec<&Node> = nodes.iter().collect();
        sort_nodes(&mut refs, sort_by);
        refs.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let nodes = [file("Banana.txt", 0), file("apple.txt", 0), file("Cherry.txt", 0)];
        assert_eq!(
            sorted(&nodes, SortBy::Name),
            vec!["apple.txt", "Banana.txt", "Cherry.txt"]
        );
    }

    #[test]
    fn name_sort_puts_lowercase_first_on_ties() {
        let nodes = [file("README", 0), file("readme", 0)];
        assert_eq!(sorted(&nodes, SortBy::Name), vec!["readme", "README"]);
    }

    #[test]
    fn name_sort_interleaves_kinds() {
        let nodes = [folder("src"), file("README.md", 0), folder("docs")];
        assert_eq!(sorted(&nodes, SortBy::Name), vec!["docs", "README.md", "src"]);
    }

    #[test]
    fn type_sort_puts_folders_first() {
        let nodes = [file("a.txt", 0), folder("z"), file("b.txt", 0), folder("m")];
        assert_eq!(sorted(&nodes, SortBy::Type), vec!["m", "z", "a.txt", "b.txt"]);
    }

    #[test]
    fn size_sort_orders_files_descending_after_folders() {
        let nodes = [
            file("small", 1),
            folder("lib"),
            file("big", 500),
            file("mid-b", 20),
            file("mid-a", 20),
            folder("bin"),
        ];
        assert_eq!(
            sorted(&nodes, SortBy::Size),
            vec!["bin", "lib", "big", "mid-a", "mid-b", "small"]
        );
    }

    #[test]
    fn dot_names_are_always_excluded() {
        let set = ExcludeSet::new::<&str>(&[]);
        assert!(set.is_excluded(".hidden"));
        assert!(!set.is_excluded("visible"));
    }

    #[test]
    fn substring_patterns_match_anywhere_in_name() {
        let set = ExcludeSet::new(&["node_modules", "tmp"]);
        assert!(set.is_excluded("node_modules"));
        assert!(set.is_excluded("my_tmp_dir"));
        assert!(!set.is_excluded("src"));
    }

    #[test]
    fn glob_patterns_match_whole_name() {
        let set = ExcludeSet::new(&["*.log"]);
        assert!(set.is_excluded("debug.log"));
        assert!(!set.is_excluded("main.rs"));
    }

    #[test]
    fn empty_patterns_do_not_exclude_everything() {
        let set = ExcludeSet::new(&[""]);
        assert!(!set.is_excluded("main.rs"));
    }

    #[test]
    fn pattern_whitespace_is_significant() {
        let set = ExcludeSet::new(&[" copy"]);
        assert!(set.is_excluded("notes copy.txt"));
        assert!(!set.is_excluded("copy.txt"));
    }

    #[test]
    fn filter_drops_files_when_hidden() {
        let nodes = [folder("src"), file("a.txt", 0), folder(".git")];
        let excludes = ExcludeSet::new(&[".git"]);
        let kept: Vec<&str> = filter_nodes(&nodes, &excludes, false)
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(kept, vec!["src"]);
    }
}
