//! Render-time settings: glyph style, visibility, depth, exclusions, ordering.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Patterns excluded unless the caller opts out.
pub const DEFAULT_EXCLUDES: &[&str] = &[".git", "node_modules", ".DS_Store", "Thumbs.db"];

/// Default maximum depth rendered below the top level.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Connector glyph set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// Unicode box drawing (`├── `, `└── `, `│   `).
    #[default]
    Standard,
    /// `+-- `, `\-- `, `|   `.
    Ascii,
    /// `|-- `, `\-- `, `|   `.
    Simple,
}

/// Sibling ordering applied at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Case-insensitive name order.
    #[default]
    Name,
    /// Folders before files, then by name.
    Type,
    /// Folders first by name, then files by descending size.
    Size,
}

impl TreeStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            TreeStyle::Standard => "standard",
            TreeStyle::Ascii => "ascii",
            TreeStyle::Simple => "simple",
        }
    }
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Type => "type",
            SortBy::Size => "size",
        }
    }
}

/// Unknown names resolve to [`TreeStyle::Standard`].
impl FromStr for TreeStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "unicode" => TreeStyle::Standard,
            "ascii" => TreeStyle::Ascii,
            "simple" => TreeStyle::Simple,
            other => {
                tracing::warn!(style = other, "unknown tree style, using standard");
                TreeStyle::Standard
            }
        })
    }
}

/// Unknown names resolve to [`SortBy::Name`].
impl FromStr for SortBy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "name" => SortBy::Name,
            "type" => SortBy::Type,
            "size" => SortBy::Size,
            other => {
                tracing::warn!(sort = other, "unknown sort order, using name");
                SortBy::Name
            }
        })
    }
}

impl fmt::Display for TreeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings consumed by the renderer. Changing them never requires a rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSettings {
    /// Connector glyph set.
    pub style: TreeStyle,
    /// Whether file nodes are rendered (folders always are).
    pub show_files: bool,
    /// Deepest level rendered; 0 renders only top-level entries.
    pub max_depth: usize,
    /// Substring (or glob) patterns matched against node names.
    pub exclude_patterns: Vec<String>,
    /// Sibling ordering.
    pub sort_by: SortBy,
    /// Whether folder/file markers precede names.
    pub show_icons: bool,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_files: true,
            max_depth: DEFAULT_MAX_DEPTH,
            exclude_patterns: DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect(),
            sort_by: SortBy::default(),
            show_icons: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = TreeSettings::default();
        assert_eq!(s.style, TreeStyle::Standard);
        assert!(s.show_files);
        assert_eq!(s.max_depth, 10);
        assert_eq!(
            s.exclude_patterns,
            vec![".git", "node_modules", ".DS_Store", "Thumbs.db"]
        );
        assert_eq!(s.sort_by, SortBy::Name);
        assert!(s.show_icons);
    }

    #[test]
    fn unknown_names_fall_back_to_defaults() {
        assert_eq!("fancy".parse::<TreeStyle>(), Ok(TreeStyle::Standard));
        assert_eq!("".parse::<SortBy>(), Ok(SortBy::Name));
        assert_eq!("bogus".parse::<SortBy>(), Ok(SortBy::Name));
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("ASCII".parse::<TreeStyle>(), Ok(TreeStyle::Ascii));
        assert_eq!(" Simple ".parse::<TreeStyle>(), Ok(TreeStyle::Simple));
        assert_eq!("Size".parse::<SortBy>(), Ok(SortBy::Size));
        assert_eq!("type".parse::<SortBy>(), Ok(SortBy::Type));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for style in [TreeStyle::Standard, TreeStyle::Ascii, TreeStyle::Simple] {
            assert_eq!(style.to_string().parse::<TreeStyle>(), Ok(style));
        }
    }
}
