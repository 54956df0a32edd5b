//! Text rendering of a forest using box-drawing or ASCII connectors.

use std::fmt;

use crate::settings::{TreeSettings, TreeStyle};
use crate::tree::order::{filter_nodes, sort_nodes};
use crate::tree::{ExcludeSet, Forest, Node, NodeKind};

/// Connector and indentation glyphs for one style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub branch: &'static str,
    pub last: &'static str,
    pub continuation: &'static str,
    pub blank: &'static str,
}

const STANDARD: Glyphs = Glyphs {
    branch: "\u{251c}\u{2500}\u{2500} ", // ├──
    last: "\u{2514}\u{2500}\u{2500} ",   // └──
    continuation: "\u{2502}   ",         // │
    blank: "    ",
};

const ASCII: Glyphs = Glyphs {
    branch: "+-- ",
    last: "\\-- ",
    continuation: "|   ",
    blank: "    ",
};

const SIMPLE: Glyphs = Glyphs {
    branch: "|-- ",
    last: "\\-- ",
    continuation: "|   ",
    blank: "    ",
};

impl Glyphs {
    pub fn for_style(style: TreeStyle) -> &'static Glyphs {
        match style {
            TreeStyle::Standard => &STANDARD,
            TreeStyle::Ascii => &ASCII,
            TreeStyle::Simple => &SIMPLE,
        }
    }
}

pub const FOLDER_ICON: &str = "\u{1f4c1}"; // 📁
pub const FILE_ICON: &str = "\u{1f4c4}"; // 📄

/// Icon for a file name, keyed on its lowercase extension.
pub fn file_icon(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return FILE_ICON;
    };
    match ext.to_lowercase().as_str() {
        "js" => "\u{1f7e8}",                  // 🟨
        "jsx" => "\u{269b}\u{fe0f}",          // ⚛️
        "ts" => "\u{1f7e6}",                  // 🟦
        "tsx" => "\u{1f537}",                 // 🔷
        "html" => "\u{1f310}",                // 🌐
        "css" => "\u{1f3a8}",                 // 🎨
        "scss" => "\u{1f485}",                // 💅
        "json" => "\u{1f9fe}",                // 🧾
        "md" => "\u{1f4dd}",                  // 📝
        "txt" => FILE_ICON,
        "pdf" => "\u{1f4d5}",                 // 📕
        "png" => "\u{1f5bc}\u{fe0f}",         // 🖼️
        "jpg" | "jpeg" => "\u{1f4f8}",        // 📸
        "gif" => "\u{1f39e}\u{fe0f}",         // 🎞️
        "svg" => "\u{1f9e9}",                 // 🧩
        "zip" | "rar" => "\u{1f5dc}\u{fe0f}", // 🗜️
        "mp3" => "\u{1f3b5}",                 // 🎵
        "wav" => "\u{1f50a}",                 // 🔊
        "mp4" => "\u{1f3ac}",                 // 🎬
        "mov" => "\u{1f3a5}",                 // 🎥
        "exe" => "\u{1f4bb}",                 // 💻
        "py" => "\u{1f40d}",                  // 🐍
        "java" => "\u{2615}",                 // ☕
        "c" | "cpp" => "\u{1f4d8}",           // 📘
        "rb" => "\u{1f48e}",                  // 💎
        _ => FILE_ICON,
    }
}

/// One rendered line, kept in parts so front ends can style each piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// Indentation inherited from ancestors.
    pub prefix: String,
    /// Branch or last-sibling connector.
    pub connector: &'static str,
    /// Icon plus trailing space, or empty when icons are off.
    pub marker: String,
    pub name: String,
    pub kind: NodeKind,
    /// 0 for top-level nodes.
    pub depth: usize,
    pub is_last: bool,
}

impl fmt::Display for TreeLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.prefix, self.connector, self.marker, self.name)
    }
}

/// Render a forest to text, one newline-terminated line per visible node.
pub fn render(forest: &Forest, settings: &TreeSettings) -> String {
    lines_to_text(&render_lines(forest, settings))
}

/// Join rendered lines into the exact text `render` produces.
pub fn lines_to_text(lines: &[TreeLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

/// Render a forest to structured lines in display order.
pub fn render_lines(forest: &Forest, settings: &TreeSettings) -> Vec<TreeLine> {
    let walk = Walk {
        settings,
        excludes: ExcludeSet::from_settings(settings),
        glyphs: Glyphs::for_style(settings.style),
    };
    let mut lines = Vec::new();
    walk.level(forest.roots(), 0, "", &mut lines);
    lines
}

struct Walk<'s> {
    settings: &'s TreeSettings,
    excludes: ExcludeSet,
    glyphs: &'static Glyphs,
}

impl Walk<'_> {
    fn level(&self, nodes: &[Node], depth: usize, prefix: &str, out: &mut Vec<TreeLine>) {
        if depth > self.settings.max_depth {
            return;
        }

        let mut visible = filter_nodes(nodes, &self.excludes, self.settings.show_files);
        sort_nodes(&mut visible, self.settings.sort_by);

        let count = visible.len();
        for (i, node) in visible.into_iter().enumerate() {
            let is_last = i + 1 == count;
            out.push(TreeLine {
                prefix: prefix.to_string(),
                connector: if is_last {
                    self.glyphs.last
                } else {
                    self.glyphs.branch
                },
                marker: self.marker(node),
                name: node.name.clone(),
                kind: node.kind,
                depth,
                is_last,
            });

            if node.is_folder() && !node.children.is_empty() {
                let indent = if is_last {
                    self.glyphs.blank
                } else {
                    self.glyphs.continuation
                };
                let child_prefix = format!("{prefix}{indent}");
                self.level(&node.children, depth + 1, &child_prefix, out);
            }
        }
    }

    fn marker(&self, node: &Node) -> String {
        if !self.settings.show_icons {
            return String::new();
        }
        let icon = match node.kind {
            NodeKind::Folder => FOLDER_ICON,
            NodeKind::File => file_icon(&node.name),
        };
        format!("{icon} ")
    }
}

/// Summary figures for a rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Lines containing something other than whitespace.
    pub lines: usize,
    /// Characters, including newlines.
    pub chars: usize,
}

impl TreeStats {
    pub fn of(text: &str) -> Self {
        Self {
            lines: text.lines().filter(|l| !l.trim().is_empty()).count(),
            chars: text.chars().count(),
        }
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lines / {} chars", self.lines, self.chars)
    }
}
