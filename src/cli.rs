use clap::Parser;
use std::path::{Path, PathBuf};

use crate::settings::{SortBy, TreeSettings, TreeStyle, DEFAULT_EXCLUDES, DEFAULT_MAX_DEPTH};

/// File name used by `--save`.
pub const DEFAULT_EXPORT_NAME: &str = "folder-structure.txt";

const AFTER_HELP: &str = "\
Examples:
  pathtree                         Tree of the current directory
  pathtree -L 2 --style ascii src  Two levels below src, ASCII connectors
  git ls-files | pathtree --stdin  Tree of a path list read from stdin
  pathtree --sort size --save      Largest files first, written to folder-structure.txt";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pathtree",
    version,
    about = "Render a folder structure as a text tree",
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Directory to walk (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Read a path manifest from stdin instead of walking PATH
    #[arg(long = "stdin", conflicts_with = "manifest")]
    pub stdin: bool,

    /// Read a path manifest from FILE instead of walking PATH
    #[arg(short = 'm', long = "manifest", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Connector style: standard, ascii or simple
    #[arg(short = 's', long = "style", default_value = "standard")]
    pub style: String,

    /// Sibling order: name, type or size
    #[arg(long = "sort", default_value = "name")]
    pub sort_by: String,

    /// Max display depth below the top level
    #[arg(short = 'L', long = "level", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Only show folders
    #[arg(short = 'D', long = "dirs-only")]
    pub dirs_only: bool,

    /// Name patterns to exclude (repeatable, added to the defaults)
    #[arg(short = 'I', long = "exclude", action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Do not apply the default exclusions (.git, node_modules, .DS_Store, Thumbs.db)
    #[arg(long = "no-default-excludes")]
    pub no_default_excludes: bool,

    /// Omit folder and file icons
    #[arg(long = "no-icons")]
    pub no_icons: bool,

    /// Do not prefix paths with the walked folder's own name
    #[arg(long = "no-root")]
    pub no_root: bool,

    /// Write the tree to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE", conflicts_with = "save")]
    pub output: Option<PathBuf>,

    /// Write the tree to folder-structure.txt in the current directory
    #[arg(long = "save")]
    pub save: bool,

    /// Print line and character counts to stderr
    #[arg(long = "stats")]
    pub stats: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// More log output (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        // Respect NO_COLOR env var
        if std::env::var_os("NO_COLOR").is_some() {
            self.no_color = true;
        }
        self.exclude.retain(|p| !p.is_empty());
        self
    }

    /// Render settings described by these arguments. Unknown style or sort
    /// names fall back to the defaults with a warning.
    pub fn tree_settings(&self) -> TreeSettings {
        let style: TreeStyle = self.style.parse().unwrap_or_default();
        let sort_by: SortBy = self.sort_by.parse().unwrap_or_default();

        let mut exclude_patterns: Vec<String> = if self.no_default_excludes {
            Vec::new()
        } else {
            DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect()
        };
        exclude_patterns.extend(self.exclude.iter().cloned());

        TreeSettings {
            style,
            show_files: !self.dirs_only,
            max_depth: self.max_depth,
            exclude_patterns,
            sort_by,
            show_icons: !self.no_icons,
        }
    }

    /// Where the rendered text goes, if not stdout.
    pub fn output_path(&self) -> Option<PathBuf> {
        if self.save {
            Some(PathBuf::from(DEFAULT_EXPORT_NAME))
        } else {
            self.output.clone()
        }
    }

    /// Log filter directive implied by `-v`/`-q`.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Write shell completions and a man page under `out_dir`, returning the
/// files created.
pub fn write_assets(out_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    use clap::CommandFactory;
    use clap_complete::{generate_to, Shell};

    let completions_dir = out_dir.join("completions");
    let man_dir = out_dir.join("man");
    std::fs::create_dir_all(&completions_dir)?;
    std::fs::create_dir_all(&man_dir)?;

    let mut written = Vec::new();
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
        let mut cmd = Args::command();
        written.push(generate_to(shell, &mut cmd, "pathtree", &completions_dir)?);
    }

    let mut buffer = Vec::new();
    clap_mangen::Man::new(Args::command()).render(&mut buffer)?;
    let man_page = man_dir.join("pathtree.1");
    std::fs::write(&man_page, buffer)?;
    written.push(man_page);
    Ok(written)
}
