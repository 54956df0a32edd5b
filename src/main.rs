#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::EnvFilter;

use pathtree::cli::Args;
use pathtree::render::{lines_to_text, render_lines, TreeStats};
use pathtree::source::{DescriptorSource, ManifestSource, WalkdirSource};
use pathtree::terminal::{self, PrintConfig};
use pathtree::tree::build_forest;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("pathtree: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn descriptor_source(args: &Args) -> Result<Box<dyn DescriptorSource>> {
    if args.stdin {
        let source = ManifestSource::from_reader(io::stdin().lock())?;
        return Ok(Box::new(source));
    }
    if let Some(manifest) = &args.manifest {
        return Ok(Box::new(ManifestSource::open(manifest)?));
    }

    let path = args
        .path
        .canonicalize()
        .with_context(|| format!("{}: failed to resolve path", args.path.display()))?;
    anyhow::ensure!(path.is_dir(), "{}: Not a directory", path.display());
    tracing::info!(root = %path.display(), "walking directory");
    Ok(Box::new(
        WalkdirSource::new(path).include_root_name(!args.no_root),
    ))
}

fn run_app() -> Result<()> {
    let args = Args::parse().validated();
    init_tracing(&args);

    let descriptors = descriptor_source(&args)?
        .descriptors()
        .context("failed to collect paths")?;
    let forest = build_forest(descriptors);
    tracing::info!(
        roots = forest.len(),
        nodes = forest.node_count(),
        "forest built"
    );

    let settings = args.tree_settings();
    tracing::debug!(?settings, "rendering");
    let lines = render_lines(&forest, &settings);
    let text = lines_to_text(&lines);

    match args.output_path() {
        Some(out) => {
            std::fs::write(&out, &text)
                .with_context(|| format!("{}: failed to write output", out.display()))?;
            tracing::info!(path = %out.display(), "tree written");
        }
        None => {
            let print_config = PrintConfig {
                use_color: !args.no_color && terminal::stdout_is_tty(),
            };
            let mut out = BufWriter::new(io::stdout().lock());
            terminal::write_lines(&mut out, &lines, &print_config)
                .and_then(|_| out.flush())
                .context("failed to write to stdout")?;
        }
    }

    if args.stats {
        eprintln!("{}", TreeStats::of(&text));
    }
    Ok(())
}
