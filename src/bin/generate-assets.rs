#![forbid(unsafe_code)]

use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dist"));
    let written = pathtree::cli::write_assets(&out_dir)?;
    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
