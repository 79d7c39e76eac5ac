//! Offline index builder
//!
//! Walks a folder of rendered HTML pages and writes the two search
//! artifacts next to each other: `search_data.json` (the document set)
//! and `index/` (the tantivy index).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lectern::extract;
use lectern::store::SiteStore;

#[derive(Parser)]
#[command(name = "build-index", about = "Build the search index for a rendered site")]
struct Args {
    /// Folder of rendered HTML pages
    #[arg(long)]
    site_dir: PathBuf,

    /// Output folder for the index and document set
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let files = extract::find_pages(&args.site_dir);
    anyhow::ensure!(
        !files.is_empty(),
        "no HTML pages found under {}",
        args.site_dir.display()
    );

    let progress = ProgressBar::new(files.len() as u64).with_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .expect("static progress template"),
    );

    let mut pages = Vec::with_capacity(files.len());
    for file in &files {
        progress.set_message(file.display().to_string());
        match extract::extract_page(&args.site_dir, file) {
            Ok(page) => pages.push(page),
            Err(err) => warn!("skipping {}: {err}", file.display()),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let store = SiteStore::rebuild(
        &args.out_dir.join("index"),
        &args.out_dir.join("search_data.json"),
        pages,
    )
    .context("building the site index")?;

    info!(
        pages = store.num_pages(),
        out_dir = %args.out_dir.display(),
        "done"
    );
    Ok(())
}
