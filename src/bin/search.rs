//! Query CLI against a built site index
//!
//! Prints ranked hits with the excerpt's matched spans wrapped in `**`
//! and the total result count, the same shape the site's results page
//! renders.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use lectern::excerpt::Segment;
use lectern::store::SiteStore;

#[derive(Parser)]
#[command(name = "search", about = "Search a built site index")]
struct Args {
    /// Folder the index builder wrote (contains index/ and search_data.json)
    #[arg(long)]
    index_dir: PathBuf,

    /// Site root to resolve hit links against (prints site-relative
    /// paths when omitted)
    #[arg(long)]
    site_root: Option<Url>,

    /// Query words
    #[arg(required = true)]
    query: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Args::parse();
    let query = args.query.join(" ");

    let store = SiteStore::open(
        &args.index_dir.join("index"),
        &args.index_dir.join("search_data.json"),
    )
    .context("opening the site index")?;

    let hits = store.search(&query).context("running the query")?;
    println!("{} results.", hits.len());

    for hit in &hits {
        let title = if hit.title_matched {
            format!("**{}**", hit.title)
        } else {
            hit.title.clone()
        };
        let link = match &args.site_root {
            Some(root) => root
                .join(&hit.url)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| hit.url.clone()),
            None => hit.url.clone(),
        };
        println!("\n{title}  [{link}]");
        if !hit.tags.is_empty() {
            println!("  tags: {}", hit.tags.join(", "));
        }
        println!("  {}", format_excerpt(hit));
    }

    Ok(())
}

fn format_excerpt(hit: &lectern::SearchHit) -> String {
    let mut out = String::new();
    if hit.excerpt.leading_gap {
        out.push('…');
    }
    for segment in &hit.excerpt.segments {
        match segment {
            Segment::Plain(text) => out.push_str(text),
            Segment::Match(text) => {
                out.push_str("**");
                out.push_str(text);
                out.push_str("**");
            }
        }
    }
    if hit.excerpt.trailing_gap {
        out.push('…');
    }
    out
}
