//! Offline page extraction
//!
//! Walks a folder of rendered HTML pages and turns each one into a
//! [`PageDoc`]: title from `<title>`, body text with whitespace
//! collapsed, tags from the keywords meta. Runs once per site build,
//! before indexing.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

use crate::models::PageDoc;

/// Directories that hold styling and vendored scripts, not content.
const SKIPPED_DIRS: [&str; 3] = ["assets", "css", "libs"];

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());
static KEYWORDS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="keywords"]"#).unwrap());

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("page {path} is outside the site root")]
    OutsideRoot { path: PathBuf },
}

/// Collect every `.htm`/`.html` file under `root` in a deterministic
/// order, skipping styling/vendor directories.
pub fn find_pages(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry.depth() > 0
                && SKIPPED_DIRS.contains(&entry.file_name().to_string_lossy().as_ref()))
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_html(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "htm" || ext == "html"
        })
        .unwrap_or(false)
}

/// Parse one rendered page into a [`PageDoc`].
///
/// The page url is its path relative to `root`, with forward slashes.
/// A missing or empty `<title>` falls back to the file name.
pub fn extract_page(root: &Path, path: &Path) -> Result<PageDoc, ExtractError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| ExtractError::OutsideRoot { path: path.to_path_buf() })?;
    let url = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let raw = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document = Html::parse_document(&raw);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

    let text = document
        .select(&BODY_SELECTOR)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default();

    let tags = document
        .select(&KEYWORDS_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| {
            content
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(PageDoc { url, title, tags, text })
}

/// Walk and extract a whole site in one pass.
pub fn extract_site(root: &Path) -> Result<Vec<PageDoc>, ExtractError> {
    find_pages(root)
        .iter()
        .map(|path| extract_page(root, path))
        .collect()
}

/// Collapse runs of whitespace (including newlines and tabs) to single
/// spaces and trim both ends.
fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                result.push(' ');
                last_was_space = true;
            }
        } else {
            result.push(ch);
            last_was_space = false;
        }
    }
    while result.ends_with(' ') {
        result.pop();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn walk_finds_html_and_skips_vendor_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "index.html", "<html></html>");
        write(root, "lectures/week1.HTML", "<html></html>");
        write(root, "lectures/notes.txt", "not a page");
        write(root, "assets/menu.html", "<html></html>");
        write(root, "css/style.html", "<html></html>");
        write(root, "libs/vendor.html", "<html></html>");

        let pages = find_pages(root);
        let rels: Vec<String> = pages
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(rels, vec!["index.html", "lectures/week1.HTML"]);
    }

    #[test]
    fn extracts_title_body_and_tags() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "lectures/week2.html",
            r#"<html><head>
                <title> Week 2:  Convexity </title>
                <meta name="keywords" content="lecture, track-math , ">
               </head>
               <body><h1>Convexity</h1>
                 <p>Today   we cover
                 convex sets.</p></body></html>"#,
        );

        let page = extract_page(root, &root.join("lectures/week2.html")).unwrap();
        assert_eq!(page.url, "lectures/week2.html");
        assert_eq!(page.title, "Week 2: Convexity");
        assert_eq!(page.tags, vec!["lecture".to_string(), "track-math".to_string()]);
        assert_eq!(page.text, "Convexity Today we cover convex sets.");
    }

    #[test]
    fn missing_title_falls_back_to_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "bare.html", "<html><body>content</body></html>");

        let page = extract_page(root, &root.join("bare.html")).unwrap();
        assert_eq!(page.title, "bare.html");
        assert!(page.tags.is_empty());
    }

    #[test]
    fn page_outside_root_is_rejected() {
        let site = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        write(elsewhere.path(), "stray.html", "<html></html>");

        let result = extract_page(site.path(), &elsewhere.path().join("stray.html"));
        assert!(matches!(result, Err(ExtractError::OutsideRoot { .. })));
    }

    #[test]
    fn unreadable_page_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_page(dir.path(), &dir.path().join("absent.html"));
        assert!(matches!(result, Err(ExtractError::Io { .. })));
    }

    #[test]
    fn extract_site_collects_all_pages() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "a.html", "<html><head><title>A</title></head><body>one</body></html>");
        write(root, "b.html", "<html><head><title>B</title></head><body>two</body></html>");

        let pages = extract_site(root).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].title, "A");
        assert_eq!(pages[1].title, "B");
    }
}
