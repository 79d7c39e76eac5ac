//! Page documents and search result types

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::excerpt::Excerpt;

/// One rendered page of the site: the unit of indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDoc {
    /// Site-relative location, forward slashes (`lectures/week3.html`).
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub text: String,
}

#[derive(Error, Debug)]
pub enum DocumentSetError {
    #[error("failed to read document set: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed document set: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The raw pages backing the index, persisted as a JSON array
/// (`search_data.json`) next to the index directory. Kept separate from
/// the index so it can be rebuilt without re-walking the site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentSet {
    pub pages: Vec<PageDoc>,
}

impl DocumentSet {
    pub fn new(pages: Vec<PageDoc>) -> Self {
        Self { pages }
    }

    pub fn load(path: &Path) -> Result<Self, DocumentSetError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentSetError> {
        let raw = serde_json::to_string(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    pub fn find(&self, url: &str) -> Option<&PageDoc> {
        self.pages.iter().find(|p| p.url == url)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// One ranked search result, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub tags: Vec<String>,
    pub score: f32,
    /// A query word occurred in the title; render it emphasized.
    pub title_matched: bool,
    pub excerpt: Excerpt,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str) -> PageDoc {
        PageDoc {
            url: url.to_string(),
            title: format!("Title of {url}"),
            tags: vec!["track1".to_string()],
            text: "body text".to_string(),
        }
    }

    #[test]
    fn document_set_round_trips_as_a_bare_array() {
        let set = DocumentSet::new(vec![page("a.html"), page("b.html")]);
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with('['), "expected a JSON array, got {json}");

        let back: DocumentSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pages, set.pages);
    }

    #[test]
    fn document_set_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search_data.json");

        let set = DocumentSet::new(vec![page("lectures/week1.html")]);
        set.save(&path).unwrap();

        let loaded = DocumentSet::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.find("lectures/week1.html").is_some());
        assert!(loaded.find("missing.html").is_none());
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let doc: PageDoc = serde_json::from_str(
            r#"{"url": "a.html", "title": "A", "text": "body"}"#,
        )
        .unwrap();
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn load_failures_are_distinguished() {
        let dir = tempfile::tempdir().unwrap();
        let missing = DocumentSet::load(&dir.path().join("absent.json"));
        assert!(matches!(missing, Err(DocumentSetError::Io(_))));

        let bad_path = dir.path().join("bad.json");
        fs::write(&bad_path, "{not json").unwrap();
        let malformed = DocumentSet::load(&bad_path);
        assert!(matches!(malformed, Err(DocumentSetError::Malformed(_))));
    }
}
