//! lectern - search toolkit for static course sites
//!
//! A course site is rendered once and served as plain files, so search
//! happens on prebuilt artifacts: an offline builder walks the rendered
//! pages and produces a document set plus a full-text index, and the
//! query side turns index hits into result rows with an excerpt built
//! around the densest cluster of query matches.
//!
//! # Architecture
//! - `extract`: offline HTML-to-document extraction
//! - `models`: page documents, the persisted document set, search hits
//! - `indexer`: tantivy index with per-field relevance boosts
//! - `matcher`: query-term occurrence positions within one page
//! - `excerpt`: excerpt run selection and rendering
//! - `search`: query pipeline tying the above together
//! - `store`: the assembled search service over one site build
//! - `schedule`: live lecture playback sequencing
//! - `prefs`: persisted viewer preferences (sidebar, course track)

pub mod excerpt;
pub mod extract;
pub mod indexer;
pub mod matcher;
pub mod models;
pub mod prefs;
pub mod schedule;
pub mod search;
pub mod store;

pub use excerpt::{Excerpt, ExcerptConfig, MatchRange, RunSelection, Segment};
pub use models::{DocumentSet, PageDoc, SearchHit};
pub use store::{SiteError, SiteStore};
