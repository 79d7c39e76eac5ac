//! SiteStore - the assembled search service
//!
//! Owns the two on-disk artifacts of a site build (the document set and
//! the tantivy index directory) plus the query engine, and keeps them
//! consistent: opening a store whose index is empty while the document
//! set has pages rebuilds the index from the documents.

use std::path::Path;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::info;

use crate::indexer::{Indexer, IndexerError};
use crate::models::{DocumentSet, DocumentSetError, PageDoc, SearchHit};
use crate::search::{SearchConfig, SearchEngine};

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("failed to load document set: {0}")]
    IndexLoad(#[from] DocumentSetError),
    #[error("index error: {0}")]
    Indexer(#[from] IndexerError),
}

/// Search service over one built site.
///
/// Safe to share across threads: the document set sits behind a lock and
/// the index handles its own synchronization.
pub struct SiteStore {
    docs: RwLock<DocumentSet>,
    indexer: Indexer,
    engine: SearchEngine,
}

impl SiteStore {
    /// Open an existing site build: the document set at `docs_path` and
    /// the index under `index_dir`.
    pub fn open(index_dir: &Path, docs_path: &Path) -> Result<Self, SiteError> {
        let docs = DocumentSet::load(docs_path)?;
        let indexer = Indexer::open(index_dir)?;
        let store = Self {
            docs: RwLock::new(docs),
            indexer,
            engine: SearchEngine::new(),
        };
        store.rebuild_index_if_needed()?;
        Ok(store)
    }

    /// Build a fresh site: persist `pages` as the document set, replace
    /// the index contents, and return the ready store.
    pub fn rebuild(
        index_dir: &Path,
        docs_path: &Path,
        pages: Vec<PageDoc>,
    ) -> Result<Self, SiteError> {
        let docs = DocumentSet::new(pages);
        docs.save(docs_path)?;

        let indexer = Indexer::open(index_dir)?;
        indexer.clear()?;
        for page in &docs.pages {
            indexer.add_page(page)?;
        }
        indexer.commit()?;
        info!(pages = docs.len(), "site index rebuilt");

        Ok(Self {
            docs: RwLock::new(docs),
            indexer,
            engine: SearchEngine::new(),
        })
    }

    /// In-memory store (for testing)
    pub fn in_memory(pages: Vec<PageDoc>) -> Result<Self, SiteError> {
        let indexer = Indexer::open_in_memory()?;
        for page in &pages {
            indexer.add_page(page)?;
        }
        indexer.commit()?;

        Ok(Self {
            docs: RwLock::new(DocumentSet::new(pages)),
            indexer,
            engine: SearchEngine::new(),
        })
    }

    pub fn with_search_config(mut self, config: SearchConfig) -> Self {
        self.engine = SearchEngine::with_config(config);
        self
    }

    /// Index the document set again if the index came up empty while
    /// documents exist (e.g. the index directory was wiped).
    fn rebuild_index_if_needed(&self) -> Result<(), SiteError> {
        if self.indexer.num_docs() > 0 {
            return Ok(());
        }

        let docs = self.docs.read();
        if docs.is_empty() {
            return Ok(());
        }

        for page in &docs.pages {
            self.indexer.add_page(page)?;
        }
        self.indexer.commit()?;
        info!(pages = docs.len(), "index was empty, rebuilt from document set");

        Ok(())
    }

    /// Add or replace one page in both artifacts. Call [`commit`] to
    /// make it visible to searches.
    ///
    /// [`commit`]: SiteStore::commit
    pub fn add_page(&self, page: PageDoc) -> Result<(), SiteError> {
        self.indexer.add_page(&page)?;
        let mut docs = self.docs.write();
        docs.pages.retain(|p| p.url != page.url);
        docs.pages.push(page);
        Ok(())
    }

    pub fn commit(&self) -> Result<(), SiteError> {
        self.indexer.commit()?;
        Ok(())
    }

    pub fn num_pages(&self) -> usize {
        self.docs.read().len()
    }

    /// Ranked hits for a query; empty query means no hits.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>, SiteError> {
        Ok(self.engine.search(&self.indexer, query)?)
    }
}
