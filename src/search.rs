//! Query pipeline: index candidates to rendered hits
//!
//! The index ranks pages; this layer decorates each candidate with the
//! display data a result row needs: where the query matched, which
//! cluster of matches the excerpt shows, and whether the title itself
//! matched.

use tracing::debug;

use crate::excerpt::{
    render_excerpt, select_densest_run, truncated_excerpt, ExcerptConfig, ExcerptError,
};
use crate::indexer::{Indexer, IndexerResult};
use crate::matcher::{match_positions, title_matches};
use crate::models::SearchHit;

/// Maximum hits returned per query
const MAX_RESULTS: usize = 100;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub excerpt: ExcerptConfig,
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            excerpt: ExcerptConfig::default(),
            max_results: MAX_RESULTS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Run `query` against the index and build display-ready hits.
    ///
    /// Hits whose text contains no query word (e.g. a title-only match)
    /// fall back to a plain truncated excerpt, mirroring how pages with
    /// matches get the densest cluster of them emphasized.
    pub fn search(&self, indexer: &Indexer, query: &str) -> IndexerResult<Vec<SearchHit>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = indexer.search(query, self.config.max_results)?;
        debug!(query, candidates = candidates.len(), "ranked candidates");

        let hits = candidates
            .into_iter()
            .map(|candidate| {
                let positions = match_positions(&candidate.text, query);
                let excerpt = if positions.is_empty() {
                    truncated_excerpt(&candidate.text, self.config.excerpt)
                } else {
                    match select_densest_run(&positions, self.config.excerpt.width) {
                        Ok(selection) => render_excerpt(
                            &candidate.text,
                            &positions,
                            selection,
                            self.config.excerpt,
                        ),
                        Err(ExcerptError::EmptyRanges) => {
                            truncated_excerpt(&candidate.text, self.config.excerpt)
                        }
                    }
                };

                SearchHit {
                    title_matched: title_matches(&candidate.title, query),
                    url: candidate.url,
                    title: candidate.title,
                    tags: candidate.tags,
                    score: candidate.score,
                    excerpt,
                }
            })
            .collect();

        Ok(hits)
    }
}
