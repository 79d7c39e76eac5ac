//! Tantivy index over site pages
//!
//! Word-level index with three searched fields. Field weighting follows
//! the site's relevance order: a title hit outweighs a tag hit outweighs
//! a body hit. The index lives in a directory next to the document set;
//! tests use the in-RAM variant.

use std::path::Path;

use parking_lot::RwLock;
use tantivy::collector::TopDocs;
use tantivy::directory::MmapDirectory;
use tantivy::query::{BooleanQuery, BoostQuery, Occur, Query, TermQuery};
use tantivy::schema::*;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Term};
use thiserror::Error;

use crate::models::PageDoc;

const TITLE_BOOST: f32 = 10.0;
const TAGS_BOOST: f32 = 5.0;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Tantivy error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),
    #[error("Directory error: {0}")]
    Directory(#[from] tantivy::directory::error::OpenDirectoryError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IndexerResult<T> = Result<T, IndexerError>;

/// A page retrieved from the index, with its stored fields hydrated.
#[derive(Debug, Clone)]
pub struct SearchCandidate {
    pub url: String,
    pub title: String,
    pub tags: Vec<String>,
    pub text: String,
    pub score: f32,
}

/// Tantivy-based page index with upsert-by-url semantics
pub struct Indexer {
    index: Index,
    writer: RwLock<IndexWriter>,
    reader: RwLock<IndexReader>,
    url_field: Field,
    title_field: Field,
    tags_field: Field,
    text_field: Field,
}

impl Indexer {
    /// Open or create an index in the given directory
    pub fn open(path: &Path) -> IndexerResult<Self> {
        std::fs::create_dir_all(path)?;
        let dir = MmapDirectory::open(path)?;
        let schema = Self::build_schema();
        let index = Index::open_or_create(dir, schema.clone())?;

        let writer = index.writer(50_000_000)?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(Self::from_parts(index, writer, reader, &schema))
    }

    /// Create an in-memory index (for testing)
    pub fn open_in_memory() -> IndexerResult<Self> {
        let schema = Self::build_schema();
        let index = Index::create_in_ram(schema.clone());

        let writer = index.writer(15_000_000)?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;

        Ok(Self::from_parts(index, writer, reader, &schema))
    }

    fn from_parts(index: Index, writer: IndexWriter, reader: IndexReader, schema: &Schema) -> Self {
        Self {
            url_field: schema.get_field("url").unwrap(),
            title_field: schema.get_field("title").unwrap(),
            tags_field: schema.get_field("tags").unwrap(),
            text_field: schema.get_field("text").unwrap(),
            index,
            writer: RwLock::new(writer),
            reader: RwLock::new(reader),
        }
    }

    fn build_schema() -> Schema {
        let mut builder = Schema::builder();

        // url is the document key: indexed raw for delete-by-term upserts
        builder.add_text_field("url", STRING | STORED);

        let text_field_indexing = TextFieldIndexing::default()
            .set_tokenizer("default")
            .set_index_option(IndexRecordOption::WithFreqsAndPositions);
        let text_options = TextOptions::default()
            .set_indexing_options(text_field_indexing)
            .set_stored();

        builder.add_text_field("title", text_options.clone());
        builder.add_text_field("tags", text_options.clone());
        builder.add_text_field("text", text_options);

        builder.build()
    }

    /// Add or update a page in the index
    pub fn add_page(&self, page: &PageDoc) -> IndexerResult<()> {
        let writer = self.writer.write();

        // Delete existing document with same url (upsert semantics)
        let url_term = Term::from_field_text(self.url_field, &page.url);
        writer.delete_term(url_term);

        let mut doc = tantivy::TantivyDocument::default();
        doc.add_text(self.url_field, &page.url);
        doc.add_text(self.title_field, &page.title);
        for tag in &page.tags {
            doc.add_text(self.tags_field, tag);
        }
        doc.add_text(self.text_field, &page.text);

        writer.add_document(doc)?;

        Ok(())
    }

    pub fn remove_page(&self, url: &str) -> IndexerResult<()> {
        let writer = self.writer.write();
        let url_term = Term::from_field_text(self.url_field, url);
        writer.delete_term(url_term);
        Ok(())
    }

    pub fn commit(&self) -> IndexerResult<()> {
        self.writer.write().commit()?;
        self.reader.write().reload()?;
        Ok(())
    }

    pub fn clear(&self) -> IndexerResult<()> {
        let mut writer = self.writer.write();
        writer.delete_all_documents()?;
        writer.commit()?;
        drop(writer);
        self.reader.write().reload()?;
        Ok(())
    }

    /// Get the number of pages in the index
    pub fn num_docs(&self) -> u64 {
        self.reader.read().searcher().num_docs()
    }

    /// Retrieve the best `limit` pages for a free-text query.
    ///
    /// Query words are tokenized with the same analyzer as the indexed
    /// fields and combined as an OR across all three fields, with each
    /// field's subquery weighted by its boost. Empty queries match
    /// nothing.
    pub fn search(&self, query: &str, limit: usize) -> IndexerResult<Vec<SearchCandidate>> {
        let reader = self.reader.read();
        let searcher = reader.searcher();

        let tokens = self.tokenize(query);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let fields = [
            (self.title_field, TITLE_BOOST),
            (self.tags_field, TAGS_BOOST),
            (self.text_field, 1.0),
        ];

        let mut field_queries: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for (field, boost) in fields {
            let subqueries: Vec<(Occur, Box<dyn Query>)> = tokens
                .iter()
                .map(|token| {
                    let term = Term::from_field_text(field, token);
                    let q: Box<dyn Query> =
                        Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs));
                    (Occur::Should, q)
                })
                .collect();
            let field_query: Box<dyn Query> = Box::new(BooleanQuery::new(subqueries));
            let boosted: Box<dyn Query> = if boost == 1.0 {
                field_query
            } else {
                Box::new(BoostQuery::new(field_query, boost))
            };
            field_queries.push((Occur::Should, boosted));
        }
        let final_query = BooleanQuery::new(field_queries);

        let top_docs = searcher.search(&final_query, &TopDocs::with_limit(limit))?;

        let mut candidates = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: tantivy::TantivyDocument = searcher.doc(doc_address)?;

            let url = doc
                .get_first(self.url_field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let title = doc
                .get_first(self.title_field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            let tags = doc
                .get_all(self.tags_field)
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect();
            let text = doc
                .get_first(self.text_field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            candidates.push(SearchCandidate { url, title, tags, text, score });
        }

        Ok(candidates)
    }

    fn tokenize(&self, query: &str) -> Vec<String> {
        let mut tokenizer = self.index.tokenizers().get("default").unwrap();
        let mut token_stream = tokenizer.token_stream(query);
        let mut tokens = Vec::new();
        while let Some(token) = token_stream.next() {
            tokens.push(token.text.clone());
        }
        tokens
    }
}
