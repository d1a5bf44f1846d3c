//! BM25 keyword retriever over windowed document chunks.
//!
//! Wraps the [`bm25`](https://crates.io/crates/bm25) crate. Documents are split
//! with the same windowing used for generation (at the ingestion chunk size),
//! and each window is indexed as one BM25 document.
//!
//! # Usage
//!
//! ```ignore
//! use ragprobe_core::rag::{KeywordRetriever, Retriever};
//!
//! let retriever = KeywordRetriever::from_documents(&documents, 1000, 200)?;
//! let chunks = retriever.query("Who is the CEO?", 5).await?;
//! ```

use super::Retriever;
use crate::error::{ConfigError, RetrievalError};
use crate::types::{Chunk, Document};
use crate::windowing::context_windows;
use async_trait::async_trait;
use bm25::{Language, SearchEngine, SearchEngineBuilder};
use tracing::{debug, instrument};

/// In-memory BM25 retriever.
///
/// The index is built once and read-only afterwards.
pub struct KeywordRetriever {
    search_engine: SearchEngine<u64>,
    chunks: Vec<Chunk>,
}

impl KeywordRetriever {
    /// Indexes `documents`, split into windows of `chunk_size` characters
    /// sharing `chunk_overlap`.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub fn from_documents(
        documents: &[Document],
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> Result<Self, ConfigError> {
        let mut chunks = Vec::new();
        for doc in documents {
            if doc.content.trim().is_empty() {
                continue;
            }
            for window in context_windows(&doc.id, &doc.content, chunk_size, chunk_overlap)? {
                chunks.push(Chunk {
                    text: window.text.to_string(),
                    source: doc.id.clone(),
                    index: window.index,
                    metadata: doc.metadata.clone(),
                });
            }
        }

        let bm25_docs: Vec<bm25::Document<u64>> = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| bm25::Document {
                id: i as u64,
                contents: chunk.text.clone(),
            })
            .collect();
        let search_engine =
            SearchEngineBuilder::<u64>::with_documents(Language::English, bm25_docs).build();

        debug!("Indexed {} chunks", chunks.len());
        Ok(Self {
            search_engine,
            chunks,
        })
    }

    /// Returns the number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if nothing was indexed.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Ranked `(chunk, score)` pairs for `query`, highest score first.
    pub fn search(&self, query: &str, k: usize) -> Vec<(&Chunk, f32)> {
        self.search_engine
            .search(query, k)
            .into_iter()
            .filter_map(|result| {
                let chunk = self.chunks.get(result.document.id as usize)?;
                Some((chunk, result.score))
            })
            .collect()
    }
}

#[async_trait]
impl Retriever for KeywordRetriever {
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<Chunk>, RetrievalError> {
        Ok(self
            .search(text, top_k)
            .into_iter()
            .map(|(chunk, _)| chunk.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retriever() -> KeywordRetriever {
        let docs = vec![
            Document::new("ceo.md", "Avery Lancaster is the chief executive of Insurellm."),
            Document::new("products.md", "Carllm is an auto insurance pricing product."),
            Document::new("history.md", "Insurellm was founded in Calgary in 2015."),
        ];
        KeywordRetriever::from_documents(&docs, 1000, 200).unwrap()
    }

    #[test]
    fn test_indexes_one_chunk_per_short_document() {
        let retriever = retriever();
        assert_eq!(retriever.len(), 3);
        assert!(!retriever.is_empty());
    }

    #[test]
    fn test_long_document_is_windowed() {
        let text = "insurance pricing ".repeat(100);
        let retriever =
            KeywordRetriever::from_documents(&[Document::new("long.md", text)], 1000, 200).unwrap();
        // 1800 chars, step 800: [0,1000), [800,1800)
        assert_eq!(retriever.len(), 2);
    }

    #[test]
    fn test_search_ranks_matching_chunk_first() {
        let retriever = retriever();
        let results = retriever.search("Carllm pricing", 3);
        assert!(!results.is_empty());
        assert_eq!(results[0].0.source, "products.md");
    }

    #[tokio::test]
    async fn test_query_respects_top_k() {
        let retriever = retriever();
        let chunks = retriever.query("Insurellm", 1).await.unwrap();
        assert_eq!(chunks.len(), 1);
    }

    #[tokio::test]
    async fn test_no_match_returns_empty() {
        let chunks = retriever().query("zeppelin", 5).await.unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_invalid_chunking_is_rejected() {
        let docs = vec![Document::new("a.md", "text")];
        assert!(KeywordRetriever::from_documents(&docs, 100, 100).is_err());
    }
}
