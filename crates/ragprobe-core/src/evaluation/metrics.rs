//! Keyword-based ranking metrics for retrieval quality.
//!
//! A test question carries a list of keywords. A retrieved chunk is relevant
//! to a keyword when its text contains the keyword (case-insensitive), which
//! gives one binary relevance vector per keyword. Per-keyword scores are then
//! averaged over the question's keywords.
//!
//! # Metrics
//!
//! | Metric | Scope | Description |
//! |--------|-------|-------------|
//! | MRR | full ranked list | 1 / rank of the first chunk containing the keyword |
//! | NDCG@k | top k | DCG of the binary relevance vector over its ideal ordering |
//! | Coverage | top k | Percentage of keywords found in at least one chunk |
//!
//! # References
//!
//! - Järvelin & Kekäläinen (2002). "Cumulated gain-based evaluation of IR techniques"

use crate::types::{Chunk, RetrievalEval};

// ============================================================================
// Relevance
// ============================================================================

fn lowercase_texts(chunks: &[Chunk]) -> Vec<String> {
    chunks.iter().map(|c| c.text.to_lowercase()).collect()
}

/// Binary relevance of the top `k` texts for an already lower-cased keyword.
fn relevance_vector(texts: &[String], keyword: &str, k: usize) -> Vec<u8> {
    texts
        .iter()
        .take(k)
        .map(|text| u8::from(text.contains(keyword)))
        .collect()
}

/// Binary relevance of the top `k` chunks for `keyword`.
pub fn keyword_relevance(chunks: &[Chunk], keyword: &str, k: usize) -> Vec<u8> {
    relevance_vector(&lowercase_texts(chunks), &keyword.to_lowercase(), k)
}

// ============================================================================
// MRR (Mean Reciprocal Rank)
// ============================================================================

fn reciprocal_rank_in(texts: &[String], keyword: &str) -> f64 {
    texts
        .iter()
        .position(|text| text.contains(keyword))
        .map_or(0.0, |i| 1.0 / (i + 1) as f64)
}

/// Computes the reciprocal rank of `keyword` in a ranked chunk list.
///
/// # Formula
///
/// ```text
/// RR = 1 / rank_of_first_chunk_containing_keyword
/// ```
///
/// The whole list is scanned, not only the top k.
///
/// # Returns
///
/// Reciprocal rank between 0.0 and 1.0. Returns 0.0 if no chunk contains the
/// keyword.
pub fn keyword_reciprocal_rank(chunks: &[Chunk], keyword: &str) -> f64 {
    reciprocal_rank_in(&lowercase_texts(chunks), &keyword.to_lowercase())
}

// ============================================================================
// DCG / NDCG (Normalized Discounted Cumulative Gain)
// ============================================================================

/// Computes DCG of a relevance vector in ranked order.
///
/// # Formula
///
/// ```text
/// DCG = Σ rel_i / log₂(i + 2)  for i in 0..len
/// ```
pub fn dcg(relevance: &[u8]) -> f64 {
    relevance
        .iter()
        .enumerate()
        .map(|(i, &rel)| f64::from(rel) / discount(i))
        .sum()
}

/// Discount for a 0-indexed position: log₂(position + 2).
#[inline]
fn discount(position: usize) -> f64 {
    (position as f64 + 2.0).log2()
}

/// Normalizes DCG by the DCG of the same vector sorted descending.
///
/// The ideal ordering only rearranges the observed relevance vector; matches
/// outside of it are not considered.
fn ndcg_of(relevance: &[u8]) -> f64 {
    let mut ideal = relevance.to_vec();
    ideal.sort_unstable_by(|a, b| b.cmp(a));

    let idcg = dcg(&ideal);
    if idcg == 0.0 {
        0.0
    } else {
        dcg(relevance) / idcg
    }
}

/// Computes NDCG@k of `keyword` over a ranked chunk list.
///
/// # Returns
///
/// NDCG between 0.0 and 1.0. Returns 0.0 if none of the top `k` chunks
/// contains the keyword.
pub fn keyword_ndcg_at_k(chunks: &[Chunk], keyword: &str, k: usize) -> f64 {
    ndcg_of(&keyword_relevance(chunks, keyword, k))
}

// ============================================================================
// Per-question retrieval evaluation
// ============================================================================

/// Scores a ranked chunk list against a question's keywords.
///
/// `mrr` and `ndcg` are the means of the per-keyword values;
/// `keyword_coverage` is the percentage of keywords that appear in at least
/// one of the top `k` chunks. All three are 0 when `keywords` is empty.
pub fn evaluate_retrieval(chunks: &[Chunk], keywords: &[String], k: usize) -> RetrievalEval {
    if keywords.is_empty() {
        return RetrievalEval::default();
    }

    let texts = lowercase_texts(chunks);
    let mut mrr_sum = 0.0;
    let mut ndcg_sum = 0.0;
    let mut found = 0usize;

    for keyword in keywords {
        let keyword = keyword.to_lowercase();
        let relevance = relevance_vector(&texts, &keyword, k);

        mrr_sum += reciprocal_rank_in(&texts, &keyword);
        ndcg_sum += ndcg_of(&relevance);
        if relevance.contains(&1) {
            found += 1;
        }
    }

    let n = keywords.len() as f64;
    RetrievalEval {
        mrr: mrr_sum / n,
        ndcg: ndcg_sum / n,
        keyword_coverage: 100.0 * found as f64 / n,
    }
}
