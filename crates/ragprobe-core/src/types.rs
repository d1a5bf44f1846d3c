//! Core data model shared by the generation and evaluation pipelines.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A source document produced by a [`Fetcher`](crate::rag::Fetcher).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// Stable identifier (a file path for the text fetcher)
    pub id: String,
    /// Full text content
    pub content: String,
    /// Free-form metadata (filename, relative path, type, ...)
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    /// Creates a document without metadata.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: BTreeMap::new(),
        }
    }
}

/// A ranked chunk returned by a [`Retriever`](crate::rag::Retriever).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub source: String,
    pub index: usize,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Chunk {
    /// Creates a chunk with only text, for callers that do not track sources.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Kind of question a test case asks.
///
/// Unknown labels coming from an LLM or a hand-edited test file are read as
/// [`Category::DirectFact`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Category {
    /// Who is X? What is Y?
    #[default]
    DirectFact,
    /// When did X happen?
    Temporal,
    /// How many X?
    Numerical,
    /// How does X compare to Y?
    Comparative,
    /// Who reports to X?
    Relationship,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 5] = [
        Category::DirectFact,
        Category::Temporal,
        Category::Numerical,
        Category::Comparative,
        Category::Relationship,
    ];

    /// Wire label, as written to test-case files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DirectFact => "direct_fact",
            Category::Temporal => "temporal",
            Category::Numerical => "numerical",
            Category::Comparative => "comparative",
            Category::Relationship => "relationship",
        }
    }

    /// Parses a label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }

    /// Normalizes a raw label against an allow-list.
    ///
    /// An empty `allowed` slice accepts any known category. Labels that are
    /// unknown, or known but not allowed, fall back to `DirectFact`.
    pub fn normalize(label: &str, allowed: &[Category]) -> Self {
        match Self::parse(label) {
            Some(category) if allowed.is_empty() || allowed.contains(&category) => category,
            _ => Category::DirectFact,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self::parse(&label).unwrap_or_default()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A grounded question/answer test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestQuestion {
    pub question: String,
    #[serde(default)]
    pub category: Category,
    pub reference_answer: String,
    /// Facts or terms a correct retrieval/answer must contain (ordered)
    pub keywords: Vec<String>,
    /// IDs of the documents the question was generated from
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub expected_sources: BTreeSet<String>,
}

/// Retrieval quality of one test question.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RetrievalEval {
    /// Mean reciprocal rank over keywords, in [0, 1]
    pub mrr: f64,
    /// Mean NDCG over keywords, in [0, 1]
    pub ndcg: f64,
    /// Percentage of keywords found in the top-k chunks, in [0, 100]
    pub keyword_coverage: f64,
}

/// Judge scores for one generated answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnswerEval {
    #[serde(default)]
    pub feedback: String,
    pub accuracy: f64,
    pub completeness: f64,
    pub relevance: f64,
}
