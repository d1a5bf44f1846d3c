//! Test-case file I/O.
//!
//! The file written by generation and read by evaluation is a JSON object
//! `{"tests": [...]}` of [`TestQuestion`]s.

use crate::error::TestFileError;
use crate::types::{Category, TestQuestion};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Contents of a test-case file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestFile {
    pub tests: Vec<TestQuestion>,
}

impl TestFile {
    pub fn new(tests: Vec<TestQuestion>) -> Self {
        Self { tests }
    }

    /// Reads and parses a test-case file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TestFileError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let file: TestFile = serde_json::from_str(&data)?;
        debug!("Loaded {} tests from {}", file.tests.len(), path.display());
        Ok(file)
    }

    /// Writes the file as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TestFileError> {
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Number of tests per category, sorted by category.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for test in &self.tests {
            *counts.entry(test.category).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn sample() -> TestFile {
        TestFile::new(vec![
            TestQuestion {
                question: "When was Insurellm founded?".to_string(),
                category: Category::Temporal,
                reference_answer: "Insurellm was founded in 2015.".to_string(),
                keywords: vec!["2015".to_string()],
                expected_sources: BTreeSet::from(["kb/about.md".to_string()]),
            },
            TestQuestion {
                question: "Who is the CEO of Insurellm?".to_string(),
                category: Category::DirectFact,
                reference_answer: "Avery Lancaster is the CEO.".to_string(),
                keywords: vec!["Avery Lancaster".to_string(), "CEO".to_string()],
                expected_sources: BTreeSet::new(),
            },
        ])
    }

    #[test]
    fn test_save_then_load_is_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tests.json");

        let file = sample();
        file.save(&path).unwrap();
        assert_eq!(TestFile::load(&path).unwrap(), file);
    }

    #[test]
    fn test_file_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["tests"].as_array().unwrap().len(), 2);
        assert_eq!(value["tests"][0]["category"], "temporal");
    }

    #[test]
    fn test_category_counts() {
        let counts = sample().category_counts();
        assert_eq!(counts[&Category::Temporal], 1);
        assert_eq!(counts[&Category::DirectFact], 1);
        assert_eq!(
            counts.keys().next(),
            Some(&Category::DirectFact),
            "sorted by category"
        );
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            TestFile::load(dir.path().join("missing.json")),
            Err(TestFileError::Io(_))
        ));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{\"tests\": [{\"question\": 1}]}").unwrap();
        assert!(matches!(TestFile::load(&bad), Err(TestFileError::Json(_))));
    }
}
