//! Text file fetcher.

use super::Fetcher;
use crate::config::DEFAULT_FILE_EXTENSIONS;
use crate::error::FetchError;
use crate::types::Document;
use std::collections::BTreeMap;
use std::path::{Component, Path};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Reads text files under a directory into [`Document`]s.
///
/// Each document's `id` is its path. Metadata carries `filename`,
/// `relative_path`, and `type`: the first directory below the source root, or
/// `document` for files at the root.
#[derive(Debug, Clone)]
pub struct TextFetcher {
    extensions: Vec<String>,
}

impl TextFetcher {
    /// Creates a fetcher accepting the given extensions (`".md"` or `"md"`).
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn read(&self, path: &Path, root: &Path) -> Result<Document, FetchError> {
        let bytes = std::fs::read(path).map_err(|e| FetchError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                warn!("{} is not valid UTF-8, replacing invalid bytes", path.display());
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let relative = path.strip_prefix(root).unwrap_or(path);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let doc_type = relative
            .parent()
            .and_then(|parent| parent.components().next())
            .and_then(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .unwrap_or_else(|| "document".to_string());

        let metadata = BTreeMap::from([
            ("filename".to_string(), filename),
            (
                "relative_path".to_string(),
                relative.to_string_lossy().into_owned(),
            ),
            ("type".to_string(), doc_type),
        ]);

        Ok(Document {
            id: path.display().to_string(),
            content,
            metadata,
        })
    }
}

impl Default for TextFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_EXTENSIONS)
    }
}

impl Fetcher for TextFetcher {
    fn fetch(&self, source: &str) -> Result<Vec<Document>, FetchError> {
        let root = Path::new(source);
        if !root.exists() {
            return Err(FetchError::NotFound(source.to_string()));
        }

        if root.is_file() {
            let base = root.parent().unwrap_or(root);
            return Ok(vec![self.read(root, base)?]);
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| FetchError::Read {
                path: source.to_string(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !self.accepts(path) {
                continue;
            }
            debug!("Reading {}", path.display());
            documents.push(self.read(path, root)?);
        }

        if documents.is_empty() {
            return Err(FetchError::NoDocuments(source.to_string()));
        }

        info!("Fetched {} documents from {}", documents.len(), source);
        Ok(documents)
    }
}
