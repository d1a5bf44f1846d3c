//! Command-line and environment configuration.
//!
//! Every setting can be given as a flag or through the environment variable
//! named in its `env` attribute. Defaults come from `ragprobe_core::config`.

use anyhow::{Context, Result};
use clap::Args;
use ragprobe_core::config::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_MODEL, DEFAULT_TOP_K};
use ragprobe_core::llm::{LlmClient, OpenAiClient};
use ragprobe_core::rag::TextFetcher;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Connection settings for the OpenAI-compatible LLM server.
///
/// Accepted before or after the subcommand. clap cannot mark a global flag
/// required, so a missing URL is reported by [`LlmArgs::client`].
#[derive(Args, Debug, Clone)]
pub struct LlmArgs {
    /// Base URL of the LLM server (without /v1)
    #[arg(long, env = "LLM_SERVER_URL", global = true)]
    pub llm_url: Option<String>,

    /// Model name sent with every request
    #[arg(long, env = "LLM_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Bearer token for the LLM server
    #[arg(long, env = "LLM_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
}

impl LlmArgs {
    pub fn client(&self) -> Result<Arc<dyn LlmClient>> {
        let url = self
            .llm_url
            .as_deref()
            .context("LLM server URL is required (--llm-url or LLM_SERVER_URL)")?;
        let mut client = OpenAiClient::new(url).with_model(&self.model);
        if let Some(key) = &self.api_key {
            client = client.with_api_key(key);
        }
        Ok(Arc::new(client))
    }
}

/// Where documents are read from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory (or single file) holding the documents
    #[arg(short, long)]
    pub source: PathBuf,

    /// File extensions to read (comma-separated)
    #[arg(
        long,
        env = "FILE_EXTENSIONS",
        value_delimiter = ',',
        default_value = ".txt,.md"
    )]
    pub extensions: Vec<String>,
}

impl SourceArgs {
    pub fn fetcher(&self) -> TextFetcher {
        TextFetcher::new(&self.extensions)
    }

    pub fn source_str(&self) -> Result<&str> {
        self.source
            .to_str()
            .with_context(|| format!("Source path is not valid UTF-8: {}", self.source.display()))
    }
}

/// Settings of the reference retrieval pipeline used during evaluation.
#[derive(Args, Debug, Clone)]
pub struct RetrievalArgs {
    /// Chunks retrieved per question
    #[arg(long, env = "TOP_K", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Index chunk size in characters
    #[arg(long, env = "CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Characters shared by adjacent index chunks
    #[arg(long, env = "CHUNK_OVERLAP", default_value_t = DEFAULT_CHUNK_OVERLAP)]
    pub chunk_overlap: usize,

    /// File holding the responder's system prompt; `{context}` is replaced
    /// with the retrieved chunks
    #[arg(long, env = "SYSTEM_PROMPT_TEMPLATE")]
    pub system_prompt_template: Option<PathBuf>,
}

impl RetrievalArgs {
    /// Reads the system prompt template file, if one was given.
    pub fn load_template(&self) -> Result<Option<String>> {
        self.system_prompt_template
            .as_deref()
            .map(read_template)
            .transpose()
    }
}

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read system prompt template: {}", path.display()))
}

/// Arguments of `ragprobe generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Document source type (only "text" is supported)
    #[arg(short, long, default_value = "text")]
    pub mode: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output test-case file
    #[arg(short, long, default_value = "tests.json")]
    pub output: PathBuf,

    /// Maximum number of test cases (0 = no limit)
    #[arg(short, long, default_value_t = 100)]
    pub num: usize,
}

/// Arguments of `ragprobe evaluate`.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Test-case file produced by `generate`
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub retrieval: RetrievalArgs,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        retrieval: RetrievalArgs,
    }

    #[test]
    fn test_missing_llm_url_is_error() {
        let llm = LlmArgs {
            llm_url: None,
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        };
        let err = llm.client().err().unwrap();
        assert!(err.to_string().contains("LLM_SERVER_URL"));
    }

    #[test]
    fn test_extensions_are_comma_separated() {
        let h = Harness::try_parse_from(["t", "--source", "kb", "--extensions", ".md,.rst"]).unwrap();
        assert_eq!(h.source.extensions, vec![".md", ".rst"]);
        assert_eq!(h.source.source_str().unwrap(), "kb");
    }

    #[test]
    fn test_retrieval_defaults() {
        let h = Harness::try_parse_from(["t", "--source", "kb", "--top-k", "3"]).unwrap();
        assert_eq!(h.retrieval.top_k, 3);
        assert_eq!(h.retrieval.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(h.retrieval.load_template().unwrap(), None);
    }

    #[test]
    fn test_template_file_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Use only this: {{context}}").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let h = Harness::try_parse_from(["t", "--source", "kb", "--system-prompt-template", &path])
            .unwrap();
        assert_eq!(
            h.retrieval.load_template().unwrap().as_deref(),
            Some("Use only this: {context}")
        );
    }

    #[test]
    fn test_missing_template_is_error() {
        let h = Harness::try_parse_from([
            "t",
            "--source",
            "kb",
            "--system-prompt-template",
            "/nonexistent/template.txt",
        ])
        .unwrap();
        assert!(h.retrieval.load_template().is_err());
    }
}
