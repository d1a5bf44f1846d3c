//! Generation orchestrator.

use super::progress::{GenerationProgress, ProgressTimer};
use super::synthesizer::QuestionSynthesizer;
use super::GenerationConfig;
use crate::error::ConfigError;
use crate::llm::LlmClient;
use crate::types::{Document, TestQuestion};
use crate::windowing::context_windows;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Drives the synthesizer over every window of every document.
///
/// Per-window failures are logged and skipped; a run only fails on invalid
/// configuration or an empty document list, both checked before any LLM call.
///
/// # Example
///
/// ```ignore
/// use ragprobe_core::generation::{GenerationConfig, TestGenerator};
///
/// let generator = TestGenerator::new(Arc::new(client));
/// let tests = generator
///     .generate(&documents, &GenerationConfig::default(), |p| {
///         println!("{} accepted", p.accepted)
///     })
///     .await?;
/// ```
pub struct TestGenerator {
    synthesizer: QuestionSynthesizer,
}

impl TestGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            synthesizer: QuestionSynthesizer::new(client),
        }
    }

    /// Generates grounded test questions from `documents`.
    ///
    /// Documents are processed in input order. Generation stops as soon as
    /// `config.max_tests` questions are accepted (0 = unbounded).
    /// `on_progress` is called exactly once per accepted question.
    #[instrument(skip_all, fields(documents = documents.len(), max_tests = config.max_tests))]
    pub async fn generate<F>(
        &self,
        documents: &[Document],
        config: &GenerationConfig,
        mut on_progress: F,
    ) -> Result<Vec<TestQuestion>, ConfigError>
    where
        F: FnMut(&GenerationProgress),
    {
        config.validate()?;
        if documents.is_empty() {
            return Err(ConfigError::NoDocuments);
        }

        let timer = ProgressTimer::new();
        let mut tests: Vec<TestQuestion> = Vec::new();
        let mut windows_processed = 0;
        let mut windows_failed = 0;

        'documents: for doc in documents {
            if config.is_capped(tests.len()) {
                break;
            }
            if doc.content.trim().is_empty() {
                debug!("Skipping blank document {}", doc.id);
                continue;
            }

            let windows =
                context_windows(&doc.id, &doc.content, config.context_size, config.context_overlap)?;
            debug!("Document {}: {} windows", doc.id, windows.len());

            for window in &windows {
                if config.is_capped(tests.len()) {
                    break 'documents;
                }

                windows_processed += 1;
                let accepted = match self.synthesizer.synthesize(window, config).await {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        windows_failed += 1;
                        warn!(
                            "Skipping window {} of {}: {}",
                            window.index, doc.id, e
                        );
                        continue;
                    }
                };

                for question in accepted {
                    if config.is_capped(tests.len()) {
                        break 'documents;
                    }
                    let category = question.category;
                    tests.push(question);
                    on_progress(&GenerationProgress {
                        accepted: tests.len(),
                        max_tests: config.max_tests,
                        category,
                        windows_processed,
                        windows_failed,
                        elapsed_ms: timer.elapsed_ms(),
                    });
                }
            }
        }

        info!(
            "Generated {} test cases from {} windows ({} failed) in {}ms",
            tests.len(),
            windows_processed,
            windows_failed,
            timer.elapsed_ms()
        );

        Ok(tests)
    }
}
