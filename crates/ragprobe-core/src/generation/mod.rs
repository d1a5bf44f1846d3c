//! Test-case generation.
//!
//! Documents are cut into overlapping windows, the generation LLM proposes
//! questions for each window, and only questions grounded in their window are
//! kept.
//!
//! - [`grounding`]: pure acceptance checks for a candidate question
//! - [`QuestionSynthesizer`]: prompt, parse and validate for one window
//! - [`TestGenerator`]: the orchestrator over all documents and windows

mod generator;
pub mod grounding;
mod progress;
mod synthesizer;

pub use generator::TestGenerator;
pub use grounding::Rejection;
pub use progress::GenerationProgress;
pub use synthesizer::QuestionSynthesizer;

use crate::config::{
    DEFAULT_CONTEXT_OVERLAP, DEFAULT_CONTEXT_SIZE, DEFAULT_QUESTIONS_PER_WINDOW,
    GENERATION_TEMPERATURE,
};
use crate::error::ConfigError;
use crate::types::Category;
use crate::windowing::validate_window;

/// Settings for a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Questions requested from the LLM per window
    pub questions_per_window: usize,
    /// Window size in characters
    pub context_size: usize,
    /// Characters shared by adjacent windows (must be < `context_size`)
    pub context_overlap: usize,
    /// Allowed categories; empty accepts all
    pub categories: Vec<Category>,
    /// Cap on accepted questions; 0 = unbounded
    pub max_tests: usize,
    /// Sampling temperature for the generation LLM
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            questions_per_window: DEFAULT_QUESTIONS_PER_WINDOW,
            context_size: DEFAULT_CONTEXT_SIZE,
            context_overlap: DEFAULT_CONTEXT_OVERLAP,
            categories: Category::ALL.to_vec(),
            max_tests: 0,
            temperature: GENERATION_TEMPERATURE,
        }
    }
}

impl GenerationConfig {
    /// Checks the windowing parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_window(self.context_size, self.context_overlap)
    }

    /// True once `accepted` has reached a nonzero cap.
    pub fn is_capped(&self, accepted: usize) -> bool {
        self.max_tests > 0 && accepted >= self.max_tests
    }
}
