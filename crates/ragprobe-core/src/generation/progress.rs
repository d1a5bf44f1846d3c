//! Progress reporting for test-case generation.
//!
//! A [`GenerationProgress`] snapshot is handed to the caller's observer once
//! per accepted test case, which is enough to drive a progress bar.

use crate::types::Category;
use std::time::Instant;

/// Snapshot of a generation run, emitted after each accepted test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationProgress {
    /// Test cases accepted so far
    pub accepted: usize,
    /// Cap on accepted test cases (0 = unbounded)
    pub max_tests: usize,
    /// Category of the test case that was just accepted
    pub category: Category,
    /// Windows sent to the synthesizer so far
    pub windows_processed: usize,
    /// Windows whose synthesis failed and were skipped
    pub windows_failed: usize,
    /// Time elapsed since the run started (milliseconds)
    pub elapsed_ms: u64,
}

impl GenerationProgress {
    /// Returns the completion percentage (0.0 to 100.0), or `None` when the
    /// run has no cap.
    pub fn percent_complete(&self) -> Option<f64> {
        if self.max_tests == 0 {
            None
        } else {
            Some((self.accepted as f64 / self.max_tests as f64) * 100.0)
        }
    }

    /// Accepted test cases per window processed.
    pub fn yield_per_window(&self) -> f64 {
        if self.windows_processed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.windows_processed as f64
        }
    }
}

/// Helper for tracking elapsed time during a run.
pub(crate) struct ProgressTimer {
    start: Instant,
}

impl ProgressTimer {
    pub(crate) fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
