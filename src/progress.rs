//! Progress reporting for batch extraction.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::MatcherConfigBuilder::progress_callback`] to receive
//! events as each resume finishes. The percentage is computed by
//! [`ProgressTracker`] from the number of *completed* files, never from a
//! file's position, so it stays monotonic when files finish out of order.
//!
//! # Example
//!
//! ```rust
//! use resume_matcher::{ExtractionProgressCallback, MatcherConfig};
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! impl ExtractionProgressCallback for Printer {
//!     fn on_file_complete(&self, _index: usize, name: &str, percent: u8) {
//!         eprintln!("{name}: {percent}%");
//!     }
//! }
//!
//! let config = MatcherConfig::builder()
//!     .progress_callback(Arc::new(Printer))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::{Arc, Mutex};

/// Called by the extractor as it processes each resume.
///
/// Implementations must be `Send + Sync`; all methods default to no-ops so
/// callers only override what they care about.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once before the first file is read.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called after every file, successful or not, with the overall percentage.
    ///
    /// # Arguments
    /// * `index`   — 0-indexed position of the file in the upload order
    /// * `name`    — file name
    /// * `percent` — `round(completed / total * 100)`
    fn on_file_complete(&self, index: usize, name: &str, percent: u8) {
        let _ = (index, name, percent);
    }

    /// Called when a file was replaced by a placeholder, before
    /// `on_file_complete` for the same file.
    fn on_file_error(&self, index: usize, name: &str, error: &str) {
        let _ = (index, name, error);
    }

    /// Called once after the whole batch has been recorded.
    fn on_batch_complete(&self, total_files: usize, failed: usize) {
        let _ = (total_files, failed);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::MatcherConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;

/// Completion counter behind the published percentage.
///
/// Counting and publishing happen under one lock so two completions can
/// never publish their percentages in the wrong order.
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    state: Mutex<TrackerState>,
}

#[derive(Debug, Default)]
struct TrackerState {
    completed: usize,
    percent: u8,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            state: Mutex::new(TrackerState::default()),
        }
    }

    /// Record one finished file and run `publish` with the new percentage.
    pub fn complete_one(&self, publish: impl FnOnce(u8)) -> u8 {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.completed = (state.completed + 1).min(self.total);
        state.percent = percent_of(state.completed, self.total);
        publish(state.percent);
        state.percent
    }
}

/// `round(completed / total * 100)`, rounding halves up.
pub fn percent_of(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((completed * 100 + total / 2) / total) as u8
}
