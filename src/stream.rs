//! Streaming extraction API: emit resumes as they complete.
//!
//! [`extract_stream`] yields one [`ExtractionEvent`] per draft as soon as
//! that draft is done. In concurrent mode events may arrive out of upload
//! order; every event carries its original `index` so callers can put the
//! batch back in order (as [`crate::batch::extract_all`] does).

use crate::config::MatcherConfig;
use crate::model::{ExtractedResume, ResumeDraft};
use crate::pipeline::extract::extract_resume;
use crate::progress::ProgressTracker;
use futures::stream::{self, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::Stream;

/// One finished draft.
#[derive(Debug, Clone)]
pub struct ExtractionEvent {
    /// 0-indexed position in the upload order.
    pub index: usize,
    pub resume: ExtractedResume,
    /// Overall percentage after this completion.
    pub percent: u8,
}

/// A boxed stream of extraction events.
pub type ExtractionStream = Pin<Box<dyn Stream<Item = ExtractionEvent> + Send>>;

/// Extract a batch, yielding events in completion order.
///
/// `on_batch_start` fires immediately; `on_file_error` and `on_file_complete`
/// fire as each event is produced. The stream never fails: unreadable files
/// arrive as placeholder entries.
///
/// # Example
/// ```rust,no_run
/// use futures::StreamExt;
/// use resume_matcher::{extract_stream, MatcherConfig, ResumeDraft};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let drafts = vec![ResumeDraft::from_path("cv.pdf")?];
/// let mut events = extract_stream(drafts, &MatcherConfig::default());
/// while let Some(ev) = events.next().await {
///     println!("{}% {}", ev.percent, ev.resume.name);
/// }
/// # Ok(())
/// # }
/// ```
pub fn extract_stream(drafts: Vec<ResumeDraft>, config: &MatcherConfig) -> ExtractionStream {
    let total = drafts.len();
    let limit = config.extraction.limit();
    let callback = config.progress_callback.clone();
    let tracker = Arc::new(ProgressTracker::new(total));

    if let Some(ref cb) = callback {
        cb.on_batch_start(total);
    }

    let s = stream::iter(drafts.into_iter().enumerate().map(|(index, draft)| async move {
        let resume = extract_resume(&draft).await;
        (index, resume)
    }))
    .buffer_unordered(limit)
    .map(move |(index, resume)| {
        let percent = tracker.complete_one(|percent| {
            if let Some(ref cb) = callback {
                if let Some(ref e) = resume.error {
                    cb.on_file_error(index, &resume.name, &e.to_string());
                }
                cb.on_file_complete(index, &resume.name, percent);
            }
        });
        ExtractionEvent {
            index,
            resume,
            percent,
        }
    });

    Box::pin(s)
}
