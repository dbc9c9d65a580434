//! Eager (whole-batch) extraction entry points.
//!
//! Waits for every draft, then returns the extracted list in upload order
//! regardless of which file finished first. Use
//! [`crate::stream::extract_stream`] to observe files as they complete.

use crate::config::MatcherConfig;
use crate::error::MatchError;
use crate::model::{ExtractedResume, ResumeDraft};
use crate::stream::{extract_stream, ExtractionEvent};
use futures::StreamExt;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Extracted batch plus summary counters.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutput {
    /// One entry per draft, in upload order.
    pub resumes: Vec<ExtractedResume>,
    pub stats: ExtractionStats,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionStats {
    pub total_files: usize,
    /// Files recorded as placeholder text.
    pub failed_files: usize,
    pub duration_ms: u64,
}

/// Extract every draft and assemble the list in upload order.
pub async fn extract_all(drafts: &[ResumeDraft], config: &MatcherConfig) -> ExtractionOutput {
    extract_observed(drafts, config, |_| {}).await
}

/// Synchronous wrapper around [`extract_all`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    drafts: &[ResumeDraft],
    config: &MatcherConfig,
) -> Result<ExtractionOutput, MatchError> {
    Ok(tokio::runtime::Runtime::new()
        .map_err(|e| MatchError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract_all(drafts, config)))
}

/// [`extract_all`], calling `observe` for each event in completion order.
pub(crate) async fn extract_observed(
    drafts: &[ResumeDraft],
    config: &MatcherConfig,
    mut observe: impl FnMut(&ExtractionEvent),
) -> ExtractionOutput {
    let start = Instant::now();
    let total = drafts.len();
    info!("Extracting {} resumes ({:?})", total, config.extraction);

    let mut events: Vec<ExtractionEvent> = Vec::with_capacity(total);
    let mut stream = extract_stream(drafts.to_vec(), config);
    while let Some(event) = stream.next().await {
        observe(&event);
        events.push(event);
    }

    // Completion order is arbitrary in concurrent mode; upload order is not.
    events.sort_by_key(|e| e.index);
    let resumes: Vec<ExtractedResume> = events.into_iter().map(|e| e.resume).collect();

    let failed = resumes.iter().filter(|r| !r.is_ok()).count();
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, failed);
    }

    let stats = ExtractionStats {
        total_files: total,
        failed_files: failed,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        "Extraction complete: {}/{} resumes, {}ms",
        total - failed,
        total,
        stats.duration_ms
    );

    ExtractionOutput { resumes, stats }
}
