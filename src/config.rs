//! Configuration types for a review run.
//!
//! All behaviour is controlled through [`MatcherConfig`], built via its
//! [`MatcherConfigBuilder`]. Defaults match the scoring service's stock
//! deployment, so `MatcherConfig::default()` works against a local server.

use crate::error::MatchError;
use crate::progress::{ExtractionProgressCallback, ProgressCallback};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Scoring endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/review";

/// Resume cap applied when none is configured.
pub const DEFAULT_MAX_RESUMES: usize = 50;

/// Configuration for extraction and submission.
///
/// # Example
/// ```rust
/// use resume_matcher::{ExtractionMode, MatcherConfig};
///
/// let config = MatcherConfig::builder()
///     .endpoint("http://scoring.internal:8000/review")
///     .extraction(ExtractionMode::Sequential)
///     .max_resumes(None)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct MatcherConfig {
    /// Scoring service URL receiving the multipart POST.
    pub endpoint: String,

    /// Maximum drafts a session may hold. `None` disables the cap. Default: 50.
    pub max_resumes: Option<usize>,

    /// How the batch is extracted. Default: concurrent, four files in flight.
    pub extraction: ExtractionMode,

    /// Timeout for the single scoring request in seconds. Default: 60.
    pub request_timeout_secs: u64,

    /// Optional per-file progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_resumes: Some(DEFAULT_MAX_RESUMES),
            extraction: ExtractionMode::default(),
            request_timeout_secs: 60,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for MatcherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherConfig")
            .field("endpoint", &self.endpoint)
            .field("max_resumes", &self.max_resumes)
            .field("extraction", &self.extraction)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ExtractionProgressCallback>"),
            )
            .finish()
    }
}

impl MatcherConfig {
    /// Create a new builder for `MatcherConfig`.
    pub fn builder() -> MatcherConfigBuilder {
        MatcherConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`MatcherConfig`].
#[derive(Debug)]
pub struct MatcherConfigBuilder {
    config: MatcherConfig,
}

impl MatcherConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn max_resumes(mut self, max: Option<usize>) -> Self {
        self.config.max_resumes = max;
        self
    }

    pub fn extraction(mut self, mode: ExtractionMode) -> Self {
        self.config.extraction = mode;
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: Arc<dyn ExtractionProgressCallback>) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<MatcherConfig, MatchError> {
        let c = &self.config;
        if !(c.endpoint.starts_with("http://") || c.endpoint.starts_with("https://")) {
            return Err(MatchError::InvalidConfig(format!(
                "Endpoint must be an http(s) URL, got '{}'",
                c.endpoint
            )));
        }
        if let ExtractionMode::Concurrent { limit: 0 } = c.extraction {
            return Err(MatchError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        if c.request_timeout_secs == 0 {
            return Err(MatchError::InvalidConfig(
                "Request timeout must be ≥ 1s".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How a batch of drafts is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMode {
    /// One file at a time, in upload order.
    Sequential,
    /// Up to `limit` files in flight; completion order may differ from
    /// upload order but the assembled list never does.
    Concurrent { limit: usize },
}

impl Default for ExtractionMode {
    fn default() -> Self {
        ExtractionMode::Concurrent { limit: 4 }
    }
}

impl ExtractionMode {
    /// Number of files allowed in flight.
    pub fn limit(&self) -> usize {
        match self {
            ExtractionMode::Sequential => 1,
            ExtractionMode::Concurrent { limit } => *limit,
        }
    }
}
