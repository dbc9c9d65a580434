//! # resume-matcher
//!
//! Score a batch of resumes against a job description using a remote
//! matching service.
//!
//! The scoring itself happens elsewhere: this crate turns resume files (PDF
//! or plain text) into text locally, sends the job description and every
//! resume text to the service in a single multipart request, and renders the
//! scores it returns.
//!
//! ## Pipeline Overview
//!
//! ```text
//! files
//!  │
//!  ├─ 1. Select   paths → drafts (capped at 50 by default)
//!  ├─ 2. Extract  PDF text layer via lopdf (spawn_blocking) or plain text
//!  ├─ 3. Progress round(completed/total*100) after every file
//!  ├─ 4. Submit   one POST: `jd` + `resumesData` (JSON)
//!  └─ 5. Render   loading / results in received order / empty
//! ```
//!
//! A file that cannot be read or parsed does not stop the batch; its text is
//! replaced by an error message and scoring goes ahead for everything else.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_matcher::{review, Action, MatcherConfig, ResumeDraft, Session, SubmissionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MatcherConfig::default(); // http://localhost:8000/review
//!     let client = SubmissionClient::new(&config)?;
//!
//!     let session = Session::new(&config)
//!         .apply(Action::SetJobDescription("Senior Backend Engineer".into()))
//!         .apply(Action::AddDrafts(vec![ResumeDraft::from_path("resume1.txt")?]));
//!
//!     let session = review(session, &client, &config).await;
//!     println!("{}", session.view().render_text());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume-match` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod progress;
pub mod review;
pub mod session;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use batch::{extract_all, extract_sync, ExtractionOutput, ExtractionStats};
pub use config::{ExtractionMode, MatcherConfig, MatcherConfigBuilder, DEFAULT_ENDPOINT};
pub use error::{ExtractionError, MatchError};
pub use model::{ContentKind, DraftSource, ExtractedResume, MatchResult, ResumeDraft};
pub use pipeline::render::{render_json, render_line, ResultView};
pub use pipeline::submit::SubmissionClient;
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use review::{extract_only, review, review_observed};
pub use session::{Action, Notice, Session};
pub use stream::{extract_stream, ExtractionEvent, ExtractionStream};
