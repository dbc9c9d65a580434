//! Error types for the resume-matcher library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`MatchError`] — **Fatal** for one operation: a review cannot proceed
//!   (missing job description, no resumes, scoring service unreachable,
//!   unreadable response). Returned as `Err(MatchError)` from the submission
//!   client and the draft constructors.
//!
//! * [`ExtractionError`] — **Non-fatal**: a single resume could not be read
//!   or parsed, but every other resume in the batch is fine. Stored inside
//!   [`crate::model::ExtractedResume`] and its display string doubles as the
//!   placeholder text submitted for that resume.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the resume-matcher library.
///
/// Per-file extraction failures use [`ExtractionError`] and never surface here.
#[derive(Debug, Error)]
pub enum MatchError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Resume file was not found at the given path.
    #[error("Resume file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Validation errors ─────────────────────────────────────────────────
    /// The job description is empty or whitespace only.
    #[error("Please enter a job description and upload at least one resume.")]
    MissingJobDescription,

    /// No resumes were selected.
    #[error("Please enter a job description and upload at least one resume.")]
    NoResumes,

    /// Adding the new batch would exceed the configured cap.
    #[error("Max {max} resumes allowed ({current} selected, {incoming} more requested)")]
    TooManyResumes {
        max: usize,
        current: usize,
        incoming: usize,
    },

    /// A submission is already running; the trigger is disabled until it ends.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    // ── Scoring service errors ────────────────────────────────────────────
    /// The request never produced a response (connection refused, DNS, TLS…).
    #[error("Request to '{endpoint}' failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("Request to '{endpoint}' timed out after {secs}s")]
    RequestTimeout { endpoint: String, secs: u64 },

    /// The service answered with a non-2xx status.
    #[error("Scoring service returned HTTP {status}: {body}")]
    ServerError { status: u16, body: String },

    /// The service answered 2xx but the body is not a result set.
    #[error("Malformed response from scoring service: {detail}")]
    MalformedResponse { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MatchError {
    /// `true` for errors raised before any I/O took place.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MatchError::MissingJobDescription
                | MatchError::NoResumes
                | MatchError::TooManyResumes { .. }
                | MatchError::SubmissionInFlight
        )
    }
}

/// A non-fatal error for a single resume.
///
/// The `Display` output is exactly the placeholder text that replaces the
/// resume's content in the submitted payload.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum ExtractionError {
    /// The file bytes could not be read.
    #[error("Error reading file: {detail}")]
    ReadFailed { detail: String },

    /// The PDF document could not be opened.
    #[error("Error extracting text: {detail}")]
    PdfLoadFailed { detail: String },

    /// One page of an otherwise readable PDF failed to yield text.
    #[error("Error extracting text: page {page}: {detail}")]
    PageFailed { page: u32, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_resumes_display() {
        let e = MatchError::TooManyResumes {
            max: 50,
            current: 48,
            incoming: 3,
        };
        let msg = e.to_string();
        assert!(msg.contains("Max 50"), "got: {msg}");
        assert!(e.is_validation());
    }

    #[test]
    fn server_error_display() {
        let e = MatchError::ServerError {
            status: 502,
            body: "bad gateway".into(),
        };
        assert!(e.to_string().contains("HTTP 502"));
        assert!(!e.is_validation());
    }

    #[test]
    fn timeout_display() {
        let e = MatchError::RequestTimeout {
            endpoint: "http://localhost:8000/review".into(),
            secs: 30,
        };
        assert!(e.to_string().contains("30s"));
    }

    #[test]
    fn extraction_error_is_placeholder_text() {
        let e = ExtractionError::PdfLoadFailed {
            detail: "invalid file header".into(),
        };
        assert_eq!(e.to_string(), "Error extracting text: invalid file header");

        let e = ExtractionError::ReadFailed {
            detail: "permission denied".into(),
        };
        assert!(e.to_string().starts_with("Error reading file"));
    }
}
