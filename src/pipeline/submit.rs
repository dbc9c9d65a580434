//! Submission client: the single multipart request to the scoring service.
//!
//! The form carries two fields:
//!
//! | Field         | Content |
//! |---------------|---------|
//! | `jd`          | job description, plain text |
//! | `resumesData` | JSON array of `{name, text, size}` in upload order |
//!
//! The response body is a JSON array of `{"Resume": .., "Score": ..}`.
//!
//! ## Busy flag
//!
//! Only one submission may be in flight per client. [`SubmissionClient::try_begin`]
//! claims the flag and returns an [`InFlight`] guard; dropping the guard
//! releases it on every exit path, success or error. Nothing is retried: a
//! failed request surfaces once and the caller decides whether to try again.

use crate::config::MatcherConfig;
use crate::error::MatchError;
use crate::model::{ExtractedResume, MatchResult};
use reqwest::multipart::Form;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Longest slice of an error body kept in [`MatchError::ServerError`].
const MAX_ERROR_BODY: usize = 512;

/// HTTP client bound to one scoring endpoint.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    endpoint: String,
    timeout_secs: u64,
    busy: Arc<AtomicBool>,
}

impl SubmissionClient {
    pub fn new(config: &MatcherConfig) -> Result<Self, MatchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| MatchError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            timeout_secs: config.request_timeout_secs,
            busy: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `true` while a submission holds the busy flag.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Claim the busy flag, or fail without touching the network.
    pub fn try_begin(&self) -> Result<InFlight<'_>, MatchError> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| MatchError::SubmissionInFlight)?;
        Ok(InFlight { client: self })
    }

    /// Validate, claim the busy flag and send in one step.
    pub async fn submit(
        &self,
        job_description: &str,
        resumes: &[ExtractedResume],
    ) -> Result<Vec<MatchResult>, MatchError> {
        validate(job_description, resumes.len())?;
        self.try_begin()?.send(job_description, resumes).await
    }
}

/// Proof that the busy flag is held; releases it on drop.
#[derive(Debug)]
pub struct InFlight<'a> {
    client: &'a SubmissionClient,
}

impl InFlight<'_> {
    /// Issue the POST and parse the result set.
    ///
    /// Validation is repeated here so that no request with an empty job
    /// description or zero resumes can ever leave the process.
    pub async fn send(
        self,
        job_description: &str,
        resumes: &[ExtractedResume],
    ) -> Result<Vec<MatchResult>, MatchError> {
        validate(job_description, resumes.len())?;

        let endpoint = &self.client.endpoint;
        let form = build_form(job_description, resumes)?;
        info!("Submitting {} resumes to {}", resumes.len(), endpoint);
        let start = Instant::now();

        let response = self
            .client
            .http
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.request_error(e))?;
        debug!(
            "Scoring service answered {} ({} bytes) in {}ms",
            status,
            body.len(),
            start.elapsed().as_millis()
        );

        if !status.is_success() {
            warn!("Scoring service returned HTTP {}", status);
            return Err(MatchError::ServerError {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let results = parse_response(&body)?;
        info!("Received {} match results", results.len());
        Ok(results)
    }

    fn request_error(&self, e: reqwest::Error) -> MatchError {
        if e.is_timeout() {
            MatchError::RequestTimeout {
                endpoint: self.client.endpoint.clone(),
                secs: self.client.timeout_secs,
            }
        } else {
            MatchError::RequestFailed {
                endpoint: self.client.endpoint.clone(),
                reason: e.to_string(),
            }
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.client.busy.store(false, Ordering::SeqCst);
    }
}

/// Reject a submission that has nothing to score.
pub fn validate(job_description: &str, resume_count: usize) -> Result<(), MatchError> {
    if job_description.trim().is_empty() {
        return Err(MatchError::MissingJobDescription);
    }
    if resume_count == 0 {
        return Err(MatchError::NoResumes);
    }
    Ok(())
}

#[derive(Serialize)]
struct ResumePayload<'a> {
    name: &'a str,
    text: &'a str,
    size: u64,
}

/// The `resumesData` field: JSON array of `{name, text, size}`.
pub fn encode_resumes(resumes: &[ExtractedResume]) -> Result<String, MatchError> {
    let payload: Vec<ResumePayload<'_>> = resumes
        .iter()
        .map(|r| ResumePayload {
            name: &r.name,
            text: &r.text,
            size: r.size_bytes,
        })
        .collect();
    serde_json::to_string(&payload)
        .map_err(|e| MatchError::Internal(format!("Failed to encode resumes: {e}")))
}

fn build_form(job_description: &str, resumes: &[ExtractedResume]) -> Result<Form, MatchError> {
    Ok(Form::new()
        .text("jd", job_description.to_string())
        .text("resumesData", encode_resumes(resumes)?))
}

/// Parse a response body into match results, preserving order.
pub fn parse_response(body: &str) -> Result<Vec<MatchResult>, MatchError> {
    serde_json::from_str(body).map_err(|e| MatchError::MalformedResponse {
        detail: e.to_string(),
    })
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}\u{2026}", &s[..end])
}
