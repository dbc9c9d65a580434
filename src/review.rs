//! End-to-end review flow over a [`Session`].
//!
//! ```text
//! validate ──▶ busy ──▶ extract (progress) ──▶ submit ──▶ results | notice
//! ```
//!
//! Validation happens before anything else, so a blank job description or an
//! empty batch never causes file reads or network traffic. Failures never
//! escape as `Err`: they become a notice on the returned session, exactly as
//! the user would see them.

use crate::batch::{extract_all, extract_observed, ExtractionOutput};
use crate::config::MatcherConfig;
use crate::error::MatchError;
use crate::pipeline::submit::SubmissionClient;
use crate::session::{Action, Session};
use tracing::{info, warn};

/// Run one review: extract every draft, submit once, record the outcome.
pub async fn review(
    session: Session,
    client: &SubmissionClient,
    config: &MatcherConfig,
) -> Session {
    review_observed(session, client, config, |_| {}).await
}

/// [`review`], calling `on_change` with the session after every transition.
///
/// Between `SubmissionStarted` and the outcome the observer sees the session
/// busy ([`crate::ResultView::Loading`]), one progress value per file, then
/// progress back at 0 just before the request is sent.
pub async fn review_observed(
    mut session: Session,
    client: &SubmissionClient,
    config: &MatcherConfig,
    mut on_change: impl FnMut(&Session),
) -> Session {
    if let Err(e) = session.validate() {
        info!("Review refused: {}", e);
        session.dispatch(Action::Rejected(e.to_string()));
        on_change(&session);
        return session;
    }

    let in_flight = match client.try_begin() {
        Ok(guard) => guard,
        Err(e) => {
            session.dispatch(Action::Rejected(e.to_string()));
            on_change(&session);
            return session;
        }
    };

    session.dispatch(Action::SubmissionStarted);
    on_change(&session);

    let drafts = session.drafts().to_vec();
    let output = extract_observed(&drafts, config, |event| {
        session.dispatch(Action::ExtractionProgress(event.percent));
        on_change(&session);
    })
    .await;
    // Batch recorded: ready to submit.
    session.dispatch(Action::ExtractionProgress(0));
    on_change(&session);

    let job_description = session.job_description().to_string();
    match in_flight.send(&job_description, &output.resumes).await {
        Ok(results) => session.dispatch(Action::SubmissionSucceeded(results)),
        Err(e) => {
            warn!("Submission failed: {}", e);
            session.dispatch(Action::SubmissionFailed(e.to_string()));
        }
    }
    on_change(&session);
    session
}

/// Extract the session's drafts without contacting the scoring service.
pub async fn extract_only(
    session: &Session,
    config: &MatcherConfig,
) -> Result<ExtractionOutput, MatchError> {
    if session.drafts().is_empty() {
        return Err(MatchError::NoResumes);
    }
    Ok(extract_all(session.drafts(), config).await)
}
