//! Review session state and its pure update function.
//!
//! A [`Session`] holds everything a review screen needs: the job
//! description, the selected drafts, the last result set, the busy flag,
//! the extraction percentage and the latest user-facing notice. It only
//! changes through [`Session::apply`], which consumes the old state and
//! returns the new one, so every transition can be tested without any
//! rendering environment.

use crate::config::MatcherConfig;
use crate::error::MatchError;
use crate::model::{MatchResult, ResumeDraft};
use crate::pipeline::render::ResultView;
use crate::pipeline::submit;
use serde::Serialize;
use tracing::{debug, warn};

/// A user-facing message produced by the last transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notice {
    /// The action was refused and nothing changed.
    Warning(String),
    /// The submission failed; results and drafts were kept.
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

/// Every event that can change a [`Session`].
#[derive(Debug, Clone)]
pub enum Action {
    SetJobDescription(String),
    /// Append a newly selected batch; all-or-nothing under the cap.
    AddDrafts(Vec<ResumeDraft>),
    /// Drop the draft at this 0-indexed position.
    RemoveDraft(usize),
    /// Overall extraction percentage.
    ExtractionProgress(u8),
    SubmissionStarted,
    /// Replace the result set wholesale.
    SubmissionSucceeded(Vec<MatchResult>),
    SubmissionFailed(String),
    /// A trigger refused before any I/O.
    Rejected(String),
}

/// Explicit state of one review screen.
#[derive(Debug, Clone)]
pub struct Session {
    job_description: String,
    drafts: Vec<ResumeDraft>,
    results: Vec<MatchResult>,
    busy: bool,
    progress: u8,
    notice: Option<Notice>,
    max_resumes: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&MatcherConfig::default())
    }
}

impl Session {
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            job_description: String::new(),
            drafts: Vec::new(),
            results: Vec::new(),
            busy: false,
            progress: 0,
            notice: None,
            max_resumes: config.max_resumes,
        }
    }

    /// Apply one action and return the resulting state.
    ///
    /// The previous notice is cleared by every action.
    pub fn apply(mut self, action: Action) -> Self {
        self.notice = None;
        match action {
            Action::SetJobDescription(text) => {
                self.job_description = text;
            }
            Action::AddDrafts(batch) => {
                if let Err(e) = self.check_capacity(batch.len()) {
                    warn!("Rejected batch of {} resumes: {}", batch.len(), e);
                    self.notice = Some(Notice::Warning(e.to_string()));
                } else {
                    debug!("Added {} resumes", batch.len());
                    self.drafts.extend(batch);
                }
            }
            Action::RemoveDraft(index) => {
                if index < self.drafts.len() {
                    let removed = self.drafts.remove(index);
                    debug!("Removed resume {} ({})", index, removed.name);
                } else {
                    self.notice = Some(Notice::Warning(format!(
                        "No resume at position {} ({} selected)",
                        index + 1,
                        self.drafts.len()
                    )));
                }
            }
            Action::ExtractionProgress(percent) => {
                self.progress = percent.min(100);
            }
            Action::SubmissionStarted => {
                self.busy = true;
                self.progress = 0;
            }
            Action::SubmissionSucceeded(results) => {
                self.results = results;
                self.drafts.clear();
                self.busy = false;
                self.progress = 0;
            }
            Action::SubmissionFailed(message) => {
                self.notice = Some(Notice::Error(message));
                self.busy = false;
                self.progress = 0;
            }
            Action::Rejected(message) => {
                self.notice = Some(Notice::Warning(message));
            }
        }
        self
    }

    /// In-place form of [`Session::apply`] for callers holding `&mut Session`.
    pub fn dispatch(&mut self, action: Action) {
        *self = std::mem::take(self).apply(action);
    }

    fn check_capacity(&self, incoming: usize) -> Result<(), MatchError> {
        match self.max_resumes {
            Some(max) if self.drafts.len() + incoming > max => Err(MatchError::TooManyResumes {
                max,
                current: self.drafts.len(),
                incoming,
            }),
            _ => Ok(()),
        }
    }

    /// Why a submission would be refused right now, if it would be.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.busy {
            return Err(MatchError::SubmissionInFlight);
        }
        submit::validate(&self.job_description, self.drafts.len())
    }

    /// Whether the submit trigger is enabled.
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn drafts(&self) -> &[ResumeDraft] {
        &self.drafts
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn max_resumes(&self) -> Option<usize> {
        self.max_resumes
    }

    /// The result area's current state.
    pub fn view(&self) -> ResultView<'_> {
        ResultView::project(&self.results, self.busy)
    }

    /// `N resume(s) uploaded` or `No resumes uploaded yet`.
    pub fn status_line(&self) -> String {
        if self.drafts.is_empty() {
            "No resumes uploaded yet".to_string()
        } else {
            format!("{} resume(s) uploaded", self.drafts.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drafts(n: usize) -> Vec<ResumeDraft> {
        (0..n)
            .map(|i| ResumeDraft::from_bytes(format!("r{i}.txt"), b"x".to_vec()))
            .collect()
    }

    fn names(s: &Session) -> Vec<String> {
        s.drafts().iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn cap_rejects_whole_batch() {
        let s = Session::default().apply(Action::AddDrafts(drafts(48)));
        let before = names(&s);
        let s = s.apply(Action::AddDrafts(drafts(3)));
        assert_eq!(names(&s), before);
        assert!(matches!(s.notice(), Some(Notice::Warning(m)) if m.contains("Max 50")));

        let s = s.apply(Action::AddDrafts(drafts(2)));
        assert_eq!(s.drafts().len(), 50);
        assert!(s.notice().is_none());
    }

    #[test]
    fn unbounded_when_cap_disabled() {
        let config = MatcherConfig::builder().max_resumes(None).build().unwrap();
        let s = Session::new(&config).apply(Action::AddDrafts(drafts(120)));
        assert_eq!(s.drafts().len(), 120);
    }

    #[test]
    fn remove_by_index() {
        let s = Session::default()
            .apply(Action::AddDrafts(drafts(3)))
            .apply(Action::RemoveDraft(1));
        assert_eq!(names(&s), vec!["r0.txt", "r2.txt"]);

        let s = s.apply(Action::RemoveDraft(9));
        assert_eq!(s.drafts().len(), 2);
        assert!(s.notice().is_some());
    }

    #[test]
    fn duplicate_names_allowed() {
        let s = Session::default()
            .apply(Action::AddDrafts(drafts(1)))
            .apply(Action::AddDrafts(drafts(1)));
        assert_eq!(names(&s), vec!["r0.txt", "r0.txt"]);
    }

    #[test]
    fn can_submit_requires_jd_and_drafts() {
        let s = Session::default();
        assert!(!s.can_submit());
        let s = s.apply(Action::SetJobDescription("   ".into()));
        let s = s.apply(Action::AddDrafts(drafts(1)));
        assert!(matches!(s.validate(), Err(MatchError::MissingJobDescription)));
        let s = s.apply(Action::SetJobDescription("Backend".into()));
        assert!(s.can_submit());
        let s = s.apply(Action::SubmissionStarted);
        assert!(!s.can_submit());
    }

    #[test]
    fn success_replaces_results_and_clears_drafts() {
        let first = vec![MatchResult {
            resume_name: "old".into(),
            score: 0.1,
        }];
        let second = vec![MatchResult {
            resume_name: "new".into(),
            score: 0.2,
        }];
        let s = Session::default()
            .apply(Action::AddDrafts(drafts(1)))
            .apply(Action::SubmissionStarted)
            .apply(Action::SubmissionSucceeded(first))
            .apply(Action::SubmissionSucceeded(second.clone()));
        assert_eq!(s.results(), second.as_slice());
        assert!(s.drafts().is_empty());
        assert!(!s.is_busy());
    }

    #[test]
    fn failure_keeps_results_and_drafts() {
        let prior = vec![MatchResult {
            resume_name: "kept".into(),
            score: 0.5,
        }];
        let s = Session::default()
            .apply(Action::SubmissionSucceeded(prior.clone()))
            .apply(Action::AddDrafts(drafts(2)))
            .apply(Action::SubmissionStarted)
            .apply(Action::ExtractionProgress(100))
            .apply(Action::SubmissionFailed("boom".into()));
        assert_eq!(s.results(), prior.as_slice());
        assert_eq!(s.drafts().len(), 2);
        assert!(!s.is_busy());
        assert_eq!(s.progress(), 0);
        assert_eq!(s.notice(), Some(&Notice::Error("boom".into())));
    }

    #[test]
    fn view_and_status_line() {
        let s = Session::default();
        assert_eq!(s.view(), ResultView::Empty);
        assert_eq!(s.status_line(), "No resumes uploaded yet");
        let s = s.apply(Action::AddDrafts(drafts(2))).apply(Action::SubmissionStarted);
        assert_eq!(s.view(), ResultView::Loading);
        assert_eq!(s.status_line(), "2 resume(s) uploaded");
    }

    #[test]
    fn dispatch_in_place() {
        let mut s = Session::default();
        s.dispatch(Action::SetJobDescription("Go".into()));
        s.dispatch(Action::ExtractionProgress(150));
        assert_eq!(s.job_description(), "Go");
        assert_eq!(s.progress(), 100);
    }
}
