//! Result rendering: a pure projection of the result set and busy flag.
//!
//! No sorting or filtering happens here; results appear exactly in the
//! order the scoring service returned them.

use crate::error::MatchError;
use crate::model::MatchResult;

pub const LOADING_MESSAGE: &str = "Analyzing resumes, please wait...";
pub const EMPTY_MESSAGE: &str = "No Results yet.";

/// The three mutually exclusive result states.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView<'a> {
    Loading,
    Populated(&'a [MatchResult]),
    Empty,
}

impl<'a> ResultView<'a> {
    /// Busy wins over results; an empty set is the placeholder state.
    pub fn project(results: &'a [MatchResult], busy: bool) -> Self {
        if busy {
            ResultView::Loading
        } else if results.is_empty() {
            ResultView::Empty
        } else {
            ResultView::Populated(results)
        }
    }

    /// Plain-text rendering, one line per result.
    pub fn render_text(&self) -> String {
        match self {
            ResultView::Loading => LOADING_MESSAGE.to_string(),
            ResultView::Empty => EMPTY_MESSAGE.to_string(),
            ResultView::Populated(results) => results
                .iter()
                .map(render_line)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// `<name> → Score: <percent, 2 decimals>%`
pub fn render_line(result: &MatchResult) -> String {
    format!("{} → Score: {:.2}%", result.resume_name, result.percent())
}

/// Results as a pretty JSON array in the wire shape.
pub fn render_json(results: &[MatchResult]) -> Result<String, MatchError> {
    serde_json::to_string_pretty(results)
        .map_err(|e| MatchError::Internal(format!("Failed to serialise results: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, score: f64) -> MatchResult {
        MatchResult {
            resume_name: name.into(),
            score,
        }
    }

    #[test]
    fn line_format() {
        assert_eq!(render_line(&result("resume1.txt", 0.87)), "resume1.txt → Score: 87.00%");
        assert_eq!(render_line(&result("x.pdf", 0.0)), "x.pdf → Score: 0.00%");
        assert_eq!(render_line(&result("y.pdf", 1.0)), "y.pdf → Score: 100.00%");
    }

    #[test]
    fn three_states() {
        let rs = vec![result("b", 0.1), result("a", 0.9)];
        assert_eq!(ResultView::project(&rs, true), ResultView::Loading);
        assert_eq!(ResultView::project(&[], false), ResultView::Empty);
        assert_eq!(ResultView::project(&rs, false), ResultView::Populated(&rs));
    }

    #[test]
    fn populated_keeps_received_order() {
        let rs = vec![result("b", 0.1), result("a", 0.9)];
        let text = ResultView::project(&rs, false).render_text();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["b → Score: 10.00%", "a → Score: 90.00%"]);
    }

    #[test]
    fn placeholder_texts() {
        assert_eq!(ResultView::Loading.render_text(), LOADING_MESSAGE);
        assert_eq!(ResultView::Empty.render_text(), EMPTY_MESSAGE);
    }

    #[test]
    fn json_uses_wire_shape() {
        let json = render_json(&[result("a.pdf", 0.5)]).unwrap();
        assert!(json.contains("\"Resume\": \"a.pdf\""));
        assert!(json.contains("\"Score\": 0.5"));
    }
}
