//! Session controller: the single owner of form state.
//!
//! Every mutation replaces whole fields, so a view never observes a new file
//! next to results from an old one. Selecting a category or staging a file
//! clears the previous results before any new submission starts.
//!
//! The controller performs no I/O. [`Session::stage_file`] hands back a
//! [`Submission`] that the caller sends through a transport, then reports the
//! outcome with [`Session::submission_succeeded`] or
//! [`Session::submission_failed`].
//!
//! ```text
//! select_category ──▶ stage_file ──▶ Submission ──▶ transport
//!        ▲                 ▲                            │
//!        │                 │        submission_succeeded / _failed
//!        └─ clears all ────┴─ invalidates older tickets ◀┘
//! ```

use crate::error::{ExtractError, USER_FAILURE_MESSAGE};
use crate::models::{ExtractionRow, ResultSet, StagedFile};

/// Identifies one submission. Only the latest ticket may update the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A submission the caller must perform.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission<F> {
    pub ticket: SubmissionTicket,
    pub file: F,
    pub category_id: String,
}

/// Form state for one user session. `F` is the staged file payload
/// (bytes natively, a browser `File` handle in the frontend).
#[derive(Clone, Debug, PartialEq)]
pub struct Session<F = StagedFile> {
    selected_category: Option<String>,
    staged_file: Option<F>,
    result_set: ResultSet,
    is_submitting: bool,
    last_error: Option<String>,
    generation: u64,
}

impl<F> Default for Session<F> {
    fn default() -> Self {
        Self {
            selected_category: None,
            staged_file: None,
            result_set: ResultSet::default(),
            is_submitting: false,
            last_error: None,
            generation: 0,
        }
    }
}

impl<F: Clone> Session<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a category and reset everything else.
    pub fn select_category(&mut self, id: impl Into<String>) {
        let id = id.into();
        log::info!("Category selected: {}", id);

        self.selected_category = Some(id);
        self.staged_file = None;
        self.result_set = ResultSet::default();
        self.last_error = None;
        self.is_submitting = false;
        self.generation += 1;
    }

    /// Stage (or clear) the file. Returns the submission to perform when a
    /// category is selected and a file was given.
    pub fn stage_file(&mut self, file: Option<F>) -> Option<Submission<F>> {
        self.staged_file = file;
        self.result_set = ResultSet::default();
        self.is_submitting = false;
        self.generation += 1;

        let category_id = self.selected_category.clone()?;
        let file = self.staged_file.clone()?;

        self.is_submitting = true;
        self.last_error = None;

        log::info!("Submitting document for '{}' (ticket {})", category_id, self.generation);

        Some(Submission {
            ticket: SubmissionTicket(self.generation),
            file,
            category_id,
        })
    }

    /// Apply a successful result. Returns false for a stale ticket.
    pub fn submission_succeeded(&mut self, ticket: SubmissionTicket, result_set: ResultSet) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Discarding stale result for ticket {}", ticket.id());
            return false;
        }

        log::info!("Extraction complete: {} rows", result_set.rows.len());
        self.result_set = result_set;
        self.is_submitting = false;
        true
    }

    /// Apply a failure. Returns false for a stale ticket.
    pub fn submission_failed(&mut self, ticket: SubmissionTicket, error: &ExtractError) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Discarding stale failure for ticket {}: {}", ticket.id(), error);
            return false;
        }

        log::error!("Extraction failed: {}", error);
        self.result_set = ResultSet::default();
        self.last_error = Some(USER_FAILURE_MESSAGE.to_string());
        self.is_submitting = false;
        true
    }

    /// Close the error notification.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    fn is_current(&self, ticket: SubmissionTicket) -> bool {
        self.is_submitting && ticket.0 == self.generation
    }
}

impl<F> Session<F> {
    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn staged_file(&self) -> Option<&F> {
        self.staged_file.as_ref()
    }

    pub fn result_set(&self) -> &ResultSet {
        &self.result_set
    }

    pub fn rows(&self) -> &[ExtractionRow] {
        &self.result_set.rows
    }

    pub fn raw_text(&self) -> &str {
        &self.result_set.raw_text
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CATEGORIES, Score};

    fn file(name: &str) -> StagedFile {
        StagedFile::new(name, "image/png", vec![0x89, 0x50, 0x4e, 0x47])
    }

    fn populated() -> ResultSet {
        ResultSet {
            rows: vec![ExtractionRow {
                attribute: "name".into(),
                values: ["A".into(), "A".into(), "A".into()],
                score: Score::Number(0.99),
            }],
            raw_text: "raw".into(),
        }
    }

    fn session_with_results() -> Session {
        let mut session = Session::new();
        session.select_category("passport");
        let submission = session.stage_file(Some(file("a.png"))).unwrap();
        assert!(session.submission_succeeded(submission.ticket, populated()));
        session
    }

    #[test]
    fn test_stage_without_category_does_not_submit() {
        let mut session: Session = Session::new();
        assert!(session.stage_file(Some(file("a.png"))).is_none());
        assert!(!session.is_submitting());
        assert_eq!(session.staged_file().map(|f| f.filename.as_str()), Some("a.png"));
    }

    #[test]
    fn test_stage_with_category_submits_and_clears() {
        let mut session = session_with_results();
        let submission = session.stage_file(Some(file("b.png"))).unwrap();

        assert_eq!(submission.category_id, "passport");
        assert_eq!(submission.file.filename, "b.png");
        assert!(session.is_submitting());
        assert!(session.rows().is_empty());
        assert_eq!(session.raw_text(), "");
    }

    #[test]
    fn test_stage_then_unstage_empties_results_for_every_category() {
        for category in CATEGORIES {
            let mut session: Session = Session::new();
            session.select_category(category.id);
            let submission = session.stage_file(Some(file("a.png"))).unwrap();
            session.submission_succeeded(submission.ticket, populated());

            assert!(session.stage_file(None).is_none());
            assert!(session.result_set().is_empty());
            assert_eq!(session.raw_text(), "");
            assert!(session.staged_file().is_none());
        }
    }

    #[test]
    fn test_new_category_clears_everything() {
        let mut session = session_with_results();
        session.select_category("license");

        assert_eq!(session.selected_category(), Some("license"));
        assert!(session.staged_file().is_none());
        assert!(session.rows().is_empty());
        assert_eq!(session.raw_text(), "");
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_select_category_is_idempotent() {
        let mut once = session_with_results();
        once.select_category("voterid");
        let mut twice = once.clone();
        twice.select_category("voterid");

        assert_eq!(once.selected_category(), twice.selected_category());
        assert_eq!(once.result_set(), twice.result_set());
        assert_eq!(once.staged_file(), twice.staged_file());
        assert_eq!(once.last_error(), twice.last_error());
    }

    #[test]
    fn test_failure_sets_generic_message() {
        let mut session: Session = Session::new();
        session.select_category("passport");
        let submission = session.stage_file(Some(file("a.png"))).unwrap();
        let error = ExtractError::Status { status: 500, status_text: "Internal Server Error".into() };

        assert!(session.submission_failed(submission.ticket, &error));
        assert!(!session.is_submitting());
        assert!(session.rows().is_empty());
        assert_eq!(session.raw_text(), "");
        assert_eq!(session.last_error(), Some(USER_FAILURE_MESSAGE));

        session.dismiss_error();
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_new_submission_clears_previous_error() {
        let mut session: Session = Session::new();
        session.select_category("passport");
        let first = session.stage_file(Some(file("a.png"))).unwrap();
        session.submission_failed(first.ticket, &ExtractError::Transport("refused".into()));

        session.stage_file(Some(file("b.png"))).unwrap();
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_stale_responses_are_discarded() {
        let mut session: Session = Session::new();
        session.select_category("passport");
        let first = session.stage_file(Some(file("a.png"))).unwrap();
        let second = session.stage_file(Some(file("b.png"))).unwrap();

        assert!(!session.submission_succeeded(first.ticket, populated()));
        assert!(session.rows().is_empty());
        assert!(session.is_submitting());

        assert!(session.submission_succeeded(second.ticket, populated()));
        assert_eq!(session.rows().len(), 1);
    }

    #[test]
    fn test_category_change_discards_in_flight_result() {
        let mut session: Session = Session::new();
        session.select_category("passport");
        let submission = session.stage_file(Some(file("a.png"))).unwrap();
        session.select_category("aadhaar");

        assert!(!session.submission_succeeded(submission.ticket, populated()));
        assert!(!session.submission_failed(submission.ticket, &ExtractError::MissingEndpoint));
        assert!(session.rows().is_empty());
        assert!(session.last_error().is_none());
        assert!(!session.is_submitting());
    }
}
