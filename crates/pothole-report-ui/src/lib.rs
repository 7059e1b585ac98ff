#![warn(missing_docs)]
//! # pothole-report-ui
//!
//! ## Purpose
//! Defines the view router and the UI-facing result state for
//! `pothole-report`.
//!
//! ## Responsibilities
//! - Select exactly one of the capture / success / status-lookup / history
//!   views at a time.
//! - Hold the displayed results, status record, history list, and the
//!   view-level error message.
//! - Gate re-entrant orchestrator runs through per-action in-flight flags.
//!
//! ## Data flow
//! Orchestrator outcomes mutate [`UiState`], which drives what the shell
//! renders; explicit back navigation clears the leaving view's working data.
//!
//! ## Ownership and lifetimes
//! `UiState` owns all displayed values so reducers never borrow from
//! transient orchestrator state.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors; invalid
//! transitions are prevented by the mutation methods.
//!
//! ## Security and privacy notes
//! UI state intentionally excludes secrets (tokens, raw image bytes).

use pothole_report_contract::{AnalysisResult, SubmissionRecord};

/// The mutually exclusive top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Image selection and submission (initial and post-reset landing view).
    #[default]
    Capture,
    /// Tracking details after a completed submission.
    Success,
    /// Single-report status lookup.
    StatusLookup,
    /// The signed-in user's prior submissions.
    History,
}

/// Aggregate view-layer state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UiState {
    /// App version string sourced from root `VERSION`.
    pub version: String,
    /// Currently rendered view.
    pub view: View,
    /// View-level error message, if any.
    pub error: Option<String>,
    /// Submission in flight; gates re-entrant `submit()` runs.
    pub submitting: bool,
    /// Status lookup in flight.
    pub looking_up: bool,
    /// History fetch in flight.
    pub loading_history: bool,
    /// Results displayed on the success view, in received order.
    pub results: Vec<AnalysisResult>,
    /// Single record displayed on the status-lookup view.
    pub status_result: Option<SubmissionRecord>,
    /// Records displayed on the history view.
    pub reports: Vec<SubmissionRecord>,
}

impl UiState {
    /// Creates initial state on the capture view.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }

    /// Sets the view-level error message.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Clears the view-level error message.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Marks a submission as in flight.
    ///
    /// Returns `false` when one is already running, in which case the
    /// caller must not start another.
    pub fn begin_submission(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Clears the submission in-flight flag.
    pub fn finish_submission(&mut self) {
        self.submitting = false;
    }

    /// Marks a status lookup as in flight; `false` when one already is.
    pub fn begin_lookup(&mut self) -> bool {
        if self.looking_up {
            return false;
        }
        self.looking_up = true;
        true
    }

    /// Clears the lookup in-flight flag.
    pub fn finish_lookup(&mut self) {
        self.looking_up = false;
    }

    /// Marks a history fetch as in flight; `false` when one already is.
    pub fn begin_history(&mut self) -> bool {
        if self.loading_history {
            return false;
        }
        self.loading_history = true;
        true
    }

    /// Clears the history in-flight flag.
    pub fn finish_history(&mut self) {
        self.loading_history = false;
    }

    /// Replaces displayed results and transitions to the success view.
    ///
    /// Only a completed submission run may call this.
    pub fn show_success(&mut self, results: Vec<AnalysisResult>) {
        self.results = results;
        self.view = View::Success;
    }

    /// Opens the status-lookup view via explicit user navigation.
    pub fn open_status_lookup(&mut self) {
        self.view = View::StatusLookup;
    }

    /// Replaces the single displayed status record.
    pub fn show_status_result(&mut self, record: SubmissionRecord) {
        self.status_result = Some(record);
    }

    /// Replaces the history list wholesale and transitions to history.
    pub fn show_history(&mut self, reports: Vec<SubmissionRecord>) {
        self.reports = reports;
        self.view = View::History;
    }

    /// Returns to the capture view, clearing the leaving view's data.
    ///
    /// Leaving the success view clears the displayed results; leaving the
    /// status-lookup view clears the displayed record; leaving history
    /// clears nothing. Returns the view that was left so the caller can
    /// reset companion state (the capture set, after success).
    pub fn back_to_capture(&mut self) -> View {
        let leaving = self.view;
        match leaving {
            View::Success => self.results.clear(),
            View::StatusLookup => self.status_result = None,
            View::History | View::Capture => {}
        }
        self.view = View::Capture;
        leaving
    }
}
