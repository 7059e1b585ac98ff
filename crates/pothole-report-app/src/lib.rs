#![warn(missing_docs)]
//! # pothole-report-app
//!
//! ## Purpose
//! Orchestrates session, capture, API, and view state for `pothole-report`:
//! the submission, status-lookup, and history workflows.
//!
//! ## Responsibilities
//! - Refuse submissions that fail local preconditions before any network
//!   activity.
//! - Acquire a fresh credential through the session guard before every
//!   outbound call and abort when the guard forces a reset.
//! - Interpret service responses into view-state transitions or
//!   user-visible messages.
//! - Drive explicit navigation between the four views.
//!
//! ## Data flow
//! Session restore/sign-in -> image selection + geolocation into capture
//! state -> multipart submission -> analyze response -> success view;
//! lookup/history run the same credential-then-request shape.
//!
//! ## Ownership and lifetimes
//! The controller owns all workflow state; collaborators are injected
//! behind `Arc<dyn Trait>` so shells and tests supply their own.
//!
//! ## Error model
//! Every failure either becomes a view-level message or was already
//! converted into a forced session reset by the guard; orchestrator
//! methods therefore return nothing and never panic.
//!
//! ## Security and privacy notes
//! Tokens live only for the duration of one request and never enter view
//! state or surfaced messages.

use std::sync::Arc;

use pothole_report_api::{ApiClient, TransportError, submission_form};
use pothole_report_capture::{CaptureSet, GeolocationError, GeolocationProvider};
use pothole_report_contract::{
    AnalysisResult, SubmissionRecord, error_detail, error_reason, parse_analyze_response,
    parse_reports_response, parse_status_response, rejection_message,
};
use pothole_report_core::ImageBlob;
use pothole_report_session::{IdentityGateway, SessionGuard};
use pothole_report_ui::{UiState, View};

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("POTHOLE_REPORT_VERSION");

/// Fixed base address of the deployed analysis service.
pub const SERVICE_BASE_URL: &str = "https://pothole-backend-117334135242.us-central1.run.app";

/// Validation message when images or the GPS fix are missing.
pub const MISSING_INPUT_MESSAGE: &str = "Upload images and enable GPS.";
/// Validation message for a blank tracking identifier.
pub const MISSING_TRACKING_ID_MESSAGE: &str = "Enter a Tracking ID";
/// Generic message for transport-level failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error.";
/// Message when the geolocation permission prompt is refused.
pub const GPS_DENIED_MESSAGE: &str = "GPS permission denied.";
/// Fallback message for rejected submissions without a structured body.
pub const SERVER_ERROR_FALLBACK: &str = "Server error";
/// Fallback message for failed status lookups.
pub const STATUS_NOT_FOUND_FALLBACK: &str = "Tracking ID not found";
/// Fallback message for failed history fetches.
pub const HISTORY_FALLBACK: &str = "Unable to load submissions";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Internal orchestrator outcome.
///
/// `SessionReset` means the guard already handled user notification; the
/// orchestrator only unwinds. `Message` carries the view-level text.
enum Failure {
    SessionReset,
    Message(String),
}

impl Failure {
    fn network(_: TransportError) -> Self {
        Failure::Message(NETWORK_ERROR_MESSAGE.to_string())
    }
}

/// The client-side submission workflow controller.
pub struct ReportController {
    guard: SessionGuard,
    capture: CaptureSet,
    api: ApiClient,
    location: Arc<dyn GeolocationProvider>,
    /// View-layer state read by the rendering shell.
    pub ui: UiState,
}

impl ReportController {
    /// Creates a controller over the given collaborators.
    pub fn new(
        guard: SessionGuard,
        api: ApiClient,
        location: Arc<dyn GeolocationProvider>,
    ) -> Self {
        Self {
            guard,
            capture: CaptureSet::new(),
            api,
            location,
            ui: UiState::new(APP_VERSION),
        }
    }

    /// Restores a prior session from the identity provider at startup.
    pub fn restore_session(&mut self, gateway: &dyn IdentityGateway) {
        self.guard.restore(gateway.current_session());
    }

    /// Runs the interactive sign-in flow.
    ///
    /// A failed or cancelled flow surfaces as a view-level message; state
    /// is otherwise untouched so the user may simply retry.
    pub fn sign_in(&mut self, gateway: &dyn IdentityGateway) {
        if self.guard.sign_in(gateway).is_err() {
            self.ui.set_error("Login failed");
        }
    }

    /// Signs out and lands back on a fresh capture view.
    pub fn sign_out(&mut self, gateway: &dyn IdentityGateway) {
        self.guard.sign_out(gateway);
        self.capture.reset();
        self.ui = UiState::new(self.ui.version.clone());
    }

    /// Returns the signed-in identity, if any.
    pub fn identity(&self) -> Option<&str> {
        self.guard.identity()
    }

    /// Returns the capture state for rendering previews and gating buttons.
    pub fn capture(&self) -> &CaptureSet {
        &self.capture
    }

    /// Replaces the image selection.
    ///
    /// An accepted selection invalidates previously displayed results and
    /// the error message; an empty selection is ignored entirely.
    pub fn select_images(&mut self, files: Vec<ImageBlob>) {
        if self.capture.set_images(files) {
            self.ui.results.clear();
            self.ui.clear_error();
        }
    }

    /// Acquires a one-shot geolocation fix from the collaborator.
    ///
    /// Failures are surfaced as a message without touching capture state.
    pub fn acquire_location(&mut self) {
        match self.location.current_fix() {
            Ok(fix) => self.capture.set_geolocation(fix),
            Err(GeolocationError::PermissionDenied) => self.ui.set_error(GPS_DENIED_MESSAGE),
            Err(error) => self.ui.set_error(error.to_string()),
        }
    }

    /// Submits the capture set to the analyze endpoint.
    ///
    /// Refused with a validation message before any network activity when
    /// preconditions fail; re-entrant calls while one is in flight are
    /// dropped. The in-flight flag is cleared on every exit path.
    pub fn submit(&mut self) {
        if !self.capture.ready_for_submission() {
            self.ui.set_error(MISSING_INPUT_MESSAGE);
            return;
        }
        if !self.ui.begin_submission() {
            return;
        }
        self.ui.clear_error();

        let outcome = self.run_submission();
        self.ui.finish_submission();

        match outcome {
            Ok(results) => self.ui.show_success(results),
            Err(Failure::SessionReset) => {}
            Err(Failure::Message(message)) => self.ui.set_error(message),
        }
    }

    fn run_submission(&mut self) -> Result<Vec<AnalysisResult>, Failure> {
        let token = self
            .guard
            .acquire_credential()
            .map_err(|_| Failure::SessionReset)?;
        let Some(fix) = self.capture.geolocation() else {
            // Preconditions were checked; an absent fix here means the set
            // was reset underneath us, so treat it as a plain refusal.
            return Err(Failure::Message(MISSING_INPUT_MESSAGE.to_string()));
        };

        let form = submission_form(self.capture.images(), fix);
        let response = self.api.analyze(&form, &token).map_err(Failure::network)?;

        if !response.is_success() {
            return Err(Failure::Message(rejection_message(
                &response.body,
                SERVER_ERROR_FALLBACK,
            )));
        }

        parse_analyze_response(&response.body).map_err(|_| {
            Failure::Message(NETWORK_ERROR_MESSAGE.to_string())
        })
    }

    /// Opens the status-lookup view via explicit navigation.
    pub fn open_status_lookup(&mut self) {
        self.ui.open_status_lookup();
    }

    /// Looks up one submission by tracking identifier.
    ///
    /// Blank identifiers are refused locally without a network call.
    pub fn lookup(&mut self, tracking_id: &str) {
        if tracking_id.trim().is_empty() {
            self.ui.set_error(MISSING_TRACKING_ID_MESSAGE);
            return;
        }
        if !self.ui.begin_lookup() {
            return;
        }

        let outcome = self.run_lookup(tracking_id.trim());
        self.ui.finish_lookup();

        match outcome {
            Ok(record) => {
                self.ui.clear_error();
                self.ui.show_status_result(record);
            }
            Err(Failure::SessionReset) => {}
            Err(Failure::Message(message)) => self.ui.set_error(message),
        }
    }

    fn run_lookup(&mut self, tracking_id: &str) -> Result<SubmissionRecord, Failure> {
        let token = self
            .guard
            .acquire_credential()
            .map_err(|_| Failure::SessionReset)?;

        let response = self
            .api
            .status(tracking_id, &token)
            .map_err(Failure::network)?;

        if !response.is_success() {
            return Err(Failure::Message(
                error_detail(&response.body)
                    .unwrap_or_else(|| STATUS_NOT_FOUND_FALLBACK.to_string()),
            ));
        }

        parse_status_response(&response.body)
            .map_err(|_| Failure::Message(NETWORK_ERROR_MESSAGE.to_string()))
    }

    /// Fetches the signed-in user's prior submissions.
    ///
    /// On success the list is replaced wholesale and the history view is
    /// shown; on failure the current view is kept and a message surfaced.
    pub fn load_history(&mut self) {
        if !self.ui.begin_history() {
            return;
        }

        let outcome = self.run_history();
        self.ui.finish_history();

        match outcome {
            Ok(reports) => {
                self.ui.clear_error();
                self.ui.show_history(reports);
            }
            Err(Failure::SessionReset) => {}
            Err(Failure::Message(message)) => self.ui.set_error(message),
        }
    }

    fn run_history(&mut self) -> Result<Vec<SubmissionRecord>, Failure> {
        let token = self
            .guard
            .acquire_credential()
            .map_err(|_| Failure::SessionReset)?;

        let response = self.api.my_reports(&token).map_err(Failure::network)?;

        if !response.is_success() {
            return Err(Failure::Message(
                error_reason(&response.body).unwrap_or_else(|| HISTORY_FALLBACK.to_string()),
            ));
        }

        parse_reports_response(&response.body)
            .map_err(|_| Failure::Message(NETWORK_ERROR_MESSAGE.to_string()))
    }

    /// Returns to the capture view from any non-capture view.
    ///
    /// Leaving the success view also resets the capture set, completing
    /// the submission cycle; the session is left intact.
    pub fn navigate_back(&mut self) {
        if self.ui.back_to_capture() == View::Success {
            self.capture.reset();
        }
    }
}
