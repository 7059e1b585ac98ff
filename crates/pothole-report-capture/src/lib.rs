#![warn(missing_docs)]
//! # pothole-report-capture
//!
//! ## Purpose
//! Holds the mutable capture state for one submission cycle: selected
//! images, derived local previews, and the last acquired geolocation fix.
//!
//! ## Responsibilities
//! - Replace the image selection wholesale and derive one preview handle
//!   per image, in selection order.
//! - Record the geolocation fix delivered by the external collaborator.
//! - Expose the submission-readiness gate (images present AND fix present).
//! - Define the backend-agnostic geolocation trait plus a deterministic
//!   in-crate provider for tests.
//!
//! ## Data flow
//! File picker emits [`pothole_report_core::ImageBlob`] values into
//! [`CaptureSet::set_images`]; the geolocation collaborator feeds
//! [`CaptureSet::set_geolocation`]; the submission orchestrator reads the
//! whole set when building the multipart payload.
//!
//! ## Ownership and lifetimes
//! The capture set owns blobs and handles outright; nothing borrows from
//! selection buffers, so a submission can read the set while the UI still
//! renders previews.
//!
//! ## Error model
//! Geolocation acquisition failures are reported as [`GeolocationError`];
//! permission denial is a distinct variant so callers can word the message.
//! An empty selection is not an error, it is an ignored no-op.
//!
//! ## Security and privacy notes
//! Preview handles expose a content digest, never raw bytes or file paths.

use pothole_report_core::{GeolocationFix, ImageBlob, PreviewHandle};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Hex digits of the content digest kept in a preview handle.
const PREVIEW_DIGEST_LEN: usize = 16;

/// Derives the stable preview handle for one image blob.
///
/// The handle is a truncated SHA-256 content digest, so re-selecting the
/// same file always yields the same handle.
pub fn preview_handle(blob: &ImageBlob) -> PreviewHandle {
    let digest = Sha256::digest(&blob.bytes);
    let full = hex::encode(digest);
    PreviewHandle(format!("preview-{}", &full[..PREVIEW_DIGEST_LEN]))
}

/// Mutable capture state for the current submission cycle.
#[derive(Debug, Clone, Default)]
pub struct CaptureSet {
    images: Vec<ImageBlob>,
    previews: Vec<PreviewHandle>,
    fix: Option<GeolocationFix>,
}

impl CaptureSet {
    /// Creates an empty capture set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the image selection and regenerates previews.
    ///
    /// An empty selection is ignored entirely and leaves prior state in
    /// place. Returns `true` when the selection was accepted, so callers
    /// know whether to invalidate previously displayed results.
    pub fn set_images(&mut self, files: Vec<ImageBlob>) -> bool {
        if files.is_empty() {
            return false;
        }

        self.previews = files.iter().map(preview_handle).collect();
        self.images = files;
        true
    }

    /// Records the geolocation fix for the next submission attempt.
    pub fn set_geolocation(&mut self, fix: GeolocationFix) {
        self.fix = Some(fix);
    }

    /// Clears images, previews, and the fix after a completed cycle.
    pub fn reset(&mut self) {
        self.images.clear();
        self.previews.clear();
        self.fix = None;
    }

    /// Returns the selected images in selection order.
    pub fn images(&self) -> &[ImageBlob] {
        &self.images
    }

    /// Returns preview handles, one per image, in selection order.
    pub fn previews(&self) -> &[PreviewHandle] {
        &self.previews
    }

    /// Returns the current geolocation fix, if acquired.
    pub fn geolocation(&self) -> Option<GeolocationFix> {
        self.fix
    }

    /// Returns `true` when a submission attempt is permitted.
    pub fn ready_for_submission(&self) -> bool {
        !self.images.is_empty() && self.fix.is_some()
    }
}

/// One-shot geolocation collaborator.
pub trait GeolocationProvider: Send + Sync {
    /// Acquires the current position.
    ///
    /// # Errors
    /// Returns [`GeolocationError::PermissionDenied`] when the user refuses
    /// the permission prompt, [`GeolocationError::Unavailable`] otherwise.
    fn current_fix(&self) -> Result<GeolocationFix, GeolocationError>;
}

/// Deterministic provider returning a fixed position, for tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocationProvider {
    fix: GeolocationFix,
}

impl FixedGeolocationProvider {
    /// Creates a provider that always returns `fix`.
    pub fn new(fix: GeolocationFix) -> Self {
        Self { fix }
    }
}

impl GeolocationProvider for FixedGeolocationProvider {
    fn current_fix(&self) -> Result<GeolocationFix, GeolocationError> {
        Ok(self.fix)
    }
}

/// Geolocation acquisition errors.
#[derive(Debug, Error)]
pub enum GeolocationError {
    /// User denied the location permission prompt.
    #[error("location permission denied")]
    PermissionDenied,
    /// Positioning backend failed or timed out.
    #[error("location unavailable: {0}")]
    Unavailable(String),
}
