#![warn(missing_docs)]
//! # pothole-report-core
//!
//! ## Purpose
//! Defines the pure data model used across the `pothole-report` workspace.
//!
//! ## Responsibilities
//! - Represent selected report images and their local preview handles.
//! - Represent an immutable geolocation fix attached to one submission.
//! - Validate data-model invariants at construction time.
//!
//! ## Data flow
//! File selection produces [`ImageBlob`] values, the capture layer derives
//! one [`PreviewHandle`] per blob, and the geolocation collaborator produces
//! a [`GeolocationFix`]. All three feed the submission orchestrator.
//!
//! ## Ownership and lifetimes
//! Blobs own their backing buffers (`Vec<u8>`) so capture state and the
//! multipart encoder never borrow from transient selection buffers.
//!
//! ## Error model
//! Constructor validation failures (empty image bytes, out-of-range
//! coordinates) return [`CoreError`] variants.
//!
//! ## Security and privacy notes
//! This crate never logs image bytes and treats user identity as opaque;
//! no credential material passes through these types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One user-selected report image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    /// Original file name, kept for multipart `filename` metadata.
    pub file_name: String,
    /// MIME content type reported by the file picker.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

impl ImageBlob {
    /// Constructs a validated image blob.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptyImage`] when `bytes` is empty.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::EmptyImage);
        }

        Ok(Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        })
    }
}

/// Locally-derived stable handle for one selected image preview.
///
/// Handles are content-derived so re-selecting the same file yields the
/// same handle, mirroring the server's content-hash record keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewHandle(pub String);

impl PreviewHandle {
    /// Returns the handle as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One GPS fix attached to a submission attempt.
///
/// Immutable once captured; a new acquisition replaces the whole value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeolocationFix {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl GeolocationFix {
    /// Constructs a validated fix.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidCoordinates`] when either coordinate is
    /// non-finite or outside the WGS84 range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let in_range = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !in_range {
            return Err(CoreError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Data-model validation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Selected image has no bytes.
    #[error("image blob must contain at least one byte")]
    EmptyImage,
    /// Coordinates fall outside the valid WGS84 range.
    #[error("invalid coordinates: lat={latitude}, lon={longitude}")]
    InvalidCoordinates {
        /// Rejected latitude value.
        latitude: f64,
        /// Rejected longitude value.
        longitude: f64,
    },
}
