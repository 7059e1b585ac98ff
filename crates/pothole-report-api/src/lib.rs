#![warn(missing_docs)]
//! # pothole-report-api
//!
//! ## Purpose
//! Implements the HTTP surface of the remote analysis service: endpoint
//! policy, request construction, and the multipart wire encoding.
//!
//! ## Responsibilities
//! - Validate the service base address (HTTPS only).
//! - Build the three endpoint URLs (`analyze`, `status/{id}`, `myreports`).
//! - Attach the bearer credential via the `X-User-Token` header contract.
//! - Build and encode the multipart submission form (repeated `images`
//!   parts plus `latitude`/`longitude` decimal-string fields).
//! - Execute requests through an injectable transport abstraction.
//!
//! ## Data flow
//! Capture state -> [`submission_form`] -> [`ApiClient::analyze`] ->
//! [`HttpTransport`] -> [`HttpResponse`] consumed by the orchestrators.
//!
//! ## Ownership and lifetimes
//! Forms own copies of the image bytes so a failed submission leaves the
//! capture state untouched and retryable.
//!
//! ## Error model
//! Endpoint policy violations and transport-level failures are surfaced as
//! [`TransportError`]; HTTP-level rejections are not errors here, they are
//! ordinary [`HttpResponse`] values the caller interprets.
//!
//! ## Security and privacy notes
//! Token values pass straight through to the transport and are never
//! embedded in URLs or error strings.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use pothole_report_core::{GeolocationFix, ImageBlob};
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use url::Url;

/// Custom credential header agreed with the backend.
///
/// Deliberately not a standard `Authorization` scheme.
pub const USER_TOKEN_HEADER: &str = "X-User-Token";

/// Repeated multipart field name carrying the image files.
pub const IMAGES_FIELD: &str = "images";

/// One raw HTTP response as seen by the orchestrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl HttpResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One file part of the multipart submission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Multipart field name (always [`IMAGES_FIELD`] for submissions).
    pub name: String,
    /// Original file name forwarded to the server.
    pub file_name: String,
    /// MIME content type of the file.
    pub content_type: String,
    /// File bytes.
    pub bytes: Vec<u8>,
}

/// One scalar text field of the multipart submission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: String,
}

/// Structured multipart form handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultipartForm {
    /// File parts in submission order.
    pub files: Vec<FilePart>,
    /// Scalar fields.
    pub fields: Vec<FormField>,
}

/// Builds the analyze submission form from the capture state.
///
/// Every image lands under the repeated `images` field in selection order;
/// the fix is serialized as two decimal-string fields.
pub fn submission_form(images: &[ImageBlob], fix: GeolocationFix) -> MultipartForm {
    MultipartForm {
        files: images
            .iter()
            .map(|image| FilePart {
                name: IMAGES_FIELD.to_string(),
                file_name: image.file_name.clone(),
                content_type: image.content_type.clone(),
                bytes: image.bytes.clone(),
            })
            .collect(),
        fields: vec![
            FormField {
                name: "latitude".to_string(),
                value: fix.latitude.to_string(),
            },
            FormField {
                name: "longitude".to_string(),
                value: fix.longitude.to_string(),
            },
        ],
    }
}

/// Generates a fresh multipart boundary token.
pub fn random_boundary() -> String {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0);
    let token: String = StdRng::seed_from_u64(seed)
        .sample_iter(Alphanumeric)
        .take(24)
        .map(char::from)
        .collect();

    format!("----pothole-report-{token}")
}

/// Encodes a form into `multipart/form-data` body bytes for `boundary`.
///
/// Transports that delegate to a full HTTP stack may ignore this and use
/// their own encoder; the wire layout is the standard one either way.
pub fn encode_multipart(form: &MultipartForm, boundary: &str) -> Vec<u8> {
    let mut body = Vec::new();

    for file in &form.files {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                file.name, file.file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
        body.extend_from_slice(&file.bytes);
        body.extend_from_slice(b"\r\n");
    }

    for field in &form.fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field.name).as_bytes(),
        );
        body.extend_from_slice(field.value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

/// Abstract transport executing the service's two request shapes.
pub trait HttpTransport: Send + Sync {
    /// Issues a multipart POST with the credential header attached.
    ///
    /// # Errors
    /// Returns [`TransportError`] for transport-level failures only; HTTP
    /// rejections come back as ordinary responses.
    fn post_multipart(
        &self,
        url: &str,
        token: &str,
        form: &MultipartForm,
    ) -> Result<HttpResponse, TransportError>;

    /// Issues a GET with the credential header attached.
    ///
    /// # Errors
    /// Same contract as [`HttpTransport::post_multipart`].
    fn get(&self, url: &str, token: &str) -> Result<HttpResponse, TransportError>;
}

/// Client for the remote analysis service.
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    /// Creates a validated client for `base`.
    ///
    /// # Errors
    /// Returns [`TransportError::InvalidEndpoint`] when the base address is
    /// not an absolute HTTPS URL.
    pub fn new(
        base: impl AsRef<str>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, TransportError> {
        let mut base = Url::parse(base.as_ref())
            .map_err(|error| TransportError::InvalidEndpoint(format!("invalid base url: {error}")))?;

        if base.scheme() != "https" {
            return Err(TransportError::InvalidEndpoint(
                "service base address must use https".to_string(),
            ));
        }

        // Trailing slash so Url::join appends instead of replacing.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        Ok(Self { base, transport })
    }

    /// Submits the multipart analyze request.
    ///
    /// # Errors
    /// Propagates transport-level failures.
    pub fn analyze(&self, form: &MultipartForm, token: &str) -> Result<HttpResponse, TransportError> {
        let url = self.endpoint("analyze")?;
        self.transport.post_multipart(url.as_str(), token, form)
    }

    /// Fetches one submission record by tracking identifier.
    ///
    /// # Errors
    /// Propagates transport-level failures.
    pub fn status(&self, tracking_id: &str, token: &str) -> Result<HttpResponse, TransportError> {
        let url = self.endpoint(&format!("status/{tracking_id}"))?;
        self.transport.get(url.as_str(), token)
    }

    /// Fetches the signed-in user's prior submissions.
    ///
    /// # Errors
    /// Propagates transport-level failures.
    pub fn my_reports(&self, token: &str) -> Result<HttpResponse, TransportError> {
        let url = self.endpoint("myreports")?;
        self.transport.get(url.as_str(), token)
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|error| TransportError::InvalidEndpoint(format!("invalid path {path}: {error}")))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Base address or path violates endpoint policy.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// DNS, connection, or protocol failure.
    #[error("network failure: {0}")]
    Network(String),
    /// Request exceeded the transport's deadline.
    #[error("request timed out")]
    Timeout,
}
