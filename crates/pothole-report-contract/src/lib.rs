#![warn(missing_docs)]
//! # pothole-report-contract
//!
//! ## Purpose
//! Defines the remote analysis service's response schema and the client-side
//! parsing helpers consumed by the orchestrators.
//!
//! ## Responsibilities
//! - Parse analyze, status, and history response bodies.
//! - Extract human-readable messages from structured error bodies,
//!   preferring `detail`, falling back to `error`, then a caller fallback.
//! - Preserve unknown status/urgency values for forward compatibility.
//!
//! ## Data flow
//! Raw response body -> [`parse_analyze_response`] /
//! [`parse_status_response`] / [`parse_reports_response`] -> owned records
//! rendered by the view layer.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs; nothing borrows from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON or a record with a blank tracking identifier returns
//! [`ContractError`].
//!
//! ## Security and privacy notes
//! This crate processes analysis outputs only; tokens never reach it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-assigned report lifecycle status.
///
/// Unknown values map to [`ReportStatus::Unknown`] so newly introduced
/// server states do not break parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    /// Report accepted and stored.
    Submitted,
    /// Report under municipal review.
    InReview,
    /// Pothole repaired.
    Resolved,
    /// Unrecognized server status.
    #[serde(other)]
    Unknown,
}

/// Repair urgency assessed by the analysis model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Cosmetic damage.
    Low,
    /// Repair recommended.
    Medium,
    /// Hazardous, prioritize.
    High,
    /// Unrecognized server value.
    #[serde(other)]
    Unknown,
}

/// One analysis outcome for one submitted image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Server-assigned tracking identifier (`PTH-YYYYMMDD-NNNNNN` shape).
    pub tracking_id: String,
    /// Report lifecycle status.
    pub status: ReportStatus,
    /// Damage classification label.
    #[serde(rename = "type")]
    pub kind: String,
    /// Severity score, 1 (minor) through 5 (severe).
    #[serde(default)]
    pub severity: u8,
    /// Repair urgency.
    pub urgency: Urgency,
    /// Model explanation text.
    #[serde(default)]
    pub explanation: String,
    /// Stored-image reference, when the server kept a copy.
    #[serde(default)]
    pub image: Option<String>,
    /// Set when the server matched a previously submitted image.
    #[serde(default)]
    pub deduped: bool,
}

/// History/status record: an [`AnalysisResult`] plus its creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Analysis fields shared with the submission response.
    #[serde(flatten)]
    pub result: AnalysisResult,
    /// Server-side creation timestamp, when present.
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize)]
struct AnalyzeEnvelope {
    results: Vec<AnalysisResult>,
}

#[derive(Deserialize)]
struct ReportsEnvelope {
    reports: Vec<SubmissionRecord>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Parses a 2xx analyze response (`{"results": [...]}`).
///
/// # Errors
/// Returns [`ContractError::Decode`] for invalid JSON and
/// [`ContractError::InvalidContract`] when any record has a blank
/// tracking identifier.
pub fn parse_analyze_response(raw: &str) -> Result<Vec<AnalysisResult>, ContractError> {
    let envelope: AnalyzeEnvelope = serde_json::from_str(raw)?;
    for result in &envelope.results {
        validate_tracking_id(&result.tracking_id)?;
    }
    Ok(envelope.results)
}

/// Parses a 2xx status-lookup response (one flat record).
///
/// # Errors
/// Same failure modes as [`parse_analyze_response`].
pub fn parse_status_response(raw: &str) -> Result<SubmissionRecord, ContractError> {
    let record: SubmissionRecord = serde_json::from_str(raw)?;
    validate_tracking_id(&record.result.tracking_id)?;
    Ok(record)
}

/// Parses a 2xx history response (`{"reports": [...]}`).
///
/// # Errors
/// Same failure modes as [`parse_analyze_response`].
pub fn parse_reports_response(raw: &str) -> Result<Vec<SubmissionRecord>, ContractError> {
    let envelope: ReportsEnvelope = serde_json::from_str(raw)?;
    for record in &envelope.reports {
        validate_tracking_id(&record.result.tracking_id)?;
    }
    Ok(envelope.reports)
}

fn validate_tracking_id(tracking_id: &str) -> Result<(), ContractError> {
    if tracking_id.trim().is_empty() {
        return Err(ContractError::InvalidContract(
            "record is missing a tracking_id".to_string(),
        ));
    }
    Ok(())
}

/// Extracts the `detail` field from a structured error body.
pub fn error_detail(raw: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(raw)
        .ok()
        .and_then(|body| body.detail)
        .filter(|message| !message.trim().is_empty())
}

/// Extracts the `error` field from a structured error body.
pub fn error_reason(raw: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(raw)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.trim().is_empty())
}

/// Resolves the user-facing message for a rejected submission.
///
/// Prefers the body's `detail` field, falls back to `error`, then to the
/// caller-provided fallback when the body is absent or unparseable.
pub fn rejection_message(raw: &str, fallback: &str) -> String {
    error_detail(raw)
        .or_else(|| error_reason(raw))
        .unwrap_or_else(|| fallback.to_string())
}

/// Wire-contract errors.
#[derive(Debug, Error)]
pub enum ContractError {
    /// JSON decode failure.
    #[error("response decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// Parsed payload violates contract invariants.
    #[error("contract violation: {0}")]
    InvalidContract(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for response parsing and error-body extraction.

    use super::*;

    #[test]
    fn parses_analyze_results_in_received_order() {
        let raw = r#"{"results":[
            {"tracking_id":"PTH-20260801-000001","status":"submitted","type":"pothole",
             "severity":4,"urgency":"high","explanation":"deep crack"},
            {"tracking_id":"PTH-20260801-000002","status":"submitted","type":"pothole",
             "severity":2,"urgency":"low","explanation":"surface wear","deduped":true}
        ]}"#;

        let results = parse_analyze_response(raw).expect("analyze body should parse");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].tracking_id, "PTH-20260801-000001");
        assert_eq!(results[0].urgency, Urgency::High);
        assert!(results[1].deduped);
    }

    #[test]
    fn unknown_status_values_are_preserved_as_unknown() {
        let raw = r#"{"results":[
            {"tracking_id":"PTH-20260801-000003","status":"escalated","type":"pothole",
             "severity":5,"urgency":"immediate","explanation":"sinkhole"}
        ]}"#;

        let results = parse_analyze_response(raw).expect("forward-compatible parse");
        assert_eq!(results[0].status, ReportStatus::Unknown);
        assert_eq!(results[0].urgency, Urgency::Unknown);
    }

    #[test]
    fn status_record_carries_created_at() {
        let raw = r#"{"tracking_id":"PTH-20260801-000001","status":"submitted",
            "type":"pothole","severity":3,"urgency":"medium",
            "explanation":"moderate damage","image":"gs://bucket/p.jpg",
            "created_at":"2026-08-01T10:15:00Z"}"#;

        let record = parse_status_response(raw).expect("status body should parse");
        assert_eq!(record.created_at.as_deref(), Some("2026-08-01T10:15:00Z"));
        assert_eq!(record.result.image.as_deref(), Some("gs://bucket/p.jpg"));
    }

    #[test]
    fn blank_tracking_id_violates_contract() {
        let raw = r#"{"results":[{"tracking_id":"  ","status":"submitted","type":"pothole",
            "severity":1,"urgency":"low","explanation":""}]}"#;
        assert!(matches!(
            parse_analyze_response(raw),
            Err(ContractError::InvalidContract(_))
        ));
    }

    #[test]
    fn rejection_message_prefers_detail_over_error() {
        assert_eq!(
            rejection_message(r#"{"detail":"bad image","error":"ignored"}"#, "Server error"),
            "bad image"
        );
        assert_eq!(
            rejection_message(r#"{"error":"quota exceeded"}"#, "Server error"),
            "quota exceeded"
        );
        assert_eq!(rejection_message("not json", "Server error"), "Server error");
        assert_eq!(rejection_message(r#"{"detail":""}"#, "Server error"), "Server error");
    }
}
