//! Integration tests for the status-lookup workflow.

mod common;

use pothole_report_app::{MISSING_TRACKING_ID_MESSAGE, STATUS_NOT_FOUND_FALLBACK};

fn record_body(tracking_id: &str) -> String {
    serde_json::json!({
        "tracking_id": tracking_id,
        "status": "submitted",
        "type": "pothole",
        "severity": 3,
        "urgency": "medium",
        "explanation": "moderate damage",
        "created_at": "2026-08-15T09:00:00Z"
    })
    .to_string()
}

#[test]
fn status_lookup_tests_refuses_blank_identifiers_locally() {
    let mut harness = common::harness(vec![], true);

    harness.controller.lookup("");
    harness.controller.lookup("   ");

    assert_eq!(harness.transport.call_count(), 0);
    assert_eq!(
        harness.controller.ui.error.as_deref(),
        Some(MISSING_TRACKING_ID_MESSAGE)
    );
}

#[test]
fn status_lookup_tests_replaces_the_displayed_record() {
    let mut harness = common::harness(
        vec![
            common::ok(&record_body("PTH-20260815-000101")),
            common::ok(&record_body("PTH-20260815-000202")),
        ],
        true,
    );

    harness.controller.lookup("PTH-20260815-000101");
    harness.controller.lookup("PTH-20260815-000202");

    let shown = harness
        .controller
        .ui
        .status_result
        .as_ref()
        .expect("record should be displayed");
    assert_eq!(shown.result.tracking_id, "PTH-20260815-000202");
    assert_eq!(shown.created_at.as_deref(), Some("2026-08-15T09:00:00Z"));
}

#[test]
fn status_lookup_tests_uses_detail_then_not_found_fallback() {
    let mut harness = common::harness(
        vec![
            common::rejected(404, r#"{"detail":"Tracking ID not found"}"#),
            common::rejected(404, "{}"),
        ],
        true,
    );

    harness.controller.lookup("PTH-00000000-000000");
    assert_eq!(
        harness.controller.ui.error.as_deref(),
        Some("Tracking ID not found")
    );

    harness.controller.lookup("PTH-00000000-000000");
    assert_eq!(
        harness.controller.ui.error.as_deref(),
        Some(STATUS_NOT_FOUND_FALLBACK)
    );
    assert!(harness.controller.ui.status_result.is_none());
}
