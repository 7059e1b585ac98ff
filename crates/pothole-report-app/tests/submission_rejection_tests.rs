//! Integration tests for rejected submissions.

mod common;

use pothole_report_app::NETWORK_ERROR_MESSAGE;
use pothole_report_ui::View;

#[test]
fn submission_rejection_tests_surfaces_detail_and_keeps_capture_state() {
    let mut harness = common::harness(vec![common::rejected(422, r#"{"detail":"bad image"}"#)], true);
    common::make_ready(&mut harness.controller);

    harness.controller.submit();

    assert_eq!(harness.controller.ui.view, View::Capture);
    assert_eq!(harness.controller.ui.error.as_deref(), Some("bad image"));
    assert!(!harness.controller.ui.submitting);

    // The set is untouched so the user may retry as-is.
    assert_eq!(harness.controller.capture().images().len(), 2);
    assert_eq!(harness.controller.capture().previews().len(), 2);
    assert!(harness.controller.capture().geolocation().is_some());
}

#[test]
fn submission_rejection_tests_falls_back_through_error_then_generic() {
    let mut harness = common::harness(
        vec![
            common::rejected(500, r#"{"error":"SERVER ERROR: model offline"}"#),
            common::rejected(502, "gateway timeout (not json)"),
        ],
        true,
    );
    common::make_ready(&mut harness.controller);

    harness.controller.submit();
    assert_eq!(
        harness.controller.ui.error.as_deref(),
        Some("SERVER ERROR: model offline")
    );

    harness.controller.submit();
    assert_eq!(harness.controller.ui.error.as_deref(), Some("Server error"));
}

#[test]
fn submission_rejection_tests_maps_malformed_success_body_to_network_error() {
    let mut harness = common::harness(vec![common::ok("definitely not json")], true);
    common::make_ready(&mut harness.controller);

    harness.controller.submit();

    assert_eq!(
        harness.controller.ui.error.as_deref(),
        Some(NETWORK_ERROR_MESSAGE)
    );
    assert_eq!(harness.controller.ui.view, View::Capture);
    assert!(!harness.controller.ui.submitting);
}
