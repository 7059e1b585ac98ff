#![warn(missing_docs)]
//! # pothole-report-app binary
//!
//! Headless entry point. Interactive shells embed [`pothole_report_app`]
//! with their own transports; this binary only reports build facts.

/// CLI entry point.
fn main() {
    println!("pothole-report {}", pothole_report_app::app_version());
    println!("service base: {}", pothole_report_app::SERVICE_BASE_URL);
}
