//! Integration tests for the SARIF export adapter.

mod common;

use assert_matches::assert_matches;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use foxhound_client::{export_sarif, ClientError, ScanApi, ScanSession};
use foxhound_core::scan::ScanStatus;

use common::{scan_body, scan_from};

// ---------------------------------------------------------------------------
// Test: export before completion fails fast with no network call
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_before_completion_is_not_ready_and_makes_no_request() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/scans/7/sarif"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock)
        .await;

    let api = ScanApi::new(mock.uri());
    let session = ScanSession::track(scan_from(&scan_body(7, "running")));

    let result = export_sarif(&api, &session).await;
    assert_matches!(result, Err(ClientError::NotReady(_)));
}

// ---------------------------------------------------------------------------
// Test: export of a completed scan yields the deterministic artifact
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_downloads_named_artifact() {
    let mock = MockServer::start().await;

    let report = serde_json::json!({
        "version": "2.1.0",
        "runs": [],
    });
    Mock::given(method("GET"))
        .and(path("/scans/7/sarif"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&report))
        .expect(1)
        .mount(&mock)
        .await;

    let api = ScanApi::new(mock.uri());
    let session = ScanSession::track(scan_from(&scan_body(7, "completed")));

    let export = export_sarif(&api, &session).await.expect("export succeeds");
    assert_eq!(export.file_name, "foxhound-scan-7.sarif");

    // The payload is proxied verbatim, not re-derived locally.
    let round_trip: serde_json::Value = serde_json::from_slice(&export.bytes).unwrap();
    assert_eq!(round_trip, report);
}

// ---------------------------------------------------------------------------
// Test: a remote failure maps to ExportUnavailable, prior state intact
// ---------------------------------------------------------------------------

#[tokio::test]
async fn export_failure_is_unavailable_and_leaves_state_intact() {
    let mock = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/scans/7/sarif"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "detail": "SARIF not available" })),
        )
        .mount(&mock)
        .await;

    let api = ScanApi::new(mock.uri());
    let session = ScanSession::track(scan_from(&scan_body(7, "completed")));

    let result = export_sarif(&api, &session).await;
    assert_matches!(
        result,
        Err(ClientError::ExportUnavailable(detail)) if detail.contains("SARIF not available")
    );

    // Export failures never disturb the tracked scan.
    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.status, ScanStatus::Completed);
    assert_eq!(session.transport_error().await, None);
}
