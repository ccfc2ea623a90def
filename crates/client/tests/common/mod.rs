//! Shared fixtures for client integration tests.
//!
//! Builders for wire-shaped scan and finding payloads, so each test
//! mounts mocks with realistic bodies instead of hand-rolled JSON.

use serde_json::{json, Value};

use foxhound_core::scan::Scan;

/// Minimal scan record body as the service would return it.
pub fn scan_body(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "status": status,
        "source_type": "upload",
        "source_path": "app.zip",
        "branch": null,
        "commit_sha": null,
        "languages_detected": [],
        "total_files": 0,
        "files_scanned": 0,
        "total_findings": 0,
        "critical_count": 0,
        "high_count": 0,
        "medium_count": 0,
        "low_count": 0,
        "error_message": null,
        "created_at": "2026-01-10T12:00:00Z",
        "started_at": null,
        "completed_at": null,
        "findings": []
    })
}

/// Finding body with the given id and severity.
pub fn finding_body(id: i64, severity: &str) -> Value {
    json!({
        "id": id,
        "rule_id": format!("rule-{id}"),
        "rule_name": "Hardcoded secret",
        "severity": severity,
        "file_path": "app/config.py",
        "start_line": 10,
        "end_line": 11,
        "start_col": 0,
        "end_col": 24,
        "code_snippet": "API_KEY = \"sk-123\"\nprint(API_KEY)",
        "message": "Secret material committed to source",
        "ai_explanation": null,
        "ai_remediation": null,
        "cwe_ids": ["CWE-798"],
        "owasp_ids": [],
        "references": [],
        "is_false_positive": false
    })
}

/// Deserialize a scan body into the domain record.
pub fn scan_from(body: &Value) -> Scan {
    serde_json::from_value(body.clone()).expect("scan body should deserialize")
}
