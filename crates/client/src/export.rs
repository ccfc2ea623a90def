//! SARIF export adapter.
//!
//! Fetches the canonical report payload from the scan service — not
//! re-derived from local findings, so the exported artifact is
//! byte-identical to what the service produced — and wraps it as a
//! downloadable artifact with a deterministic file name.

use foxhound_core::scan::ScanStatus;
use foxhound_core::types::ScanId;

use crate::api::ScanApi;
use crate::error::ClientError;
use crate::session::ScanSession;

/// A downloadable SARIF artifact.
#[derive(Debug, Clone)]
pub struct SarifExport {
    /// Deterministic artifact name derived from the scan id.
    pub file_name: String,
    /// Opaque report payload as produced by the service.
    pub bytes: Vec<u8>,
}

/// Artifact name for a scan's SARIF report.
pub fn sarif_file_name(scan_id: ScanId) -> String {
    format!("foxhound-scan-{scan_id}.sarif")
}

/// Export the SARIF report for the session's scan.
///
/// Requires the scan to be `completed`; otherwise fails with
/// [`ClientError::NotReady`] before any network call is made. A remote
/// fetch failure maps to [`ClientError::ExportUnavailable`] and leaves
/// the session state untouched.
pub async fn export_sarif(
    api: &ScanApi,
    session: &ScanSession,
) -> Result<SarifExport, ClientError> {
    let scan = session.snapshot().await;
    if scan.status != ScanStatus::Completed {
        return Err(ClientError::NotReady("SARIF export requires a completed scan"));
    }

    let bytes = api
        .get_sarif(scan.id)
        .await
        .map_err(|e| ClientError::ExportUnavailable(e.to_string()))?;

    tracing::info!(scan_id = scan.id, bytes = bytes.len(), "SARIF report exported");

    Ok(SarifExport {
        file_name: sarif_file_name(scan.id),
        bytes,
    })
}
