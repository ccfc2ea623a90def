//! Lifecycle events emitted while tracking a scan.
//!
//! Produced by the poll session after each merged status response and
//! broadcast via a [`tokio::sync::broadcast`] channel. Subscribers
//! (progress indicators, socket bridges) consume them read-only.

use serde::Serialize;

use foxhound_core::types::ScanId;

/// Tracking started for a scan.
pub const MSG_TYPE_SCAN_STARTED: &str = "scan_started";

/// Progress update while the scan is running.
pub const MSG_TYPE_SCAN_PROGRESS: &str = "scan_progress";

/// Scan completed and findings are available.
pub const MSG_TYPE_SCAN_COMPLETED: &str = "scan_completed";

/// Scan failed with the job's own error message.
pub const MSG_TYPE_SCAN_FAILED: &str = "scan_failed";

/// Polling stopped on a fetch failure without the job concluding.
pub const MSG_TYPE_SCAN_ERROR: &str = "scan_error";

/// A lifecycle event for one tracked scan.
#[derive(Debug, Clone, Serialize)]
pub enum ScanEvent {
    /// A poll session began tracking this scan.
    Started { scan_id: ScanId },

    /// A non-terminal status response was merged.
    Progress {
        scan_id: ScanId,
        files_scanned: u32,
        /// `0` while the analysis has not yet enumerated files.
        total_files: u32,
    },

    /// The scan reached `completed` and its findings were merged.
    Completed {
        scan_id: ScanId,
        total_findings: u32,
    },

    /// The scan reached `failed`.
    Failed {
        scan_id: ScanId,
        /// The job's own error message.
        error: String,
    },

    /// A fetch failed at the transport level; polling stopped without
    /// the job itself concluding.
    TransportError { scan_id: ScanId, error: String },
}

impl ScanEvent {
    /// Message-type tag used when relaying this event over the
    /// dashboard's socket layer.
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::Started { .. } => MSG_TYPE_SCAN_STARTED,
            Self::Progress { .. } => MSG_TYPE_SCAN_PROGRESS,
            Self::Completed { .. } => MSG_TYPE_SCAN_COMPLETED,
            Self::Failed { .. } => MSG_TYPE_SCAN_FAILED,
            Self::TransportError { .. } => MSG_TYPE_SCAN_ERROR,
        }
    }
}
