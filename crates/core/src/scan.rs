//! Scan job record and lifecycle status.
//!
//! A [`Scan`] is one analysis job tracked by identifier. The record is
//! created by the remote service at submission time and mutated on the
//! client only by merging poll responses ([`Scan::apply_status`]) and
//! replacing the findings batch ([`Scan::replace_findings`]).

use serde::{Deserialize, Serialize};

use crate::finding::Finding;
use crate::types::{ScanId, Timestamp};

/// Lifecycle status of a scan job.
///
/// `created → running → {completed | failed}`. The terminal states are
/// mutually exclusive and final — a tracked scan never transitions out
/// of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// Job accepted, first status fetch not yet resolved.
    /// The service's legacy wire spelling is `"pending"`.
    #[serde(alias = "pending")]
    Created,
    Running,
    Completed,
    Failed,
}

impl ScanStatus {
    /// Whether this status is terminal (`completed` or `failed`).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One analysis job, as returned by `GET /scans/{id}`.
///
/// The findings collection is empty for any non-terminal status. Once
/// populated it is only ever replaced wholesale, never mutated in
/// place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scan {
    pub id: ScanId,
    pub status: ScanStatus,
    /// `"upload"` or `"github"`.
    pub source_type: String,
    /// Uploaded file name or repository URL.
    #[serde(default)]
    pub source_path: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub commit_sha: Option<String>,
    #[serde(default)]
    pub languages_detected: Vec<String>,
    /// Total file count; `0` until the analysis has enumerated files.
    #[serde(default)]
    pub total_files: u32,
    #[serde(default)]
    pub files_scanned: u32,
    #[serde(default)]
    pub total_findings: u32,
    #[serde(default)]
    pub critical_count: u32,
    #[serde(default)]
    pub high_count: u32,
    #[serde(default)]
    pub medium_count: u32,
    #[serde(default)]
    pub low_count: u32,
    /// Present only when `status` is `failed`.
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub started_at: Option<Timestamp>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub findings: Vec<Finding>,
}

impl Scan {
    /// Scan progress as a fraction in `[0.0, 100.0]`, or `None` while
    /// the total file count is still unknown.
    pub fn progress_percent(&self) -> Option<f64> {
        if self.total_files == 0 {
            return None;
        }
        Some((self.files_scanned as f64 / self.total_files as f64) * 100.0)
    }

    /// Merge a fresh status response into this record.
    ///
    /// Field-wise overwrite of every scalar field; the findings
    /// collection is never touched here (it is replaced separately via
    /// [`Scan::replace_findings`] once the scan is terminal).
    ///
    /// `files_scanned` is clamped to `total_files` once the total is
    /// known, so the progress invariant holds even against a
    /// misbehaving service.
    pub fn apply_status(&mut self, update: Scan) {
        let Scan {
            id,
            status,
            source_type,
            source_path,
            branch,
            commit_sha,
            languages_detected,
            total_files,
            files_scanned,
            total_findings,
            critical_count,
            high_count,
            medium_count,
            low_count,
            error_message,
            created_at,
            started_at,
            completed_at,
            findings: _,
        } = update;

        let files_scanned = if total_files > 0 && files_scanned > total_files {
            tracing::warn!(
                scan_id = id,
                files_scanned,
                total_files,
                "files_scanned exceeds total_files, clamping",
            );
            total_files
        } else {
            files_scanned
        };

        self.id = id;
        self.status = status;
        self.source_type = source_type;
        self.source_path = source_path;
        self.branch = branch;
        self.commit_sha = commit_sha;
        self.languages_detected = languages_detected;
        self.total_files = total_files;
        self.files_scanned = files_scanned;
        self.total_findings = total_findings;
        self.critical_count = critical_count;
        self.high_count = high_count;
        self.medium_count = medium_count;
        self.low_count = low_count;
        self.error_message = error_message;
        self.created_at = created_at;
        self.started_at = started_at;
        self.completed_at = completed_at;
    }

    /// Replace the findings batch wholesale.
    pub fn replace_findings(&mut self, findings: Vec<Finding>) {
        self.findings = findings;
    }
}
