//! View-model store for one tracked scan.
//!
//! [`ScanSession`] is the explicit, caller-owned replacement for a
//! process-global scan store: whoever initiates tracking owns the
//! session and hands read-only snapshots to presentation code. The
//! poll session is the only writer; every mutation entry point guards
//! against stale responses (wrong scan id) and enforces the terminal
//! latch, so UI-visible state never regresses out of a terminal
//! status.

use std::sync::Arc;

use tokio::sync::RwLock;

use foxhound_core::finding::Finding;
use foxhound_core::scan::Scan;
use foxhound_core::types::ScanId;

/// Result of offering an update to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The update was merged into the store.
    Applied,
    /// The update was for a different scan id and was discarded.
    IgnoredStale,
    /// The session already reached a terminal state; the update was
    /// discarded to keep terminal entry idempotent.
    IgnoredTerminal,
}

struct SessionState {
    scan: Scan,
    /// Latched on the first terminal status merge; never cleared.
    terminal: bool,
    /// Set when polling stopped on a fetch failure rather than a
    /// terminal job status.
    transport_error: Option<String>,
}

/// Shared state for one tracked scan. Clones share the same store.
#[derive(Clone)]
pub struct ScanSession {
    inner: Arc<RwLock<SessionState>>,
    scan_id: ScanId,
}

impl ScanSession {
    /// Begin tracking a scan record as returned by submission or a
    /// first status fetch.
    pub fn track(scan: Scan) -> Self {
        let scan_id = scan.id;
        let terminal = scan.status.is_terminal();
        Self {
            inner: Arc::new(RwLock::new(SessionState {
                scan,
                terminal,
                transport_error: None,
            })),
            scan_id,
        }
    }

    /// The scan id this session tracks. Fixed for the session's
    /// lifetime — tracking a different scan means a new session.
    pub fn scan_id(&self) -> ScanId {
        self.scan_id
    }

    /// Read-only snapshot of the tracked scan.
    pub async fn snapshot(&self) -> Scan {
        self.inner.read().await.scan.clone()
    }

    /// Whether the tracked scan has reached a terminal status.
    pub async fn is_terminal(&self) -> bool {
        self.inner.read().await.terminal
    }

    /// The transport error that stopped polling, if any.
    pub async fn transport_error(&self) -> Option<String> {
        self.inner.read().await.transport_error.clone()
    }

    /// Merge a status response into the store.
    ///
    /// Discards the update when its id does not match the tracked id
    /// (a response that resolved after the caller moved on) or when
    /// the session is already terminal (at most one terminal
    /// transition is ever applied). Otherwise merges scalar fields via
    /// [`Scan::apply_status`] and latches the terminal flag when the
    /// update carries a terminal status.
    pub async fn apply_status(&self, update: Scan) -> MergeOutcome {
        let mut state = self.inner.write().await;
        if update.id != self.scan_id {
            tracing::debug!(
                tracked_id = self.scan_id,
                response_id = update.id,
                "Discarding stale status response",
            );
            return MergeOutcome::IgnoredStale;
        }
        if state.terminal {
            tracing::debug!(scan_id = self.scan_id, "Session is terminal, update ignored");
            return MergeOutcome::IgnoredTerminal;
        }

        let now_terminal = update.status.is_terminal();
        state.scan.apply_status(update);
        if now_terminal {
            state.terminal = true;
        }
        MergeOutcome::Applied
    }

    /// Replace the findings batch wholesale.
    ///
    /// Applied after the terminal status merge, so the terminal latch
    /// does not reject it; only the id guard applies.
    pub async fn apply_findings(&self, scan_id: ScanId, findings: Vec<Finding>) -> MergeOutcome {
        let mut state = self.inner.write().await;
        if scan_id != self.scan_id {
            tracing::debug!(
                tracked_id = self.scan_id,
                response_id = scan_id,
                "Discarding stale findings response",
            );
            return MergeOutcome::IgnoredStale;
        }
        state.scan.replace_findings(findings);
        MergeOutcome::Applied
    }

    /// Record the fetch failure that stopped polling.
    ///
    /// This is a distinct state from a `failed` job: the job's own
    /// outcome is unknown, the client just lost its view of it.
    pub async fn set_transport_error(&self, scan_id: ScanId, message: String) -> MergeOutcome {
        let mut state = self.inner.write().await;
        if scan_id != self.scan_id {
            return MergeOutcome::IgnoredStale;
        }
        state.transport_error = Some(message);
        MergeOutcome::Applied
    }
}
