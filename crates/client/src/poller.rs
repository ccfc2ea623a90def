//! Scan lifecycle poller.
//!
//! [`ScanTracker`] spawns one poll task per tracked scan. The task
//! fetches the scan's status on a fixed interval, merges each response
//! into the [`ScanSession`], fetches the findings batch exactly once
//! when the scan completes, and stops deterministically on terminal
//! states, fetch failures, or caller cancellation.
//!
//! Fetches are strictly sequential within a session — the next tick is
//! not processed until the previous fetch resolves — so responses can
//! never be applied out of order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use foxhound_core::scan::{Scan, ScanStatus};

use crate::api::ScanApi;
use crate::events::ScanEvent;
use crate::session::{MergeOutcome, ScanSession};

/// Broadcast channel capacity for scan events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Tunable parameters for the poll loop.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay between status fetches. The first fetch fires
    /// immediately.
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
        }
    }
}

/// Why a poll session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The scan completed and its findings were merged.
    Completed,
    /// The scan failed; the job's own error message is on the session.
    Failed,
    /// A fetch failed; the session records the error and no retry is
    /// attempted.
    TransportError,
    /// The caller cancelled tracking, or the session was superseded.
    Cancelled,
}

/// Handle to a running poll session.
///
/// Dropping the handle does not stop the task; call
/// [`PollHandle::cancel`] to stop tracking explicitly.
pub struct PollHandle {
    cancel: CancellationToken,
    task: tokio::task::JoinHandle<PollOutcome>,
}

impl PollHandle {
    /// Stop polling. Cooperative and immediate at the scheduling
    /// layer: the pending timer is invalidated and no further fetches
    /// are issued. An in-flight fetch is allowed to complete; its
    /// result is then discarded by the session's id guard.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the poll task to finish and return its outcome.
    pub async fn join(self) -> PollOutcome {
        self.task.await.unwrap_or(PollOutcome::Cancelled)
    }
}

/// Spawns and owns poll sessions against one scan service.
///
/// Lifecycle events from every session started through this tracker
/// are broadcast on a shared channel; call [`ScanTracker::subscribe`]
/// to receive them.
pub struct ScanTracker {
    api: Arc<ScanApi>,
    config: PollerConfig,
    event_tx: broadcast::Sender<ScanEvent>,
}

impl ScanTracker {
    /// Create a tracker for the given API client.
    pub fn new(api: Arc<ScanApi>, config: PollerConfig) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            config,
            event_tx,
        }
    }

    /// Subscribe to lifecycle events for all tracked scans.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.event_tx.subscribe()
    }

    /// Begin tracking a scan record (as returned by submission or an
    /// initial status fetch).
    ///
    /// Returns the session (the caller's read handle) and a
    /// [`PollHandle`] controlling the spawned poll task. Tracking a
    /// different scan means calling `track` again; the previous handle
    /// should be cancelled by the caller.
    pub fn track(&self, scan: Scan) -> (ScanSession, PollHandle) {
        let session = ScanSession::track(scan);
        let scan_id = session.scan_id();

        let _ = self.event_tx.send(ScanEvent::Started { scan_id });
        tracing::info!(scan_id, "Starting poll session");

        let cancel = CancellationToken::new();
        let api = Arc::clone(&self.api);
        let event_tx = self.event_tx.clone();
        let interval = self.config.interval;
        let session_clone = session.clone();
        let cancel_clone = cancel.clone();

        let task = tokio::spawn(async move {
            let outcome =
                run_poll_loop(&api, &session_clone, &event_tx, &cancel_clone, interval).await;
            tracing::info!(scan_id, ?outcome, "Poll session exited");
            outcome
        });

        (session, PollHandle { cancel, task })
    }
}

/// Core poll loop: tick -> fetch status -> merge -> maybe fetch
/// findings -> stop on terminal.
///
/// Runs until a terminal status, a fetch failure, or cancellation.
async fn run_poll_loop(
    api: &ScanApi,
    session: &ScanSession,
    event_tx: &broadcast::Sender<ScanEvent>,
    cancel: &CancellationToken,
    interval: Duration,
) -> PollOutcome {
    let scan_id = session.scan_id();
    let mut timer = tokio::time::interval(interval);
    timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        // Cancellation wins over a ready tick, so a cancelled session
        // never issues another fetch.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(scan_id, "Poll session cancelled");
                return PollOutcome::Cancelled;
            }
            _ = timer.tick() => {}
        }

        let update = match api.get_scan(scan_id).await {
            Ok(update) => update,
            Err(e) => {
                // Fail fast: silent retry against a dead job would
                // strand the UI. The user re-initiates.
                tracing::error!(scan_id, error = %e, "Status fetch failed, stopping poll session");
                session.set_transport_error(scan_id, e.to_string()).await;
                let _ = event_tx.send(ScanEvent::TransportError {
                    scan_id,
                    error: e.to_string(),
                });
                return PollOutcome::TransportError;
            }
        };

        let status = update.status;
        let files_scanned = update.files_scanned;
        let total_files = update.total_files;
        let total_findings = update.total_findings;
        let error_message = update.error_message.clone();

        if session.apply_status(update).await != MergeOutcome::Applied {
            // Superseded or already terminal; nothing further to do.
            tracing::debug!(scan_id, "Status update discarded, stopping poll session");
            return PollOutcome::Cancelled;
        }

        match status {
            ScanStatus::Completed => {
                // Exactly one findings fetch per session. The findings
                // endpoint is meaningless before completion, so it is
                // never touched while the scan runs.
                match api.get_findings(scan_id, None).await {
                    Ok(findings) => {
                        tracing::info!(scan_id, count = findings.len(), "Scan completed");
                        session.apply_findings(scan_id, findings).await;
                        let _ = event_tx.send(ScanEvent::Completed {
                            scan_id,
                            total_findings,
                        });
                        return PollOutcome::Completed;
                    }
                    Err(e) => {
                        // The completed status merge is retained; only
                        // the findings view is missing.
                        tracing::error!(scan_id, error = %e, "Findings fetch failed");
                        session.set_transport_error(scan_id, e.to_string()).await;
                        let _ = event_tx.send(ScanEvent::TransportError {
                            scan_id,
                            error: e.to_string(),
                        });
                        return PollOutcome::TransportError;
                    }
                }
            }
            ScanStatus::Failed => {
                // Failed jobs never have findings; surface the job's
                // own message.
                let error = error_message.unwrap_or_else(|| "Scan failed".to_string());
                tracing::warn!(scan_id, error = %error, "Scan failed");
                let _ = event_tx.send(ScanEvent::Failed { scan_id, error });
                return PollOutcome::Failed;
            }
            ScanStatus::Created | ScanStatus::Running => {
                tracing::debug!(scan_id, files_scanned, total_files, "Scan in progress");
                let _ = event_tx.send(ScanEvent::Progress {
                    scan_id,
                    files_scanned,
                    total_files,
                });
            }
        }
    }
}
