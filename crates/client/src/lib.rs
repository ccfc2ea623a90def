//! Client for the Foxhound scan service: submission, lifecycle
//! polling, the per-scan view-model store, and SARIF export.
//!
//! The typical flow: submit via [`ScanApi`], hand the returned scan to
//! [`ScanTracker::track`], read progress from the session snapshots or
//! the event channel, and call [`export::export_sarif`] once the scan
//! completes.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod export;
pub mod poller;
pub mod session;

pub use api::ScanApi;
pub use config::ClientConfig;
pub use error::ClientError;
pub use events::ScanEvent;
pub use export::{export_sarif, sarif_file_name, SarifExport};
pub use poller::{PollHandle, PollOutcome, PollerConfig, ScanTracker};
pub use session::{MergeOutcome, ScanSession};
