//! Error taxonomy for the remote scan service client.

/// Errors from the scan service client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service returned a non-2xx status code. `detail` is the
    /// human-readable text from the structured error body, surfaced
    /// verbatim.
    #[error("Scan service error ({status}): {detail}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Detail text from the error body.
        detail: String,
    },

    /// The service responded 2xx but the payload was missing required
    /// fields or otherwise undecodable.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// An operation that requires a completed scan was invoked too
    /// early. Never raised when the lifecycle state machine is
    /// respected.
    #[error("Scan not ready: {0}")]
    NotReady(&'static str),

    /// The remote SARIF report could not be fetched.
    #[error("SARIF export unavailable: {0}")]
    ExportUnavailable(String),
}

impl ClientError {
    /// Whether this error is fatal to a poll session.
    ///
    /// Transport failures, non-2xx responses, and malformed payloads
    /// all stop polling immediately — malformed payloads are logged
    /// and treated like transport errors rather than retried.
    pub fn is_transport_level(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Api { .. } | Self::MalformedResponse(_)
        )
    }
}
