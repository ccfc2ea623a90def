//! REST client for the scan service HTTP endpoints.
//!
//! Wraps the scan service API (submission, status, findings, SARIF
//! report, scan history) using [`reqwest`]. Non-2xx responses carry a
//! structured error body whose `detail` text is surfaced verbatim.

use serde::Deserialize;

use foxhound_core::finding::Finding;
use foxhound_core::scan::Scan;
use foxhound_core::types::ScanId;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// HTTP client for one scan service instance.
pub struct ScanApi {
    client: reqwest::Client,
    api_url: String,
}

/// Structured error body returned by the service on non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl ScanApi {
    /// Create a new API client for a scan service instance.
    ///
    /// * `api_url` - Base API URL, e.g. `http://localhost:8000/api`.
    pub fn new(api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    /// Build a client from a [`ClientConfig`], applying its request
    /// timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Base API URL this client targets.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Submit an uploaded source archive for analysis.
    ///
    /// Sends `POST /scans/upload?enable_ai=` as a multipart form with a
    /// single `file` part. Returns the freshly created scan record.
    pub async fn upload(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        enable_ai: bool,
    ) -> Result<Scan, ClientError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/scans/upload", self.api_url))
            .query(&[("enable_ai", enable_ai)])
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Submit a GitHub repository reference for analysis.
    ///
    /// Sends `POST /scans/github`. Returns the freshly created scan
    /// record.
    pub async fn scan_repository(
        &self,
        repo_url: &str,
        branch: &str,
        enable_ai: bool,
    ) -> Result<Scan, ClientError> {
        let body = serde_json::json!({
            "repo_url": repo_url,
            "branch": branch,
            "enable_ai": enable_ai,
        });

        let response = self
            .client
            .post(format!("{}/scans/github", self.api_url))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the current status record for a scan.
    ///
    /// Sends `GET /scans/{id}`. The findings collection is omitted by
    /// the service while the scan is non-terminal.
    pub async fn get_scan(&self, scan_id: ScanId) -> Result<Scan, ClientError> {
        let response = self
            .client
            .get(format!("{}/scans/{}", self.api_url, scan_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the ordered findings collection for a scan, optionally
    /// filtered server-side by severity.
    ///
    /// Sends `GET /scans/{id}/findings[?severity=]`. Only meaningful
    /// once the scan has completed.
    pub async fn get_findings(
        &self,
        scan_id: ScanId,
        severity: Option<&str>,
    ) -> Result<Vec<Finding>, ClientError> {
        let mut request = self
            .client
            .get(format!("{}/scans/{}/findings", self.api_url, scan_id));
        if let Some(severity) = severity {
            request = request.query(&[("severity", severity)]);
        }

        Self::parse_response(request.send().await?).await
    }

    /// Fetch the canonical SARIF report as opaque bytes.
    ///
    /// Sends `GET /scans/{id}/sarif`. The payload is proxied to the
    /// user as a file download, not interpreted.
    pub async fn get_sarif(&self, scan_id: ScanId) -> Result<Vec<u8>, ClientError> {
        let response = self
            .client
            .get(format!("{}/scans/{}/sarif", self.api_url, scan_id))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch a page of the scan history, newest first.
    ///
    /// Sends `GET /scans/?limit=&offset=`.
    pub async fn list_scans(&self, limit: u32, offset: u32) -> Result<Vec<Scan>, ClientError> {
        let response = self
            .client
            .get(format!("{}/scans/", self.api_url))
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`] carrying
    /// the status and the error body's detail text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let detail = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => parsed.detail,
                Err(_) => body,
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                detail,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    ///
    /// Decode failures map to [`ClientError::MalformedResponse`] so
    /// that missing required fields are distinguishable from transport
    /// failures in logs, while still stopping a poll session.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                ClientError::MalformedResponse(e.to_string())
            } else {
                ClientError::Transport(e)
            }
        })
    }
}
