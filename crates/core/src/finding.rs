//! Finding record as returned by the analysis service.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// One located issue reported by the analysis service.
///
/// Findings are immutable once received: they arrive as a batch that
/// replaces any prior batch for the same scan, and are never created
/// or mutated individually on the client.
///
/// `severity` is kept as the raw wire string so that unrecognized
/// values survive transport and can be bucketed explicitly by the
/// aggregator instead of being silently dropped. Use
/// [`Finding::severity_level`] for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: i64,
    pub rule_id: String,
    pub rule_name: String,
    pub severity: String,
    pub file_path: String,
    /// 1-based first line of the flagged range.
    pub start_line: u32,
    /// 1-based last line of the flagged range (inclusive).
    pub end_line: u32,
    #[serde(default)]
    pub start_col: u32,
    #[serde(default)]
    pub end_col: u32,
    /// Source text spanning at least the flagged range. May include
    /// context lines beyond it.
    #[serde(default)]
    pub code_snippet: String,
    pub message: String,
    #[serde(default)]
    pub ai_explanation: Option<String>,
    #[serde(default)]
    pub ai_remediation: Option<String>,
    #[serde(default)]
    pub cwe_ids: Vec<String>,
    #[serde(default)]
    pub owasp_ids: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub is_false_positive: bool,
}

impl Finding {
    /// Severity as a canonical level, falling back to
    /// [`Severity::Info`] for unrecognized wire values.
    pub fn severity_level(&self) -> Severity {
        Severity::parse_lossy(&self.severity)
    }
}
