//! Severity bucketing and filtering over a findings batch.
//!
//! Both operations are pure and deterministic: the same input always
//! produces the same summary, and filtering preserves the original
//! relative order so UI scroll position stays meaningful between
//! filter toggles.

use serde::Serialize;

use crate::finding::Finding;
use crate::severity::Severity;

/// Per-severity counts for a findings batch.
///
/// `total` always equals the batch length. The five canonical buckets
/// plus `unrecognized` sum to `total` — findings with a severity
/// outside the taxonomy are counted under `unrecognized` rather than
/// silently lost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FindingsSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
    pub unrecognized: usize,
}

impl FindingsSummary {
    /// Count for one canonical severity level.
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Info => self.info,
        }
    }
}

/// Compute per-severity counts for a findings batch.
pub fn aggregate(findings: &[Finding]) -> FindingsSummary {
    let mut summary = FindingsSummary {
        total: findings.len(),
        ..Default::default()
    };
    for finding in findings {
        match Severity::parse(&finding.severity) {
            Some(Severity::Critical) => summary.critical += 1,
            Some(Severity::High) => summary.high += 1,
            Some(Severity::Medium) => summary.medium += 1,
            Some(Severity::Low) => summary.low += 1,
            Some(Severity::Info) => summary.info += 1,
            None => summary.unrecognized += 1,
        }
    }
    summary
}

/// Severity filter selected in the findings view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityFilter {
    /// Show everything — the identity projection.
    All,
    Level(Severity),
}

impl SeverityFilter {
    /// Parse a filter string: `"all"` or any severity name,
    /// case-insensitively. Unrecognized input is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        Severity::parse(s).map(Self::Level)
    }
}

/// Project a findings batch through a severity filter.
///
/// The output is a subsequence of the input preserving relative order;
/// [`SeverityFilter::All`] returns every finding.
pub fn filter(findings: &[Finding], selected: SeverityFilter) -> Vec<&Finding> {
    findings
        .iter()
        .filter(|f| match selected {
            SeverityFilter::All => true,
            SeverityFilter::Level(level) => Severity::parse(&f.severity) == Some(level),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(id: i64, severity: &str) -> Finding {
        serde_json::from_str(&format!(
            r#"{{
                "id": {id},
                "rule_id": "r{id}",
                "rule_name": "R",
                "severity": "{severity}",
                "file_path": "x.py",
                "start_line": 1,
                "end_line": 1,
                "message": "m"
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn counts_sum_to_total() {
        let batch = vec![
            finding(1, "critical"),
            finding(2, "high"),
            finding(3, "high"),
            finding(4, "medium"),
            finding(5, "low"),
            finding(6, "info"),
        ];
        let summary = aggregate(&batch);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.medium, 1);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.info, 1);
        assert_eq!(summary.unrecognized, 0);
        assert_eq!(
            summary.critical
                + summary.high
                + summary.medium
                + summary.low
                + summary.info
                + summary.unrecognized,
            summary.total
        );
    }

    #[test]
    fn unrecognized_severities_are_counted_not_dropped() {
        let batch = vec![finding(1, "critical"), finding(2, "catastrophic")];
        let summary = aggregate(&batch);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.unrecognized, 1);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let batch = vec![finding(1, "high"), finding(2, "low")];
        assert_eq!(aggregate(&batch), aggregate(&batch));
    }

    #[test]
    fn empty_batch() {
        let summary = aggregate(&[]);
        assert_eq!(summary, FindingsSummary::default());
    }

    #[test]
    fn filter_all_is_identity() {
        let batch = vec![finding(1, "high"), finding(2, "low"), finding(3, "high")];
        let out = filter(&batch, SeverityFilter::All);
        assert_eq!(out.len(), 3);
        let ids: Vec<i64> = out.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn filter_preserves_relative_order() {
        let batch = vec![
            finding(1, "high"),
            finding(2, "low"),
            finding(3, "high"),
            finding(4, "high"),
        ];
        let out = filter(&batch, SeverityFilter::Level(Severity::High));
        let ids: Vec<i64> = out.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn filter_never_matches_unrecognized_under_a_level() {
        let batch = vec![finding(1, "catastrophic")];
        for level in crate::severity::ALL_SEVERITIES {
            assert!(filter(&batch, SeverityFilter::Level(level)).is_empty());
        }
        // Still visible under the identity projection.
        assert_eq!(filter(&batch, SeverityFilter::All).len(), 1);
    }

    #[test]
    fn filter_parse() {
        assert_eq!(SeverityFilter::parse("all"), Some(SeverityFilter::All));
        assert_eq!(SeverityFilter::parse("ALL"), Some(SeverityFilter::All));
        assert_eq!(
            SeverityFilter::parse("critical"),
            Some(SeverityFilter::Level(Severity::Critical))
        );
        assert_eq!(SeverityFilter::parse("everything"), None);
    }
}
