//! Canonical severity taxonomy for findings.
//!
//! Five levels ordered ascending: info < low < medium < high <
//! critical. Each level maps to a display color token and an icon
//! glyph. Unrecognized severity strings fall back to the [`Severity::Info`]
//! presentation so that malformed or future values never break
//! rendering.

use serde::{Deserialize, Serialize};

/// Severity of a finding, ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

/// All severities, ascending.
pub const ALL_SEVERITIES: [Severity; 5] = [
    Severity::Info,
    Severity::Low,
    Severity::Medium,
    Severity::High,
    Severity::Critical,
];

impl Severity {
    /// Parse a severity string, case-insensitively.
    ///
    /// Returns `None` for anything outside the five canonical levels.
    /// Use [`Severity::parse_lossy`] when a presentation fallback is
    /// wanted instead.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Some(Self::Info),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Parse a severity string, falling back to [`Severity::Info`] for
    /// unrecognized values.
    pub fn parse_lossy(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::Info)
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Design-token string consumed by the dashboard theme.
    pub fn color_token(&self) -> &'static str {
        match self {
            Self::Info => "severity-info",
            Self::Low => "severity-low",
            Self::Medium => "severity-medium",
            Self::High => "severity-high",
            Self::Critical => "severity-critical",
        }
    }

    /// Icon glyph shown next to the severity label.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "⚪",
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_ascending() {
        assert!(Severity::Info < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Severity::parse("CRITICAL"), Some(Severity::Critical));
        assert_eq!(Severity::parse("High"), Some(Severity::High));
        assert_eq!(Severity::parse("medium"), Some(Severity::Medium));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(Severity::parse("catastrophic"), None);
        assert_eq!(Severity::parse(""), None);
    }

    #[test]
    fn parse_lossy_falls_back_to_info() {
        assert_eq!(Severity::parse_lossy("catastrophic"), Severity::Info);
        assert_eq!(Severity::parse_lossy("low"), Severity::Low);
    }

    #[test]
    fn unknown_severity_renders_as_info() {
        let s = Severity::parse_lossy("not-a-severity");
        assert_eq!(s.color_token(), "severity-info");
        assert_eq!(s.icon(), "⚪");
    }

    #[test]
    fn serde_round_trips_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let back: Severity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Severity::Critical);
    }
}
