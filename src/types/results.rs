//! golangci-lint JSON result types
//!
//! Only the parts of the `--out-format json` document the server consumes
//! are modelled; unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level JSON document printed by golangci-lint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GolangciLintResult {
    /// Reported issues, across every file in the linted directory
    #[serde(default, deserialize_with = "null_as_empty")]
    pub issues: Vec<Issue>,

    /// Run report (warnings, fatal error)
    #[serde(default)]
    pub report: Option<Report>,
}

/// A single finding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Issue {
    /// Name of the linter that produced the issue
    pub from_linter: String,

    /// Finding text
    pub text: String,

    /// Raw severity string, empty unless severity rules are configured
    #[serde(default)]
    pub severity: String,

    /// Position of the finding
    pub pos: IssuePosition,
}

/// Source position of an issue, 1-based
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IssuePosition {
    /// File the issue belongs to
    pub filename: String,

    /// Line number (1-based, 0 when unknown)
    #[serde(default)]
    pub line: u32,

    /// Column number (1-based, 0 when unknown)
    #[serde(default)]
    pub column: u32,
}

/// Run report attached to the result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Report {
    /// Non-fatal warnings emitted during the run
    #[serde(default, deserialize_with = "null_as_empty")]
    pub warnings: Vec<ReportWarning>,

    /// Fatal error message, if the run failed after producing output
    #[serde(default)]
    pub error: Option<String>,
}

/// Warning entry of a [`Report`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportWarning {
    /// Component that emitted the warning
    #[serde(default)]
    pub tag: String,

    /// Warning text
    pub text: String,
}

/// Severity vocabulary used by golangci-lint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueSeverity {
    /// Error level
    Error,
    /// Warning level
    Warning,
    /// Information level
    Information,
    /// Hint level
    Hint,
}

impl IssueSeverity {
    /// Parse a raw severity string.
    ///
    /// Matching is case-insensitive. Empty and unrecognized values map to
    /// [`IssueSeverity::Warning`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "err" | "error" => IssueSeverity::Error,
            "warn" | "warning" => IssueSeverity::Warning,
            "info" | "information" => IssueSeverity::Information,
            "hint" => IssueSeverity::Hint,
            _ => IssueSeverity::Warning,
        }
    }
}

impl Issue {
    /// Severity of this issue in the tool's vocabulary
    pub fn severity(&self) -> IssueSeverity {
        IssueSeverity::parse(&self.severity)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
