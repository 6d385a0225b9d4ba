//! Convert golangci-lint results to LSP diagnostics

use super::runner::ToolOutcome;
use super::utils::to_point_range;
use crate::types::{Issue, IssueSeverity, ServerOptions};
use std::path::Path;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Range};

/// Convert a classified run into the diagnostics for `path`.
///
/// `working_dir` resolves issue filenames reported relative to the
/// process working directory.
pub fn outcome_to_diagnostics(
    outcome: ToolOutcome,
    path: &Path,
    working_dir: &Path,
    options: ServerOptions,
) -> Vec<Diagnostic> {
    match outcome {
        ToolOutcome::NoFiles => Vec::new(),
        ToolOutcome::Failed(message) | ToolOutcome::Malformed(message) => {
            vec![failure_diagnostic(message)]
        }
        ToolOutcome::Report(result) => result
            .issues
            .iter()
            .filter(|issue| issue_belongs_to(issue, path, working_dir))
            .map(|issue| issue_to_diagnostic(issue, options))
            .collect(),
    }
}

/// Whether an issue was reported for exactly `path`
pub fn issue_belongs_to(issue: &Issue, path: &Path, working_dir: &Path) -> bool {
    let filename = Path::new(&issue.pos.filename);
    if filename.is_absolute() {
        filename == path
    } else {
        working_dir.join(filename) == path
    }
}

/// Convert an Issue to an LSP Diagnostic
pub fn issue_to_diagnostic(issue: &Issue, options: ServerOptions) -> Diagnostic {
    Diagnostic {
        range: to_point_range(issue.pos.line, issue.pos.column),
        severity: Some(severity_to_lsp(issue.severity())),
        source: Some(issue.from_linter.clone()),
        message: format_message(issue, options),
        ..Default::default()
    }
}

/// Single error diagnostic standing in for a failed run
pub fn failure_diagnostic(message: impl Into<String>) -> Diagnostic {
    Diagnostic {
        range: Range::default(),
        severity: Some(DiagnosticSeverity::ERROR),
        message: message.into(),
        ..Default::default()
    }
}

/// Convert golangci-lint severity to LSP DiagnosticSeverity
fn severity_to_lsp(severity: IssueSeverity) -> DiagnosticSeverity {
    match severity {
        IssueSeverity::Error => DiagnosticSeverity::ERROR,
        IssueSeverity::Warning => DiagnosticSeverity::WARNING,
        IssueSeverity::Information => DiagnosticSeverity::INFORMATION,
        IssueSeverity::Hint => DiagnosticSeverity::HINT,
    }
}

fn format_message(issue: &Issue, options: ServerOptions) -> String {
    if options.no_linter_name {
        issue.text.clone()
    } else {
        format!("{}: {}", issue.from_linter, issue.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GolangciLintResult, IssuePosition};
    use pretty_assertions::assert_eq;
    use tower_lsp::lsp_types::Position;

    fn create_test_issue(filename: &str, line: u32, column: u32, severity: &str) -> Issue {
        Issue {
            from_linter: "errcheck".to_string(),
            text: "Error return value is not checked".to_string(),
            severity: severity.to_string(),
            pos: IssuePosition {
                filename: filename.to_string(),
                line,
                column,
            },
        }
    }

    #[test]
    fn test_severity_conversion() {
        assert_eq!(severity_to_lsp(IssueSeverity::Error), DiagnosticSeverity::ERROR);
        assert_eq!(
            severity_to_lsp(IssueSeverity::Warning),
            DiagnosticSeverity::WARNING
        );
        assert_eq!(
            severity_to_lsp(IssueSeverity::Information),
            DiagnosticSeverity::INFORMATION
        );
        assert_eq!(severity_to_lsp(IssueSeverity::Hint), DiagnosticSeverity::HINT);
    }

    #[test]
    fn test_issue_to_diagnostic() {
        let issue = create_test_issue("/proj/foo.go", 12, 9, "error");
        let diagnostic = issue_to_diagnostic(&issue, ServerOptions::default());

        assert_eq!(diagnostic.range.start, Position::new(11, 8));
        assert_eq!(diagnostic.range.end, Position::new(11, 8));
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diagnostic.source, Some("errcheck".to_string()));
        assert_eq!(
            diagnostic.message,
            "errcheck: Error return value is not checked"
        );
    }

    #[test]
    fn test_position_zero_clamps() {
        let issue = create_test_issue("/proj/foo.go", 0, 0, "");
        let diagnostic = issue_to_diagnostic(&issue, ServerOptions::default());
        assert_eq!(diagnostic.range.start, Position::new(0, 0));
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::WARNING));
    }

    #[test]
    fn test_message_without_linter_name() {
        let issue = create_test_issue("/proj/foo.go", 1, 1, "");
        let diagnostic = issue_to_diagnostic(&issue, ServerOptions::new().no_linter_name());
        assert_eq!(diagnostic.message, "Error return value is not checked");
        assert_eq!(diagnostic.source, Some("errcheck".to_string()));
    }

    #[test]
    fn test_report_filters_sibling_files() {
        let result = GolangciLintResult {
            issues: vec![
                create_test_issue("/proj/pkg/foo.go", 3, 2, ""),
                create_test_issue("/proj/pkg/bar.go", 7, 1, ""),
            ],
            report: None,
        };
        let diagnostics = outcome_to_diagnostics(
            ToolOutcome::Report(result),
            Path::new("/proj/pkg/foo.go"),
            Path::new("/proj"),
            ServerOptions::default(),
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range.start, Position::new(2, 1));
    }

    #[test]
    fn test_report_preserves_order() {
        let result = GolangciLintResult {
            issues: vec![
                create_test_issue("/proj/foo.go", 9, 1, ""),
                create_test_issue("/proj/foo.go", 2, 1, ""),
            ],
            report: None,
        };
        let diagnostics = outcome_to_diagnostics(
            ToolOutcome::Report(result),
            Path::new("/proj/foo.go"),
            Path::new("/proj"),
            ServerOptions::default(),
        );
        let lines: Vec<u32> = diagnostics.iter().map(|d| d.range.start.line).collect();
        assert_eq!(lines, vec![8, 1]);
    }

    #[test]
    fn test_relative_filename_resolves_against_working_dir() {
        let issue = create_test_issue("pkg/foo.go", 1, 1, "");
        assert!(issue_belongs_to(
            &issue,
            Path::new("/proj/pkg/foo.go"),
            Path::new("/proj")
        ));
        assert!(!issue_belongs_to(
            &issue,
            Path::new("/proj/pkg/foo.go"),
            Path::new("/proj/pkg")
        ));
    }

    #[test]
    fn test_filename_match_is_case_sensitive() {
        let issue = create_test_issue("/proj/Foo.go", 1, 1, "");
        assert!(!issue_belongs_to(
            &issue,
            Path::new("/proj/foo.go"),
            Path::new("/proj")
        ));
    }

    #[test]
    fn test_failure_outcomes() {
        for outcome in [
            ToolOutcome::Failed("can't load config".to_string()),
            ToolOutcome::Malformed("can't load config".to_string()),
        ] {
            let diagnostics = outcome_to_diagnostics(
                outcome,
                Path::new("/proj/foo.go"),
                Path::new("/proj"),
                ServerOptions::default(),
            );
            assert_eq!(diagnostics, vec![failure_diagnostic("can't load config")]);
            assert_eq!(diagnostics[0].severity, Some(DiagnosticSeverity::ERROR));
            assert_eq!(diagnostics[0].range, Range::default());
            assert!(diagnostics[0].source.is_none());
        }
    }

    #[test]
    fn test_no_files_outcome() {
        let diagnostics = outcome_to_diagnostics(
            ToolOutcome::NoFiles,
            Path::new("/proj/foo.go"),
            Path::new("/proj"),
            ServerOptions::default(),
        );
        assert!(diagnostics.is_empty());
    }
}
