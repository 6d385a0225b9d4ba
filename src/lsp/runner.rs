//! Running golangci-lint and classifying its output

use crate::types::{GolangciLintResult, LangServerError, LintSettings};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// Exit code golangci-lint uses when no Go files were found.
///
/// See `pkg/exitcodes/exitcodes.go` in the golangci-lint sources.
pub const NO_FILES_EXIT_CODE: i32 = 5;

/// A fully resolved lint process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable to run
    pub program: String,
    /// Arguments, ending with the directory to lint
    pub args: Vec<OsString>,
    /// Working directory of the process
    pub working_dir: PathBuf,
}

impl Invocation {
    /// Build the invocation that lints the directory containing `path`.
    ///
    /// Documents under the workspace root run from the root with a
    /// root-relative directory argument, so golangci-lint finds the
    /// project configuration. Anything else runs from its own directory.
    pub fn new(settings: &LintSettings, path: &Path) -> Self {
        let dir = path.parent().unwrap_or(path);

        let (working_dir, target) = match settings
            .root_dir()
            .and_then(|root| dir.strip_prefix(root).ok().map(|rel| (root, rel)))
        {
            Some((root, rel)) if rel.as_os_str().is_empty() => {
                (root.to_path_buf(), PathBuf::from("."))
            }
            Some((root, rel)) => (root.to_path_buf(), rel.to_path_buf()),
            None => (dir.to_path_buf(), dir.to_path_buf()),
        };

        let mut args = Vec::with_capacity(settings.command.args.len() + 1);
        args.extend(settings.command.args.iter().map(OsString::from));
        args.push(target.into_os_string());

        Self {
            program: settings.command.program.clone(),
            args,
            working_dir,
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        write!(f, " (in {})", self.working_dir.display())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: Vec<u8>,
    /// Captured standard error
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

impl From<std::process::Output> for ToolOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Executes lint invocations
#[tower_lsp::async_trait]
pub trait CommandRunner: Send + Sync + 'static {
    /// Run the invocation to completion and capture its output
    async fn run(&self, invocation: &Invocation) -> std::io::Result<ToolOutput>;
}

/// Runs invocations as child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[tower_lsp::async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> std::io::Result<ToolOutput> {
        let output = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;
        Ok(output.into())
    }
}

/// Classified result of a lint run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// No lintable files in scope
    NoFiles,
    /// The tool failed without producing a result
    Failed(String),
    /// The tool produced output that is not a valid result
    Malformed(String),
    /// A parsed result
    Report(GolangciLintResult),
}

impl ToolOutcome {
    /// Outcome for a process that could not be started
    pub fn spawn_failed(invocation: &Invocation, source: std::io::Error) -> Self {
        let err = LangServerError::Spawn {
            program: invocation.program.clone(),
            working_dir: invocation.working_dir.clone(),
            source,
        };
        ToolOutcome::Failed(err.to_string())
    }
}

/// Classify a finished run.
///
/// The checks run in a fixed order: the "no files" exit code, then empty
/// stdout (golangci-lint writes fatal errors to stderr), then decoding.
/// Stdout counts as empty only when it has no bytes at all; a lone
/// newline is handed to the decoder and reported as malformed.
pub fn classify(program: &str, output: &ToolOutput) -> ToolOutcome {
    if output.exit_code == Some(NO_FILES_EXIT_CODE) {
        return ToolOutcome::NoFiles;
    }

    if output.stdout.is_empty() {
        if output.success() {
            return ToolOutcome::Report(GolangciLintResult::default());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if stderr.trim().is_empty() {
            match output.exit_code {
                Some(code) => log::warn!("{} exited with status {} and no output", program, code),
                None => log::warn!("{} was terminated by a signal", program),
            }
        }
        return ToolOutcome::Failed(stderr);
    }

    match serde_json::from_slice::<GolangciLintResult>(&output.stdout) {
        Ok(result) => ToolOutcome::Report(result),
        Err(e) => ToolOutcome::Malformed(e.to_string()),
    }
}
