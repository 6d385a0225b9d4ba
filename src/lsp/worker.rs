//! Sequential lint worker
//!
//! Lint requests go through a FIFO queue drained by a single task, so at
//! most one golangci-lint process runs per session and diagnostics are
//! published in request order.

use super::diagnostics::{failure_diagnostic, outcome_to_diagnostics};
use super::runner::{CommandRunner, Invocation, ToolOutcome, classify};
use super::utils::uri_to_path;
use crate::types::{LangServerError, LintSettings, Result, ServerOptions};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower_lsp::Client;
use tower_lsp::lsp_types::{Diagnostic, Url};

/// Destination for published diagnostics
#[tower_lsp::async_trait]
pub trait DiagnosticsPublisher: Send + Sync + 'static {
    /// Publish the full diagnostic set for `uri`
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>) -> std::io::Result<()>;
}

#[tower_lsp::async_trait]
impl DiagnosticsPublisher for Client {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>) -> std::io::Result<()> {
        self.publish_diagnostics(uri, diagnostics, None).await;
        Ok(())
    }
}

/// Lints one document at a time using the session settings
pub struct Linter<R> {
    settings: Arc<OnceLock<LintSettings>>,
    runner: R,
    options: ServerOptions,
}

impl<R: CommandRunner> Linter<R> {
    /// Create a linter reading settings from the shared session cell
    pub fn new(settings: Arc<OnceLock<LintSettings>>, runner: R, options: ServerOptions) -> Self {
        Self {
            settings,
            runner,
            options,
        }
    }

    /// Lint the document behind `uri`.
    ///
    /// Returns `None` when the session is not initialized yet.
    pub async fn lint(&self, uri: &Url) -> Option<Vec<Diagnostic>> {
        let settings = self.settings.get()?;

        let Some(path) = uri_to_path(uri) else {
            let err = LangServerError::UnsupportedUri(uri.to_string());
            return Some(vec![failure_diagnostic(err.to_string())]);
        };

        let invocation = Invocation::new(settings, &path);
        log::debug!("golangci-lint command: {}", invocation);

        let outcome = match self.runner.run(&invocation).await {
            Ok(output) => classify(&invocation.program, &output),
            Err(e) => ToolOutcome::spawn_failed(&invocation, e),
        };

        match &outcome {
            ToolOutcome::Report(result) => {
                log::debug!("golangci-lint reported {} issue(s)", result.issues.len());
                if let Some(report) = &result.report {
                    for warning in &report.warnings {
                        log::debug!("golangci-lint warning [{}]: {}", warning.tag, warning.text);
                    }
                    if let Some(error) = &report.error {
                        log::warn!("golangci-lint reported an error: {}", error);
                    }
                }
            }
            ToolOutcome::NoFiles => log::debug!("no Go files to lint for {}", uri),
            ToolOutcome::Failed(message) | ToolOutcome::Malformed(message) => {
                log::warn!("golangci-lint failed for {}: {}", uri, message);
            }
        }

        Some(outcome_to_diagnostics(
            outcome,
            &path,
            &invocation.working_dir,
            self.options,
        ))
    }
}

/// Producer side of the lint queue
pub struct LintQueue {
    sender: Mutex<Option<mpsc::UnboundedSender<Url>>>,
}

impl LintQueue {
    /// Spawn the worker task and return the queue feeding it
    pub fn spawn<R, P>(linter: Linter<R>, publisher: P) -> (Self, JoinHandle<()>)
    where
        R: CommandRunner,
        P: DiagnosticsPublisher,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_worker(receiver, linter, publisher));
        let queue = Self {
            sender: Mutex::new(Some(sender)),
        };
        (queue, handle)
    }

    /// Queue a lint request without waiting for it to run
    pub fn enqueue(&self, uri: Url) -> Result<()> {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match sender.as_ref() {
            Some(sender) => sender.send(uri).map_err(|_| LangServerError::QueueClosed),
            None => Err(LangServerError::QueueClosed),
        }
    }

    /// Close the queue; the worker drains pending requests and exits.
    ///
    /// Returns `false` if the queue was already closed.
    pub fn close(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }
}

async fn run_worker<R, P>(
    mut receiver: mpsc::UnboundedReceiver<Url>,
    linter: Linter<R>,
    publisher: P,
) where
    R: CommandRunner,
    P: DiagnosticsPublisher,
{
    while let Some(uri) = receiver.recv().await {
        let Some(diagnostics) = linter.lint(&uri).await else {
            log::warn!("dropping lint request for {}: server not initialized", uri);
            continue;
        };

        if let Err(e) = publisher.publish(uri, diagnostics).await {
            log::error!("failed to publish diagnostics: {}", e);
        }
    }
    log::debug!("lint queue closed, worker exiting");
}
