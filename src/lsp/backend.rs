//! LSP backend implementation
//!
//! This module provides the main Language Server implementation.

use super::runner::{CommandRunner, ProcessRunner};
use super::utils::uri_to_path;
use super::worker::{LintQueue, Linter};
use crate::types::{
    InitializationOptions, LangServerError, LintCommand, LintSettings, ServerOptions,
};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

/// Name reported in `serverInfo`
pub const SERVER_NAME: &str = "golangci-lint-langserver";

/// The golangci-lint Language Server
#[derive(Clone)]
pub struct GolangciLintLanguageServer {
    client: Client,
    settings: Arc<OnceLock<LintSettings>>,
    queue: Arc<LintQueue>,
}

impl GolangciLintLanguageServer {
    /// Create a new language server instance
    pub fn new(client: Client) -> Self {
        Self::with_options(client, ServerOptions::default())
    }

    /// Create a language server with explicit options
    pub fn with_options(client: Client, options: ServerOptions) -> Self {
        Self::with_runner(client, options, ProcessRunner)
    }

    /// Create a language server that runs lint commands through `runner`.
    ///
    /// Spawns the lint worker, so this must be called inside a tokio runtime.
    pub fn with_runner<R>(client: Client, options: ServerOptions, runner: R) -> Self
    where
        R: CommandRunner,
    {
        let settings = Arc::new(OnceLock::new());
        let linter = Linter::new(Arc::clone(&settings), runner, options);
        let (queue, _worker) = LintQueue::spawn(linter, client.clone());

        Self {
            client,
            settings,
            queue: Arc::new(queue),
        }
    }

    /// Queue a lint run for a document
    fn request_lint(&self, uri: Url) {
        log::debug!("queueing lint for {}", uri);
        if let Err(e) = self.queue.enqueue(uri.clone()) {
            log::warn!("not linting {}: {}", uri, e);
        }
    }
}

/// Build session settings from the `initialize` parameters
#[allow(deprecated)]
fn session_settings(params: &InitializeParams) -> crate::types::Result<LintSettings> {
    let root_uri = params.root_uri.as_ref().or_else(|| {
        params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .map(|folder| &folder.uri)
    });

    let root_dir = match root_uri {
        Some(uri) => Some(
            uri_to_path(uri).ok_or_else(|| LangServerError::UnsupportedUri(uri.to_string()))?,
        ),
        None => params
            .root_path
            .as_ref()
            .map(PathBuf::from)
            .filter(|path| path.is_absolute()),
    };

    let options = InitializationOptions::from_value(params.initialization_options.clone())?;
    let command = LintCommand::new(options.command)?;

    Ok(LintSettings::new(root_dir, command))
}

fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::NONE),
                save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                ..Default::default()
            },
        )),
        ..Default::default()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for GolangciLintLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let settings =
            session_settings(&params).map_err(|e| Error::invalid_params(e.to_string()))?;

        log::info!(
            "initializing with root {:?} and command {} {}",
            settings.root_dir(),
            settings.command.program,
            settings.command.args.join(" ")
        );

        if self.settings.set(settings).is_err() {
            return Err(Error::invalid_request());
        }

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "golangci-lint-langserver initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        if !self.queue.close() {
            log::error!("shutdown called on an already closed lint queue");
        }
        log::info!("shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.request_lint(params.text_document.uri);
    }

    // Edits are linted on save, from disk.
    async fn did_change(&self, _: DidChangeTextDocumentParams) {}

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        self.request_lint(params.text_document.uri);
    }

    async fn did_close(&self, _: DidCloseTextDocumentParams) {}

    async fn did_change_configuration(&self, _: DidChangeConfigurationParams) {}
}
