//! Language Server Protocol (LSP) implementation
//!
//! The server lints on open and on save, reading files from disk:
//! - Lint requests are queued and run one at a time by a background worker
//! - Each run invokes the configured golangci-lint command on the file's directory
//! - Findings for the requested file are published as diagnostics
//!
//! # Example
//!
//! ```ignore
//! # use golangci_lint_langserver::lsp::{GolangciLintLanguageServer, build_service};
//! # use tower_lsp::Server;
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let stdin = tokio::io::stdin();
//! let stdout = tokio::io::stdout();
//!
//! let (service, socket) = build_service(GolangciLintLanguageServer::new);
//!
//! Server::new(stdin, stdout, socket).serve(service).await;
//! # Ok(())
//! # }
//! ```

mod backend;
pub mod diagnostics;
pub mod runner;
mod service;
pub mod utils;
mod worker;

pub use backend::{GolangciLintLanguageServer, SERVER_NAME};
pub use runner::{
    CommandRunner, Invocation, NO_FILES_EXIT_CODE, ProcessRunner, ToolOutcome, ToolOutput,
};
pub use service::{RequestLogService, build_service};
pub use worker::{DiagnosticsPublisher, LintQueue, Linter};
