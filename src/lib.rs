//! # golangci-lint-langserver
//!
//! A language server that runs [golangci-lint](https://golangci-lint.run)
//! and publishes its findings as LSP diagnostics.
//!
//! ## Features
//!
//! - **Lint on open and save** of Go files, reading content from disk
//! - **One run at a time** through a sequential background worker
//! - **Project-aware invocation** from the workspace root, so
//!   `.golangci.yml` is discovered
//! - **Failure reporting** as a single error diagnostic instead of silence
//!
//! ## Configuration
//!
//! The lint command is sent by the client in `initializationOptions`:
//!
//! ```json
//! {
//!   "command": ["golangci-lint", "run", "--out-format", "json", "--issues-exit-code=1"]
//! }
//! ```
//!
//! The directory of the saved file is appended to the command.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lsp;
pub mod types;

// Re-export main types
pub use lsp::GolangciLintLanguageServer;
pub use types::{
    GolangciLintResult, InitializationOptions, Issue, LangServerError, LintCommand, LintSettings,
    ServerOptions,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
