//! golangci-lint Language Server Protocol (LSP) server
//!
//! Speaks LSP over stdio and publishes golangci-lint findings as
//! diagnostics in editors like VS Code, Neovim, and others.

use clap::Parser;
use golangci_lint_langserver::lsp::build_service;
use golangci_lint_langserver::{GolangciLintLanguageServer, ServerOptions};
use std::ffi::OsString;
use tower_lsp::Server;

#[derive(Parser, Debug)]
#[command(name = "golangci-lint-langserver")]
#[command(about = "golangci-lint language server", long_about = None)]
#[command(version)]
struct Args {
    /// Output debug logs to stderr
    #[arg(long)]
    debug: bool,

    /// Don't show the linter name in diagnostic messages
    #[arg(long = "nolintername")]
    no_linter_name: bool,
}

/// Rewrite the single-dash long flags older editor setups pass
fn normalize_args<I>(args: I) -> impl Iterator<Item = OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter().map(|arg| {
        if arg == "-debug" || arg == "-nolintername" {
            let mut long = OsString::from("-");
            long.push(&arg);
            long
        } else {
            arg
        }
    })
}

#[tokio::main]
async fn main() {
    let args = Args::parse_from(normalize_args(std::env::args_os()));

    // Set up logging to stderr (stdout is used for LSP communication)
    let default_filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    let options = ServerOptions {
        no_linter_name: args.no_linter_name,
    };

    // Create stdio transport
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        build_service(|client| GolangciLintLanguageServer::with_options(client, options));

    Server::new(stdin, stdout, socket).serve(service).await;
}
