//! Utility functions for LSP implementation

use std::path::PathBuf;
use tower_lsp::lsp_types::{Position, Range, Url};

/// Convert a file:// URI to a PathBuf
pub fn uri_to_path(uri: &Url) -> Option<PathBuf> {
    if uri.scheme() != "file" {
        return None;
    }
    uri.to_file_path().ok()
}

/// Convert 1-based line/column to LSP Position (0-based)
///
/// Tools report 0 for unknown positions; those clamp to 0.
pub fn to_position(line: u32, column: u32) -> Position {
    Position {
        line: line.saturating_sub(1),
        character: column.saturating_sub(1),
    }
}

/// Zero-width LSP Range at a 1-based line/column
pub fn to_point_range(line: u32, column: u32) -> Range {
    let position = to_position(line, column);
    Range {
        start: position,
        end: position,
    }
}
