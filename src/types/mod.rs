//! Core type definitions for the language server

mod error;
mod options;
mod results;

pub use error::*;
pub use options::*;
pub use results::*;
