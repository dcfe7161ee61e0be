//! Shared parsing utilities.
//!
//! The line classifier lives here so the batch parser and the streaming
//! parser apply exactly the same header grammar.

pub mod line;

pub use line::{Header, LineKind, classify_line, is_header_line};
