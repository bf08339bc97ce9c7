//! Plain-text rendering of parse errors.
//!
//! The output is deterministic and colorless, suitable for logs and tests.
//! Rich terminal rendering lives in the `reckon` facade crate.

mod render;


pub use render::{DiagnosticReport, LineColumn, line_column, render_diagnostic};
