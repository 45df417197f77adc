//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics for snippet tables
//! - Snippet table sources
//! - Cursor offset conversion
//! - Error types and result types

pub mod diagnostics;
pub mod error;
pub mod files;
pub mod offsets;

// Re-export commonly used items
pub use diagnostics::{
    check_snippet_table, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel,
};
pub use error::{SnippetError, SnippetResult};
pub use files::{MemorySnippetSource, NoopSnippetSource, SnippetSource, SourceError};
pub use offsets::{byte_to_utf16, clamp_to_boundary, utf16_to_byte};

#[cfg(not(target_arch = "wasm32"))]
pub use files::StdSnippetSource;
