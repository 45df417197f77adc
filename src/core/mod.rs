//! Core text-transformation modules
//!
//! This module contains the two engines:
//! - `snippets`: trigger expansion and tab-stop navigation
//! - `unicode`: LaTeX to Unicode approximation

pub mod snippets;
pub mod unicode;

// Re-export main types
pub use snippets::{
    ActiveSnippet, Condition, Expansion, Placeholder, SnippetCategory, SnippetEdit,
    SnippetEngine, SnippetTable,
};
pub use unicode::{SymbolConverter, UnicodeOptions};
