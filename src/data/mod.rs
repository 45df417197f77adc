//! Data layer - Static tables
//!
//! This module contains the static data used by the crate:
//! - LaTeX → Unicode glyph tables
//! - The bundled default snippet table

pub mod snippets;
pub mod symbols;

// Re-export commonly used items
pub use snippets::{default_snippet_table, DEFAULT_SNIPPETS_JSON};
pub use symbols::{
    lookup_unicode_symbol, subscript_of, superscript_of, vulgar_fraction,
    SORTED_UNICODE_SYMBOLS, UNICODE_SYMBOLS,
};
