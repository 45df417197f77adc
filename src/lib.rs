//! # texpand
//!
//! LaTeX snippet expansion with tab stops, and LaTeX → Unicode approximation.
//!
//! ## Features
//!
//! - **Snippet Expansion**: shorthand triggers such as `->` or `@a` expand to LaTeX as you type
//! - **Tab Stops**: templates carry `$1`, `$2`, `$0` stops visited with Tab, nestable fractions
//! - **Unicode Output**: `\alpha^{2}` → `α²`, `\frac{1}{2}` → `½` for plain-text contexts
//! - **Table Linting**: diagnostics for snippet tables that parse but misbehave
//! - **WASM Support**: Compiles to WebAssembly for editor integrations in the browser
//!
//! ## Usage Examples
//!
//! ### Snippet Expansion
//!
//! ```rust
//! use texpand::{default_snippet_table, SnippetEngine};
//!
//! let mut engine = SnippetEngine::with_table(default_snippet_table());
//!
//! let edit = engine.process_text("x -->", 5);
//! assert_eq!(edit.text, r"x \longrightarrow");
//!
//! let edit = engine.process_text("//", 2);
//! assert_eq!(edit.text, r"\frac{$1}{$2} $0");
//! assert!(engine.has_active_snippet());
//! ```
//!
//! ### Unicode Conversion
//!
//! ```rust
//! use texpand::convert_to_unicode;
//!
//! assert_eq!(convert_to_unicode(r"\alpha^{2} + \beta_{1}"), "α² + β₁");
//! assert_eq!(convert_to_unicode(r"\frac{1}{2}"), "½");
//! ```

/// Core engines
pub mod core;

/// Data layer - static tables
pub mod data;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core types
pub use core::snippets::{
    check_conditions, expand_snippets, navigation_order, scan_placeholders, ActiveSnippet,
    Condition, Expansion, Placeholder, SnippetCategory, SnippetEdit, SnippetEngine, SnippetTable,
};
pub use core::unicode::{SymbolConverter, UnicodeOptions};

// Re-export data
pub use data::snippets::{default_snippet_table, DEFAULT_SNIPPETS_JSON};
pub use data::symbols;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{SnippetError, SnippetResult};
pub use utils::files;

/// Convert LaTeX to its Unicode approximation with every stage enabled
///
/// Never fails: on an internal fault the input is returned unchanged.
pub fn convert_to_unicode(input: &str) -> String {
    SymbolConverter::new().convert_to_unicode(input)
}

/// Convert LaTeX to Unicode with custom options
pub fn convert_to_unicode_with_options(input: &str, options: UnicodeOptions) -> String {
    SymbolConverter::with_options(options).convert_to_unicode(input)
}

/// Parse a snippet table and lint it in one step
pub fn check_snippets_json(json: &str) -> SnippetResult<diagnostics::CheckResult> {
    let table = SnippetTable::from_json(json)?;
    Ok(diagnostics::check_snippet_table(&table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_to_unicode_basic() {
        assert_eq!(convert_to_unicode(r"\alpha + \beta"), "α + β");
        assert_eq!(convert_to_unicode("a^{12}"), "a¹²");
    }

    #[test]
    fn test_convert_with_options() {
        let result = convert_to_unicode_with_options("x^2", UnicodeOptions::symbols_only());
        // `^2` is itself a table entry, so it folds even with scripts off
        assert_eq!(result, "x²");

        let result = convert_to_unicode_with_options("x^{2}", UnicodeOptions::symbols_only());
        assert_eq!(result, "x^{2}");
    }

    #[test]
    fn test_check_snippets_json() {
        let result = check_snippets_json(DEFAULT_SNIPPETS_JSON).unwrap();
        assert!(!result.has_errors());

        assert!(check_snippets_json("{ nope").is_err());
    }

    #[test]
    fn test_default_table_engine() {
        let mut engine = SnippetEngine::with_table(default_snippet_table());
        let edit = engine.process_text("@a", 2);
        assert_eq!(edit.text, r"\alpha");
        assert!(!engine.has_active_snippet());
    }
}
