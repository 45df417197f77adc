//! Snippet expansion and tab-stop navigation
//!
//! Typing a trigger such as `->` or `//` right before the cursor replaces it
//! with a LaTeX template. Templates may carry `$N` tab stops that the user
//! then visits with Tab.
//!
//! # Module Structure
//!
//! - `table`: the category → trigger → template table and its JSON form
//! - `expand`: trigger matching, activation conditions, fraction rules
//! - `placeholders`: scanning and ordering of `$N` tokens
//! - `engine`: the stateful `SnippetEngine` hosts drive per keystroke
//!
//! # Example
//!
//! ```rust
//! use texpand::core::snippets::{SnippetEngine, SnippetTable};
//!
//! let table = SnippetTable::from_json(
//!     r#"{ "fraction_snippets": { "snippets": { "//": "\\frac{$1}{$2} $0" } } }"#,
//! ).unwrap();
//! let mut engine = SnippetEngine::with_table(table);
//!
//! let edit = engine.process_text("//", 2);
//! assert_eq!(edit.text, r"\frac{$1}{$2} $0");
//!
//! let tab = engine.handle_tab(&edit.text, edit.cursor_position);
//! assert_eq!(tab.select_range, Some((6, 8)));
//! ```

pub mod engine;
pub mod expand;
pub mod placeholders;
pub mod table;

#[cfg(test)]
mod tests;

// Re-export public API
pub use engine::{ActiveSnippet, SnippetEdit, SnippetEngine};
pub use expand::{check_conditions, expand_snippets, Expansion};
pub use placeholders::{navigation_order, scan_placeholders, Placeholder};
pub use table::{Condition, SnippetCategory, SnippetTable};
