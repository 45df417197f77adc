//! Bundled default snippet table
//!
//! The JSON resource shipped with the crate, for hosts that do not carry
//! their own table.

use lazy_static::lazy_static;
use tracing::warn;

use crate::core::snippets::table::SnippetTable;

/// Raw JSON of the bundled table
pub const DEFAULT_SNIPPETS_JSON: &str = include_str!("snippets.json");

lazy_static! {
    static ref DEFAULT_SNIPPET_TABLE: SnippetTable = match SnippetTable::from_json(DEFAULT_SNIPPETS_JSON) {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "bundled snippet table is invalid");
            SnippetTable::new()
        }
    };
}

/// A copy of the bundled table
pub fn default_snippet_table() -> SnippetTable {
    DEFAULT_SNIPPET_TABLE.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snippets::table::{
        Condition, ACCENT_SNIPPETS, EXPANSION_ORDER, SUBSCRIPT_SNIPPETS,
    };

    #[test]
    fn test_bundled_table_parses() {
        SnippetTable::from_json(DEFAULT_SNIPPETS_JSON).unwrap();
        let table = default_snippet_table();

        for name in EXPANSION_ORDER {
            assert!(table.category(name).is_some(), "missing category {}", name);
        }
        assert!(table.has_fraction_snippets());
        assert!(table.len() > 50);
    }

    #[test]
    fn test_bundled_conditions() {
        let table = default_snippet_table();
        assert_eq!(
            table.category(SUBSCRIPT_SNIPPETS).unwrap().condition,
            Some(Condition::AfterSingleLetter)
        );
        assert_eq!(
            table.category(ACCENT_SNIPPETS).unwrap().condition,
            Some(Condition::LatexSymbolBefore)
        );
    }
}
