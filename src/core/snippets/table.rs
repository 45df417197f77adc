//! Snippet table model
//!
//! A table maps category names to a category record: an optional activation
//! condition plus an ordered trigger → template map. The JSON layout is the
//! one the editor hosts already ship:
//!
//! ```json
//! {
//!   "basic_snippets": { "snippets": { "->": "\\to" } },
//!   "subscript_snippets": { "condition": "after_single_letter", "snippets": { "1": "_1" } },
//!   "fraction_snippets": { "snippets": { "//": "\\frac{$1}{$2} $0" } }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::utils::error::SnippetResult;
use crate::utils::files::SnippetSource;

pub const BASIC_SNIPPETS: &str = "basic_snippets";
pub const GREEK_LETTERS: &str = "greek_letters";
pub const SUBSCRIPT_SNIPPETS: &str = "subscript_snippets";
pub const ACCENT_SNIPPETS: &str = "accent_snippets";
pub const CUSTOM_SNIPPETS: &str = "custom_snippets";
pub const FRACTION_SNIPPETS: &str = "fraction_snippets";

/// Categories consulted by trigger expansion, highest priority first.
///
/// `fraction_snippets` is not in this list: its presence enables the
/// dedicated fraction rules, which run after every category missed.
pub const EXPANSION_ORDER: [&str; 5] = [
    BASIC_SNIPPETS,
    GREEK_LETTERS,
    SUBSCRIPT_SNIPPETS,
    ACCENT_SNIPPETS,
    CUSTOM_SNIPPETS,
];

/// Activation condition attached to a category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    /// The trigger must directly follow a lone ASCII letter (a variable name)
    AfterSingleLetter,
    /// The trigger must directly follow a backslash command such as `\alpha`
    LatexSymbolBefore,
    /// Unrecognized condition name; never blocks expansion
    Other(String),
}

impl Condition {
    pub fn as_str(&self) -> &str {
        match self {
            Condition::AfterSingleLetter => "after_single_letter",
            Condition::LatexSymbolBefore => "latex_symbol_before",
            Condition::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Condition::Other(_))
    }
}

impl From<String> for Condition {
    fn from(name: String) -> Self {
        match name.as_str() {
            "after_single_letter" => Condition::AfterSingleLetter,
            "latex_symbol_before" => Condition::LatexSymbolBefore,
            _ => Condition::Other(name),
        }
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.as_str().to_string()
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category of the table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub snippets: IndexMap<String, String>,
}

impl SnippetCategory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition(condition: Condition) -> Self {
        Self {
            condition: Some(condition),
            snippets: IndexMap::new(),
        }
    }

    /// Add or replace a trigger
    pub fn insert(&mut self, trigger: impl Into<String>, template: impl Into<String>) {
        self.snippets.insert(trigger.into(), template.into());
    }

    /// Triggers with their templates, longest trigger first.
    ///
    /// Equal-length triggers keep their table order.
    pub fn by_trigger_length(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .snippets
            .iter()
            .map(|(t, r)| (t.as_str(), r.as_str()))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        entries
    }
}

/// The complete trigger table, keyed by category name in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetTable {
    categories: IndexMap<String, SnippetCategory>,
}

impl SnippetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a table from its JSON resource
    pub fn from_json(json: &str) -> SnippetResult<Self> {
        let table: SnippetTable = serde_json::from_str(json)?;
        debug!(
            categories = table.categories.len(),
            triggers = table.len(),
            "snippet table parsed"
        );
        Ok(table)
    }

    /// Read and parse the named resource from `source`
    pub fn load(source: &dyn SnippetSource, name: &str) -> SnippetResult<Self> {
        let json = source.read_table(name)?;
        Self::from_json(&json)
    }

    /// Like [`SnippetTable::load`], but any failure yields an empty table.
    ///
    /// An empty table makes every expansion a no-op, which is the expected
    /// behavior for an editor whose snippet resource is missing.
    pub fn load_or_empty(source: &dyn SnippetSource, name: &str) -> Self {
        match Self::load(source, name) {
            Ok(table) => table,
            Err(err) => {
                warn!(resource = name, error = %err, "snippet table unavailable, expansions disabled");
                Self::new()
            }
        }
    }

    /// Serialize back to pretty JSON
    pub fn to_json_pretty(&self) -> SnippetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn category(&self, name: &str) -> Option<&SnippetCategory> {
        self.categories.get(name)
    }

    pub fn category_mut(&mut self, name: &str) -> Option<&mut SnippetCategory> {
        self.categories.get_mut(name)
    }

    /// All categories in table order
    pub fn categories(&self) -> impl Iterator<Item = (&str, &SnippetCategory)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn insert_category(&mut self, name: impl Into<String>, category: SnippetCategory) {
        self.categories.insert(name.into(), category);
    }

    /// Add a trigger, creating the category without a condition if needed
    pub fn insert_snippet(
        &mut self,
        category: &str,
        trigger: impl Into<String>,
        template: impl Into<String>,
    ) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(trigger, template);
    }

    /// Whether the fraction rules (`//` and `x/`) are enabled
    pub fn has_fraction_snippets(&self) -> bool {
        self.categories.contains_key(FRACTION_SNIPPETS)
    }

    /// Total number of triggers across categories
    pub fn len(&self) -> usize {
        self.categories.values().map(|c| c.snippets.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::files::{MemorySnippetSource, NoopSnippetSource};

    const SAMPLE: &str = r#"{
        "basic_snippets": { "snippets": { "->": "\\to", "-->": "\\longrightarrow" } },
        "subscript_snippets": {
            "condition": "after_single_letter",
            "snippets": { "1": "_1" }
        },
        "odd": { "condition": "in_math_mode" },
        "fraction_snippets": { "snippets": { "//": "\\frac{$1}{$2} $0" } }
    }"#;

    #[test]
    fn test_parse_table() {
        let table = SnippetTable::from_json(SAMPLE).unwrap();

        assert_eq!(table.len(), 4);
        assert!(table.has_fraction_snippets());
        assert_eq!(
            table.category(SUBSCRIPT_SNIPPETS).unwrap().condition,
            Some(Condition::AfterSingleLetter)
        );
        assert_eq!(
            table.category("odd").unwrap().condition,
            Some(Condition::Other("in_math_mode".to_string()))
        );
        assert!(table.category("odd").unwrap().snippets.is_empty());
    }

    #[test]
    fn test_categories_keep_file_order() {
        let table = SnippetTable::from_json(SAMPLE).unwrap();
        let names: Vec<&str> = table.categories().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![BASIC_SNIPPETS, SUBSCRIPT_SNIPPETS, "odd", FRACTION_SNIPPETS]
        );
    }

    #[test]
    fn test_by_trigger_length() {
        let mut category = SnippetCategory::new();
        category.insert("ab", "1");
        category.insert("abcd", "2");
        category.insert("cd", "3");
        category.insert("abc", "4");

        let order: Vec<&str> = category.by_trigger_length().into_iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["abcd", "abc", "ab", "cd"]);
    }

    #[test]
    fn test_condition_round_trips_through_json() {
        let table = SnippetTable::from_json(SAMPLE).unwrap();
        let json = table.to_json_pretty().unwrap();
        assert!(json.contains("\"after_single_letter\""));
        assert!(json.contains("\"in_math_mode\""));
        assert_eq!(SnippetTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = SnippetTable::from_json("{ \"basic_snippets\": \"nope\" }").unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }

    #[test]
    fn test_load_or_empty_degrades() {
        let table = SnippetTable::load_or_empty(&NoopSnippetSource, "snippets.json");
        assert!(table.is_empty());

        let mut source = MemorySnippetSource::new();
        source.add_table("broken.json", "{ not json");
        assert!(SnippetTable::load_or_empty(&source, "broken").is_empty());

        source.add_table("snippets.json", SAMPLE);
        assert_eq!(SnippetTable::load_or_empty(&source, "snippets").len(), 4);
    }

    #[test]
    fn test_insert_snippet_creates_category() {
        let mut table = SnippetTable::new();
        assert!(table.is_empty());
        table.insert_snippet(CUSTOM_SNIPPETS, "RR", "\\mathbb{R}");
        assert_eq!(table.len(), 1);
        assert_eq!(table.category(CUSTOM_SNIPPETS).unwrap().condition, None);
    }
}
