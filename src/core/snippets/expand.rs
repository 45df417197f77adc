//! Trigger matching and template substitution

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::table::{Condition, SnippetTable, EXPANSION_ORDER};

/// Trigger for an explicit fraction
pub const FRACTION_TRIGGER: &str = "//";

/// Template produced by [`FRACTION_TRIGGER`]
pub const FRACTION_TEMPLATE: &str = "\\frac{$1}{$2} $0";

lazy_static! {
    /// A backslash command ending right before the trigger, e.g. `\alpha`
    static ref TRAILING_COMMAND_RE: Regex = Regex::new(r"\\[a-zA-Z]+$").unwrap();

    /// An implicit numerator directly followed by one `/`
    static ref IMPLICIT_FRACTION_RE: Regex = Regex::new(r"([a-zA-Z0-9_^{}\\]+)/$").unwrap();
}

/// Outcome of one expansion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Text before the cursor, with the trigger replaced by its template
    pub before: String,
    /// Text after the cursor (never modified)
    pub after: String,
    /// Cursor offset relative to the end of `before`; zero or negative
    pub cursor_offset: isize,
    /// Byte offset in `before` where the template was inserted
    pub start: usize,
    pub changed: bool,
}

impl Expansion {
    pub fn unchanged(before: &str, after: &str) -> Self {
        Self {
            before: before.to_string(),
            after: after.to_string(),
            cursor_offset: 0,
            start: before.len(),
            changed: false,
        }
    }

    fn replaced(prefix: &str, template: &str, after: &str, cursor_offset: isize) -> Self {
        Self {
            before: format!("{}{}", prefix, template),
            after: after.to_string(),
            cursor_offset,
            start: prefix.len(),
            changed: true,
        }
    }
}

/// Try every category in priority order, then the fraction rules.
///
/// At most one expansion happens per call: the first match wins.
pub fn expand_snippets(table: &SnippetTable, before: &str, after: &str) -> Expansion {
    expand_categories(table, before, after)
        .or_else(|| expand_fractions(table, before, after))
        .unwrap_or_else(|| Expansion::unchanged(before, after))
}

/// The category pass of [`expand_snippets`], without the fraction rules
pub fn expand_categories(table: &SnippetTable, before: &str, after: &str) -> Option<Expansion> {
    EXPANSION_ORDER
        .iter()
        .find_map(|name| expand_category(table, name, before, after))
}

/// Match the longest eligible trigger of one category
fn expand_category(
    table: &SnippetTable,
    name: &str,
    before: &str,
    after: &str,
) -> Option<Expansion> {
    let category = table.category(name)?;

    for (trigger, template) in category.by_trigger_length() {
        if trigger.is_empty() || !before.ends_with(trigger) {
            continue;
        }
        if !check_conditions(before, trigger, category.condition.as_ref()) {
            continue;
        }

        debug!(category = name, trigger, "snippet expanded");
        let prefix = &before[..before.len() - trigger.len()];
        return Some(Expansion::replaced(
            prefix,
            template,
            after,
            cursor_offset_for(template),
        ));
    }

    None
}

/// Whether `condition` allows `trigger` to fire at the end of `before`.
///
/// `before` still ends with the trigger.
pub fn check_conditions(before: &str, trigger: &str, condition: Option<&Condition>) -> bool {
    let Some(condition) = condition else {
        return true;
    };
    let Some(preceding) = before.strip_suffix(trigger) else {
        return false;
    };

    match condition {
        Condition::AfterSingleLetter => {
            let mut chars = preceding.chars().rev();
            match (chars.next(), chars.next()) {
                (Some(letter), previous) if letter.is_ascii_alphabetic() => {
                    !previous.is_some_and(|c| c.is_ascii_alphabetic())
                }
                _ => false,
            }
        }
        Condition::LatexSymbolBefore => TRAILING_COMMAND_RE.is_match(preceding),
        Condition::Other(_) => true,
    }
}

/// Cursor offset (from the template end) for templates without tab stops.
///
/// Lands inside the first `{}`, else on the first `$1`, else at the end.
pub fn cursor_offset_for(template: &str) -> isize {
    let len = template.len() as isize;
    if let Some(index) = template.find("{}") {
        index as isize + 1 - len
    } else if let Some(index) = template.find("$1") {
        index as isize - len
    } else {
        0
    }
}

/// `//` and `numerator/` rules; enabled by a `fraction_snippets` category
pub fn expand_fractions(table: &SnippetTable, before: &str, after: &str) -> Option<Expansion> {
    if !table.has_fraction_snippets() {
        return None;
    }

    if let Some(prefix) = before.strip_suffix(FRACTION_TRIGGER) {
        debug!(trigger = FRACTION_TRIGGER, "fraction expanded");
        return Some(Expansion::replaced(prefix, FRACTION_TEMPLATE, after, 0));
    }

    let caps = IMPLICIT_FRACTION_RE.captures(before)?;
    let numerator = caps.get(1)?;
    let template = format!("\\frac{{{}}}{{$1}} $0", numerator.as_str());
    debug!(numerator = numerator.as_str(), "implicit fraction expanded");
    Some(Expansion::replaced(
        &before[..numerator.start()],
        &template,
        after,
        0,
    ))
}
