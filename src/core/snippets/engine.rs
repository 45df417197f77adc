//! Snippet engine: expansion plus tab-stop navigation
//!
//! The engine is driven by the host one input event at a time. Each call gets
//! the full buffer and a cursor, and returns the buffer to write back together
//! with where the cursor (or selection) should go. Placeholder positions are
//! never cached across calls; see [`super::placeholders`].

use serde::Serialize;
use tracing::{debug, warn};

use super::expand::{self, Expansion, FRACTION_TRIGGER};
use super::placeholders::{
    final_placeholder, max_level, navigation_order, nested_fraction_template, scan_placeholders,
    Placeholder,
};
use super::table::SnippetTable;
use crate::utils::offsets::clamp_to_boundary;

// =============================================================================
// Results and session state
// =============================================================================

/// What the host should do with its buffer after an engine call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetEdit {
    pub text: String,
    /// Byte offset into `text`
    pub cursor_position: usize,
    pub changed: bool,
    /// Token to highlight so typing overwrites it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_range: Option<(usize, usize)>,
    /// Set by `process_text` when an expansion happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_placeholders: Option<bool>,
}

impl SnippetEdit {
    /// Echo the input back
    pub fn unchanged(text: &str, cursor_position: usize) -> Self {
        Self {
            text: text.to_string(),
            cursor_position,
            changed: false,
            select_range: None,
            has_placeholders: None,
        }
    }

    fn select(text: &str, placeholder: &Placeholder) -> Self {
        Self {
            text: text.to_string(),
            cursor_position: placeholder.start,
            changed: false,
            select_range: Some((placeholder.start, placeholder.end)),
            has_placeholders: None,
        }
    }
}

/// A template that still has tab stops in the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnippet {
    /// Buffer as of the last engine call that touched the session
    pub text: String,
    /// Byte offset where the outermost template was inserted
    pub start: usize,
}

// =============================================================================
// Engine
// =============================================================================

/// Trigger expansion and tab-stop navigation over a caller-supplied table
#[derive(Debug, Clone)]
pub struct SnippetEngine {
    table: Option<SnippetTable>,
    enabled: bool,
    session: Option<ActiveSnippet>,
    /// Placeholder numbers in text order, as last derived
    signature: Vec<u32>,
    /// Index into the navigation order; -1 is "before the first stop"
    nav_index: isize,
}

impl Default for SnippetEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SnippetEngine {
    /// An engine with no table: every expansion is a no-op until
    /// [`SnippetEngine::update_snippets`] supplies one.
    pub fn new() -> Self {
        Self {
            table: None,
            enabled: true,
            session: None,
            signature: Vec::new(),
            nav_index: -1,
        }
    }

    pub fn with_table(table: SnippetTable) -> Self {
        Self {
            table: Some(table),
            ..Self::new()
        }
    }

    /// Expand the trigger that ends at `cursor`, if any.
    ///
    /// With a session active, `//` nests a fraction one level deeper than
    /// any stop already in the buffer and the single-`/` implicit fraction
    /// is not attempted, so a second `/` can still reach the nested rule.
    /// This departs from plain expansion: inside a session `ab/` is left as
    /// typed instead of becoming `\frac{ab}{$1} $0`.
    pub fn process_text(&mut self, text: &str, cursor: usize) -> SnippetEdit {
        let Some(table) = self.table.as_ref().filter(|_| self.enabled) else {
            return SnippetEdit::unchanged(text, cursor);
        };

        let cursor = clamp_to_boundary(text, cursor);
        let (before, after) = text.split_at(cursor);

        if self.session.is_some() {
            if table.has_fraction_snippets() && before.ends_with(FRACTION_TRIGGER) {
                if let Some(edit) = self.nest_fraction(text, before, after) {
                    return edit;
                }
            }
            let Some(table) = self.table.as_ref() else {
                return SnippetEdit::unchanged(text, cursor);
            };
            return match expand::expand_categories(table, before, after) {
                Some(expansion) => self.apply_expansion(expansion),
                None => SnippetEdit::unchanged(text, cursor),
            };
        }

        let expansion = expand::expand_snippets(table, before, after);
        if !expansion.changed {
            return SnippetEdit::unchanged(text, cursor);
        }
        self.apply_expansion(expansion)
    }

    /// Run trigger matching on a pre-split buffer without touching the session
    pub fn expand_snippets(&self, before: &str, after: &str) -> Expansion {
        match self.table.as_ref().filter(|_| self.enabled) {
            Some(table) => expand::expand_snippets(table, before, after),
            None => Expansion::unchanged(before, after),
        }
    }

    /// Select the next tab stop.
    ///
    /// Stops are re-derived from `text` on every call. When the set of stops
    /// differs from the last one seen (the user overwrote a token, or typed
    /// a new one), navigation restarts from the first remaining stop.
    pub fn handle_tab(&mut self, text: &str, cursor: usize) -> SnippetEdit {
        if !self.enabled || self.session.is_none() {
            return SnippetEdit::unchanged(text, cursor);
        }

        let cursor = clamp_to_boundary(text, cursor);
        let placeholders = scan_placeholders(text);
        if placeholders.is_empty() {
            debug!("no placeholders left, session closed");
            self.clear_active_snippet();
            return SnippetEdit::unchanged(text, cursor);
        }

        self.sync_signature(&placeholders);
        if let Some(session) = self.session.as_mut() {
            session.text = text.to_string();
        }

        let order = navigation_order(&placeholders);
        self.nav_index += 1;
        let index = self.nav_index as usize;

        if let Some(placeholder) = order.get(index) {
            debug!(number = placeholder.number, start = placeholder.start, "tab stop");
            return SnippetEdit::select(text, placeholder);
        }

        if index == order.len() {
            if let Some(last) = final_placeholder(&placeholders) {
                debug!(start = last.start, "final tab stop");
                return SnippetEdit::select(text, last);
            }
        }

        debug!("navigation exhausted, session closed");
        self.clear_active_snippet();
        SnippetEdit::unchanged(text, cursor)
    }

    /// Cancel the session on `Escape` or `Enter`.
    ///
    /// Returns whether a session was cancelled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !matches!(key, "Escape" | "Enter") || self.session.is_none() {
            return false;
        }
        debug!(key, "session cancelled");
        self.clear_active_snippet();
        true
    }

    pub fn has_active_snippet(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_snippet(&self) -> Option<&ActiveSnippet> {
        self.session.as_ref()
    }

    pub fn clear_active_snippet(&mut self) {
        self.session = None;
        self.signature.clear();
        self.nav_index = -1;
    }

    /// Turning the engine off also drops any session
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear_active_snippet();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn snippets(&self) -> Option<&SnippetTable> {
        self.table.as_ref()
    }

    /// Replace the table; any session is dropped
    pub fn update_snippets(&mut self, table: SnippetTable) {
        debug!(triggers = table.len(), "snippet table replaced");
        self.table = Some(table);
        self.clear_active_snippet();
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Start (or restart) a session after an ordinary expansion
    fn apply_expansion(&mut self, expansion: Expansion) -> SnippetEdit {
        let inserted = expansion.start..expansion.before.len();
        let fallback = expansion
            .before
            .len()
            .checked_add_signed(expansion.cursor_offset)
            .unwrap_or(expansion.start)
            .max(expansion.start);

        let text = format!("{}{}", expansion.before, expansion.after);
        let placeholders = scan_placeholders(&text);

        if placeholders.is_empty() {
            self.clear_active_snippet();
            return SnippetEdit {
                text,
                cursor_position: fallback,
                changed: true,
                select_range: None,
                has_placeholders: Some(false),
            };
        }

        let in_template = |p: &&Placeholder| inserted.contains(&p.start);
        let cursor_position = navigation_order(&placeholders)
            .iter()
            .find(in_template)
            .or_else(|| placeholders.iter().filter(|p| p.is_final()).find(in_template))
            .map_or(fallback, |p| p.start);

        debug!(
            start = expansion.start,
            placeholders = placeholders.len(),
            "session started"
        );
        self.session = Some(ActiveSnippet {
            text: text.clone(),
            start: expansion.start,
        });
        self.signature = placeholders.iter().map(|p| p.number).collect();
        self.nav_index = -1;

        SnippetEdit {
            text,
            cursor_position,
            changed: true,
            select_range: None,
            has_placeholders: Some(true),
        }
    }

    /// Replace the trailing `//` with a fraction on the next free level.
    ///
    /// `None` when no level above the deepest one is numberable.
    fn nest_fraction(&mut self, text: &str, before: &str, after: &str) -> Option<SnippetEdit> {
        let level = match max_level(&scan_placeholders(text)) {
            Some(deepest) => deepest.checked_add(1)?,
            None => 0,
        };
        let Some(template) = nested_fraction_template(level) else {
            warn!(level, "no free placeholder numbers for a nested fraction");
            return None;
        };
        let prefix = &before[..before.len() - FRACTION_TRIGGER.len()];
        let new_text = format!("{}{}{}", prefix, template, after);

        let placeholders = scan_placeholders(&new_text);
        let first = level * 10 + 1;
        let cursor_position = placeholders
            .iter()
            .find(|p| p.number == first && p.start >= prefix.len())
            .map_or(prefix.len(), |p| p.start);

        debug!(level, "nested fraction");
        if let Some(session) = self.session.as_mut() {
            session.text = new_text.clone();
        }
        self.signature = placeholders.iter().map(|p| p.number).collect();
        self.nav_index = -1;

        Some(SnippetEdit {
            text: new_text,
            cursor_position,
            changed: true,
            select_range: None,
            has_placeholders: Some(true),
        })
    }

    fn sync_signature(&mut self, placeholders: &[Placeholder]) {
        let signature: Vec<u32> = placeholders.iter().map(|p| p.number).collect();
        if signature != self.signature {
            debug!(?signature, "placeholders changed, navigation restarted");
            self.signature = signature;
            self.nav_index = -1;
        }
    }
}
