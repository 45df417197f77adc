//! Snippet table diagnostics
//!
//! A table that parses can still misbehave at the keyboard. This module
//! lints a loaded [`SnippetTable`] for the mistakes that show up as "my
//! snippet never fires":
//!
//! - Unknown condition names (the category then fires unconditionally)
//! - Empty triggers
//! - Triggers that can never fire because another one expands first
//! - Templates whose tab stops skip a number
//! - Categories the engine never consults
//!
//! ## Example
//!
//! ```rust
//! use texpand::core::snippets::SnippetTable;
//! use texpand::utils::diagnostics::check_snippet_table;
//!
//! let table = SnippetTable::from_json(r#"{ "basic_snippets": { "snippets": { "": "x" } } }"#).unwrap();
//! assert!(check_snippet_table(&table).has_errors());
//! ```

use std::fmt;

use fxhash::FxHashMap;

use crate::core::snippets::placeholders::scan_placeholders;
use crate::core::snippets::table::{SnippetTable, EXPANSION_ORDER, FRACTION_SNIPPETS};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - a snippet will not behave as written
    Warning,
    /// Error - the table contains an entry that cannot work
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Category the entry belongs to
    pub category: Option<String>,
    /// Offending trigger
    pub trigger: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            category: None,
            trigger: None,
            suggestion: None,
        }
    }

    /// Add the category name
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add the trigger
    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> category / 'trigger'
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        match (&self.category, &self.trigger) {
            (Some(category), Some(trigger)) => {
                write!(f, "\n  --> {} / '{}'", category, trigger)?
            }
            (Some(category), None) => write!(f, "\n  --> {}", category)?,
            _ => {}
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Lint a snippet table
pub fn check_snippet_table(table: &SnippetTable) -> CheckResult {
    let mut result = CheckResult::new();

    check_category_names(table, &mut result);
    check_condition_names(table, &mut result);
    check_triggers(table, &mut result);
    check_shadowing(table, &mut result);
    check_placeholder_numbering(table, &mut result);

    result
}

fn check_category_names(table: &SnippetTable, result: &mut CheckResult) {
    for (name, _) in table.categories() {
        if name != FRACTION_SNIPPETS && !EXPANSION_ORDER.iter().any(|n| *n == name) {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Info,
                    format!("category '{}' is never consulted", name),
                )
                .with_category(name)
                .with_suggestion(format!(
                    "Move its triggers into one of: {}",
                    EXPANSION_ORDER.join(", ")
                )),
            );
        }
    }
}

fn check_condition_names(table: &SnippetTable, result: &mut CheckResult) {
    for (name, category) in table.categories() {
        let Some(condition) = &category.condition else {
            continue;
        };
        if !condition.is_known() {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!(
                        "unknown condition '{}', triggers fire unconditionally",
                        condition
                    ),
                )
                .with_category(name)
                .with_suggestion("Use 'after_single_letter' or 'latex_symbol_before'"),
            );
        }
    }
}

fn check_triggers(table: &SnippetTable, result: &mut CheckResult) {
    for (name, category) in table.categories() {
        if category.snippets.contains_key("") {
            result.add(
                Diagnostic::new(DiagnosticLevel::Error, "empty trigger never fires")
                    .with_category(name)
                    .with_trigger("")
                    .with_suggestion("Remove the entry or give it a trigger"),
            );
        }
    }
}

/// Triggers that another trigger always beats.
///
/// `t` loses when an unconditional trigger `s` from a higher-priority
/// category is a suffix of `t` (both match, `s` is tried first), or when `s`
/// from any consulted category is a suffix of a proper prefix of `t` (typing
/// `t` one key at a time expands `s` before `t` is complete).
fn check_shadowing(table: &SnippetTable, result: &mut CheckResult) {
    // Earliest unconditional owner of each trigger
    let mut owners: FxHashMap<&str, (usize, &str)> = FxHashMap::default();
    for (rank, name) in EXPANSION_ORDER.iter().enumerate() {
        let Some(category) = table.category(name) else {
            continue;
        };
        if category.condition.as_ref().is_some_and(|c| c.is_known()) {
            continue;
        }
        for trigger in category.snippets.keys() {
            if !trigger.is_empty() {
                owners.entry(trigger.as_str()).or_insert((rank, *name));
            }
        }
    }

    for (rank, name) in EXPANSION_ORDER.iter().enumerate() {
        let Some(category) = table.category(name) else {
            continue;
        };
        for trigger in category.snippets.keys() {
            if let Some((winner, winner_category)) = find_shadow(&owners, trigger, rank) {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Warning,
                        format!(
                            "trigger can never fire: '{}' in {} expands first",
                            winner, winner_category
                        ),
                    )
                    .with_category(*name)
                    .with_trigger(trigger.as_str()),
                );
            }
        }
    }
}

fn find_shadow<'a>(
    owners: &FxHashMap<&'a str, (usize, &'a str)>,
    trigger: &str,
    rank: usize,
) -> Option<(&'a str, &'a str)> {
    let ends = trigger
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain(std::iter::once(trigger.len()));

    for end in ends {
        let typed = &trigger[..end];
        let complete = end == trigger.len();
        for (start, _) in typed.char_indices() {
            if let Some((&winner, &(owner_rank, owner))) = owners.get_key_value(&typed[start..]) {
                if !complete || owner_rank < rank {
                    return Some((winner, owner));
                }
            }
        }
    }
    None
}

fn check_placeholder_numbering(table: &SnippetTable, result: &mut CheckResult) {
    for (name, category) in table.categories() {
        for (trigger, template) in &category.snippets {
            let mut positions: FxHashMap<u32, Vec<u32>> = FxHashMap::default();
            for placeholder in scan_placeholders(template) {
                if placeholder.position != 0 {
                    positions
                        .entry(placeholder.level)
                        .or_default()
                        .push(placeholder.position);
                }
            }

            let mut missing: Vec<u32> = Vec::new();
            for (level, found) in &positions {
                let highest = found.iter().copied().max().unwrap_or(0);
                missing.extend(
                    (1..highest)
                        .filter(|p| !found.contains(p))
                        .map(|p| level * 10 + p),
                );
            }
            if missing.is_empty() {
                continue;
            }

            missing.sort_unstable();
            let list: Vec<String> = missing.iter().map(|n| format!("${}", n)).collect();
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Info,
                    format!("template skips {}", list.join(", ")),
                )
                .with_category(name)
                .with_trigger(trigger.as_str())
                .with_suggestion("Tab visits stops in numeric order; renumber to close the gap"),
            );
        }
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
