//! Engine scenarios: keystroke sequences as a host would send them

use super::*;
use crate::core::snippets::table::{
    BASIC_SNIPPETS, FRACTION_SNIPPETS, GREEK_LETTERS, SUBSCRIPT_SNIPPETS,
};
use pretty_assertions::assert_eq;

fn engine() -> SnippetEngine {
    let mut table = SnippetTable::new();
    table.insert_snippet(BASIC_SNIPPETS, ";sq", "\\sqrt{$1} $0");
    table.insert_snippet(BASIC_SNIPPETS, ";bf", "\\mathbf{}");
    table.insert_snippet(BASIC_SNIPPETS, ";ab", "\\abs{$1}");
    table.insert_snippet(GREEK_LETTERS, "@a", "\\alpha");

    let mut subscripts = SnippetCategory::with_condition(Condition::AfterSingleLetter);
    subscripts.insert("1", "_1");
    table.insert_category(SUBSCRIPT_SNIPPETS, subscripts);

    table.insert_snippet(FRACTION_SNIPPETS, "//", "\\frac{$1}{$2} $0");
    SnippetEngine::with_table(table)
}

/// Replace `range` with `typed`, as an editor does when typing over a selection
fn overwrite(text: &str, range: (usize, usize), typed: &str) -> (String, usize) {
    let new_text = format!("{}{}{}", &text[..range.0], typed, &text[range.1..]);
    (new_text, range.0 + typed.len())
}

fn selected<'a>(edit: &'a SnippetEdit) -> &'a str {
    let (start, end) = edit.select_range.expect("a selection");
    &edit.text[start..end]
}

#[test]
fn test_fraction_tab_sequence() {
    let mut engine = engine();
    let edit = engine.process_text("//", 2);

    assert_eq!(edit.text, r"\frac{$1}{$2} $0");
    assert!(edit.changed);
    assert_eq!(edit.has_placeholders, Some(true));
    assert_eq!(edit.cursor_position, 6);
    assert!(engine.has_active_snippet());

    let tab = engine.handle_tab(&edit.text, edit.cursor_position);
    assert_eq!(selected(&tab), "$1");
    assert!(!tab.changed);

    let tab = engine.handle_tab(&tab.text, tab.cursor_position);
    assert_eq!(selected(&tab), "$2");

    let tab = engine.handle_tab(&tab.text, tab.cursor_position);
    assert_eq!(selected(&tab), "$0");
    assert_eq!(tab.select_range, Some((14, 16)));
    assert!(engine.has_active_snippet());

    let tab = engine.handle_tab(&tab.text, tab.cursor_position);
    assert_eq!(tab.select_range, None);
    assert!(!engine.has_active_snippet());
}

#[test]
fn test_overwritten_stop_restarts_navigation() {
    let mut engine = engine();
    let edit = engine.process_text("//", 2);

    let tab = engine.handle_tab(&edit.text, edit.cursor_position);
    let (text, cursor) = overwrite(&tab.text, tab.select_range.unwrap(), "a");
    assert_eq!(text, r"\frac{a}{$2} $0");

    // Ordinary typing does not expand anything
    let edit = engine.process_text(&text, cursor);
    assert!(!edit.changed);

    let tab = engine.handle_tab(&text, cursor);
    assert_eq!(selected(&tab), "$2");

    let (text, cursor) = overwrite(&tab.text, tab.select_range.unwrap(), "b");
    let tab = engine.handle_tab(&text, cursor);
    assert_eq!(selected(&tab), "$0");

    let (text, cursor) = overwrite(&tab.text, tab.select_range.unwrap(), "");
    assert_eq!(text, r"\frac{a}{b} ");

    // Nothing left to visit
    let tab = engine.handle_tab(&text, cursor);
    assert!(!tab.changed);
    assert!(!engine.has_active_snippet());
}

#[test]
fn test_nested_fraction_levels_never_collide() {
    let mut engine = engine();
    let edit = engine.process_text("//", 2);

    // Type `//` over `$1`, one keystroke at a time
    let tab = engine.handle_tab(&edit.text, edit.cursor_position);
    let (text, cursor) = overwrite(&tab.text, tab.select_range.unwrap(), "/");
    let edit = engine.process_text(&text, cursor);
    assert!(!edit.changed);
    let (text, cursor) = overwrite(&text, (cursor, cursor), "/");
    let edit = engine.process_text(&text, cursor);

    assert_eq!(edit.text, r"\frac{\frac{$11}{$12} $10}{$2} $0");
    assert_eq!(&edit.text[edit.cursor_position..edit.cursor_position + 3], "$11");
    assert!(engine.has_active_snippet());

    // And again inside `$12`
    let start = edit.text.find("$12").unwrap();
    let (text, cursor) = overwrite(&edit.text, (start, start + 3), "//");
    let edit = engine.process_text(&text, cursor);
    assert_eq!(
        edit.text,
        r"\frac{\frac{$11}{\frac{$21}{$22} $20} $10}{$2} $0"
    );

    let numbers: Vec<u32> = scan_placeholders(&edit.text)
        .iter()
        .map(|p| p.number)
        .collect();
    let mut unique = numbers.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), numbers.len());

    let order: Vec<u32> = navigation_order(&scan_placeholders(&edit.text))
        .iter()
        .map(|p| p.number)
        .collect();
    assert_eq!(order, vec![2, 11, 10, 21, 22, 20]);
}

#[test]
fn test_tab_follows_navigation_order_after_nesting() {
    let mut engine = engine();
    let edit = engine.process_text("//", 2);
    let tab = engine.handle_tab(&edit.text, edit.cursor_position);
    let (text, cursor) = overwrite(&tab.text, tab.select_range.unwrap(), "//");
    let edit = engine.process_text(&text, cursor);

    let mut visited = Vec::new();
    let mut cursor = edit.cursor_position;
    while let Some(range) = engine.handle_tab(&edit.text, cursor).select_range {
        visited.push(edit.text[range.0..range.1].to_string());
        cursor = range.0;
    }

    assert_eq!(visited, vec!["$2", "$11", "$12", "$10", "$0"]);
    assert!(!engine.has_active_snippet());
}

#[test]
fn test_expansion_without_placeholders() {
    let mut engine = engine();

    let edit = engine.process_text("x = @a", 6);
    assert_eq!(edit.text, r"x = \alpha");
    assert_eq!(edit.cursor_position, edit.text.len());
    assert_eq!(edit.has_placeholders, Some(false));
    assert!(!engine.has_active_snippet());

    // Legacy `{}` marker: cursor lands inside the braces
    let edit = engine.process_text(";bf tail", 3);
    assert_eq!(edit.text, r"\mathbf{} tail");
    assert_eq!(edit.cursor_position, 8);
}

#[test]
fn test_template_without_final_stop() {
    let mut engine = engine();
    let edit = engine.process_text(";ab", 3);
    assert_eq!(edit.text, r"\abs{$1}");

    let tab = engine.handle_tab(&edit.text, edit.cursor_position);
    assert_eq!(selected(&tab), "$1");

    // No `$0`: the next Tab ends the session
    let tab = engine.handle_tab(&tab.text, tab.cursor_position);
    assert_eq!(tab.select_range, None);
    assert!(!engine.has_active_snippet());
}

#[test]
fn test_expansion_inside_session_keeps_cursor_local() {
    let mut engine = engine();
    let edit = engine.process_text("//", 2);
    let tab = engine.handle_tab(&edit.text, edit.cursor_position);
    let (text, cursor) = overwrite(&tab.text, tab.select_range.unwrap(), "@a");

    let edit = engine.process_text(&text, cursor);
    assert_eq!(edit.text, r"\frac{\alpha}{$2} $0");
    // Cursor stays after the inserted symbol rather than jumping to `$2`
    assert_eq!(edit.cursor_position, 12);
    assert_eq!(edit.has_placeholders, Some(true));
    assert!(engine.has_active_snippet());
}

#[test]
fn test_single_slash_waits_inside_session() {
    let mut engine = engine();
    let edit = engine.process_text("//", 2);
    let tab = engine.handle_tab(&edit.text, edit.cursor_position);
    let (text, cursor) = overwrite(&tab.text, tab.select_range.unwrap(), "ab/");
    assert!(!engine.process_text(&text, cursor).changed);

    // Outside a session the implicit fraction applies
    engine.clear_active_snippet();
    let edit = engine.process_text("ab/", 3);
    assert_eq!(edit.text, r"\frac{ab}{$1} $0");
    assert_eq!(edit.cursor_position, 10);
}

#[test]
fn test_tab_without_session_is_noop() {
    let mut engine = engine();
    let tab = engine.handle_tab(r"\frac{$1}{$2} $0", 0);
    assert!(!tab.changed);
    assert_eq!(tab.select_range, None);
    assert_eq!(tab.cursor_position, 0);
}

#[test]
fn test_escape_and_enter_cancel() {
    let mut engine = engine();
    engine.process_text("//", 2);
    assert!(!engine.handle_key("a"));
    assert!(engine.handle_key("Escape"));
    assert!(!engine.has_active_snippet());
    assert!(!engine.handle_key("Escape"));

    engine.process_text("//", 2);
    assert!(engine.handle_key("Enter"));
    assert!(!engine.has_active_snippet());
}

#[test]
fn test_disabled_engine_is_noop() {
    let mut engine = engine();
    engine.process_text("//", 2);
    engine.set_enabled(false);
    assert!(!engine.is_enabled());
    assert!(!engine.has_active_snippet());

    let edit = engine.process_text("//", 2);
    assert!(!edit.changed);
    assert_eq!(edit.text, "//");
    assert!(!engine.expand_snippets("//", "").changed);
    assert_eq!(engine.handle_tab(r"\frac{$1}{$2} $0", 0).select_range, None);

    engine.set_enabled(true);
    assert!(engine.process_text("//", 2).changed);
}

#[test]
fn test_engine_without_table() {
    let mut engine = SnippetEngine::new();
    assert!(engine.snippets().is_none());
    assert!(!engine.process_text("//", 2).changed);

    let mut table = SnippetTable::new();
    table.insert_snippet(FRACTION_SNIPPETS, "//", "\\frac{$1}{$2} $0");
    engine.update_snippets(table);
    assert!(engine.process_text("//", 2).changed);
}

#[test]
fn test_update_snippets_drops_session() {
    let mut engine = engine();
    engine.process_text("//", 2);
    assert!(engine.has_active_snippet());
    engine.update_snippets(SnippetTable::new());
    assert!(!engine.has_active_snippet());
    assert!(engine.snippets().unwrap().is_empty());
}

#[test]
fn test_cursor_is_clamped() {
    let mut engine = engine();
    // Past the end
    let edit = engine.process_text("x1", 99);
    assert_eq!(edit.text, "x_1");

    // Inside a multi-byte char: moved back to the boundary before 'α'
    let edit = engine.process_text("α", 1);
    assert!(!edit.changed);
    assert_eq!(edit.cursor_position, 0);
}

#[test]
fn test_session_anchor() {
    let mut engine = engine();
    let edit = engine.process_text("y = ;sq", 7);
    assert_eq!(edit.text, r"y = \sqrt{$1} $0");
    let session = engine.active_snippet().unwrap();
    assert_eq!(session.start, 4);
    assert_eq!(session.text, edit.text);
}

#[test]
fn test_edit_serializes_camel_case() {
    let mut engine = engine();
    let edit = engine.process_text("//", 2);
    let json = serde_json::to_value(&edit).unwrap();
    assert_eq!(json["cursorPosition"], 6);
    assert_eq!(json["hasPlaceholders"], true);
    assert!(json.get("selectRange").is_none());
}

#[test]
fn test_nesting_past_the_last_level_is_left_as_typed() {
    let mut engine = engine();
    let edit = engine.process_text("//", 2);
    assert!(engine.has_active_snippet());

    // `$4294967290` sits on the deepest numberable level
    let text = format!("{} $4294967290 //", edit.text);
    let edit = engine.process_text(&text, text.len());
    assert!(!edit.changed);
    assert_eq!(edit.text, text);
    assert!(engine.has_active_snippet());

    // Stops below it still navigate
    let tab = engine.handle_tab(&text, 0);
    assert_eq!(tab.select_range, Some((6, 8)));
}
