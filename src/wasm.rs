//! WASM bindings for texpand
//!
//! This module exposes the snippet engine and the Unicode converter to
//! JavaScript. Offsets on the JS side are UTF-16 code units, as reported by
//! `textarea.selectionStart`; they are converted to byte offsets on the way in
//! and back on the way out.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::utils::offsets::{byte_to_utf16, utf16_to_byte};

/// Engine call result with offsets in UTF-16 code units
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResult {
    pub text: String,
    pub cursor_position: usize,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_range: Option<[usize; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_placeholders: Option<bool>,
}

#[cfg(feature = "wasm")]
impl From<crate::SnippetEdit> for EditResult {
    fn from(edit: crate::SnippetEdit) -> Self {
        let cursor_position = byte_to_utf16(&edit.text, edit.cursor_position);
        let select_range = edit
            .select_range
            .map(|(start, end)| [byte_to_utf16(&edit.text, start), byte_to_utf16(&edit.text, end)]);
        Self {
            text: edit.text,
            cursor_position,
            changed: edit.changed,
            select_range,
            has_placeholders: edit.has_placeholders,
        }
    }
}

/// Summary of snippet table check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Snippet engine handle for one editable buffer
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "SnippetEngine")]
pub struct WasmSnippetEngine {
    inner: crate::SnippetEngine,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen(js_class = "SnippetEngine")]
impl WasmSnippetEngine {
    /// Create an engine from a snippet table object.
    ///
    /// `null` or `undefined` gives an engine that expands nothing until
    /// `updateSnippets` is called.
    #[wasm_bindgen(constructor)]
    pub fn new(snippets: JsValue) -> Result<WasmSnippetEngine, JsValue> {
        let inner = if snippets.is_null() || snippets.is_undefined() {
            crate::SnippetEngine::new()
        } else {
            crate::SnippetEngine::with_table(table_from_js(snippets)?)
        };
        Ok(Self { inner })
    }

    /// Create an engine with the bundled default table
    #[wasm_bindgen(js_name = "withDefaultSnippets")]
    pub fn with_default_snippets() -> WasmSnippetEngine {
        Self {
            inner: crate::SnippetEngine::with_table(crate::default_snippet_table()),
        }
    }

    #[wasm_bindgen(js_name = "processText")]
    pub fn process_text(&mut self, text: &str, cursor_position: usize) -> JsValue {
        let cursor = utf16_to_byte(text, cursor_position);
        to_js(&EditResult::from(self.inner.process_text(text, cursor)))
    }

    #[wasm_bindgen(js_name = "handleTab")]
    pub fn handle_tab(&mut self, text: &str, cursor_position: usize) -> JsValue {
        let cursor = utf16_to_byte(text, cursor_position);
        to_js(&EditResult::from(self.inner.handle_tab(text, cursor)))
    }

    /// Returns whether the key cancelled a session
    #[wasm_bindgen(js_name = "handleKey")]
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.inner.handle_key(key)
    }

    #[wasm_bindgen(js_name = "hasActiveSnippet")]
    pub fn has_active_snippet(&self) -> bool {
        self.inner.has_active_snippet()
    }

    #[wasm_bindgen(js_name = "clearActiveSnippet")]
    pub fn clear_active_snippet(&mut self) {
        self.inner.clear_active_snippet();
    }

    #[wasm_bindgen(js_name = "setEnabled")]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.inner.set_enabled(enabled);
    }

    #[wasm_bindgen(js_name = "isEnabled")]
    pub fn is_enabled(&self) -> bool {
        self.inner.is_enabled()
    }

    #[wasm_bindgen(js_name = "getAllSnippets")]
    pub fn get_all_snippets(&self) -> JsValue {
        match self.inner.snippets() {
            Some(table) => to_js(table),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = "updateSnippets")]
    pub fn update_snippets(&mut self, snippets: JsValue) -> Result<(), JsValue> {
        self.inner.update_snippets(table_from_js(snippets)?);
        Ok(())
    }
}

/// Convert LaTeX to a Unicode approximation
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "convertToUnicode")]
pub fn convert_to_unicode_wasm(input: &str) -> String {
    crate::convert_to_unicode(input)
}

/// Convert LaTeX to Unicode with options
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "convertToUnicodeWithOptions")]
pub fn convert_to_unicode_with_options_wasm(input: &str, options: JsValue) -> String {
    let options: crate::UnicodeOptions =
        serde_wasm_bindgen::from_value(options).unwrap_or_default();
    crate::convert_to_unicode_with_options(input, options)
}

/// Check a snippet table (JSON text) for problems
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkSnippets")]
pub fn check_snippets_wasm(json: &str) -> JsValue {
    use crate::diagnostics::DiagnosticLevel;

    let result = match crate::check_snippets_json(json) {
        Ok(result) => result,
        Err(err) => {
            return to_js(&CheckSummary {
                errors: vec![err.to_string()],
                warnings: vec![],
                infos: vec![],
                has_errors: true,
            })
        }
    };

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        let line = match &d.trigger {
            Some(trigger) => format!("{} ('{}')", d.message, trigger),
            None => d.message.clone(),
        };
        match d.level {
            DiagnosticLevel::Error => errors.push(line),
            DiagnosticLevel::Warning => warnings.push(line),
            DiagnosticLevel::Info => infos.push(line),
        }
    }

    to_js(&CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    })
}

/// Get the bundled default snippet table
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getDefaultSnippets")]
pub fn get_default_snippets() -> JsValue {
    to_js(&crate::default_snippet_table())
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(feature = "wasm")]
fn table_from_js(value: JsValue) -> Result<crate::SnippetTable, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid snippet table: {}", e)))
}

/// Serialize with maps as plain objects, so `table.basic_snippets.snippets[";sq"]` works
#[cfg(feature = "wasm")]
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}
