//! LaTeX → Unicode approximation
//!
//! Turns a finished LaTeX fragment into plain text that reads well without
//! a renderer: `\alpha^{2}` becomes `α²`, `\frac{1}{2}` becomes `½`.
//! The result is advisory, so [`SymbolConverter::convert_to_unicode`] never
//! fails: if anything goes wrong the input comes back untouched.
//!
//! Stages run in a fixed order, each on the previous stage's output:
//!
//! 1. symbol substitution, longest command first
//! 2. superscripts, `^{..}` then `^x`
//! 3. subscripts, `_{..}` then `_x`
//! 4. fractions, `\frac{a}{b}` (also `\dfrac` and `\tfrac`)

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::symbols::{
    subscript_of, superscript_of, vulgar_fraction, SORTED_UNICODE_SYMBOLS,
};
use crate::utils::error::{SnippetError, SnippetResult};

lazy_static! {
    static ref BRACED_SUPERSCRIPT_RE: Regex = Regex::new(r"\^\{([^}]+)\}").unwrap();
    static ref BARE_SUPERSCRIPT_RE: Regex = Regex::new(r"\^([a-zA-Z0-9+\-=()])").unwrap();
    static ref BRACED_SUBSCRIPT_RE: Regex = Regex::new(r"_\{([^}]+)\}").unwrap();
    static ref BARE_SUBSCRIPT_RE: Regex = Regex::new(r"_([a-zA-Z0-9+\-=()])").unwrap();
    static ref FRACTION_RE: Regex = Regex::new(r"\\[dt]?frac\{([^}]+)\}\{([^}]+)\}").unwrap();
}

/// Which folding stages run; symbol substitution always does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnicodeOptions {
    /// Fold `^{..}` and `^x` into superscript glyphs
    pub superscripts: bool,
    /// Fold `_{..}` and `_x` into subscript glyphs
    pub subscripts: bool,
    /// Fold `\frac{a}{b}` into `a/b` or a vulgar fraction
    pub fractions: bool,
}

impl Default for UnicodeOptions {
    fn default() -> Self {
        Self {
            superscripts: true,
            subscripts: true,
            fractions: true,
        }
    }
}

impl UnicodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace commands with glyphs and leave scripts and fractions alone
    pub fn symbols_only() -> Self {
        Self {
            superscripts: false,
            subscripts: false,
            fractions: false,
        }
    }
}

/// Stateless LaTeX → Unicode converter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolConverter {
    options: UnicodeOptions,
}

impl SymbolConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: UnicodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> UnicodeOptions {
        self.options
    }

    /// Best-effort conversion; returns `input` verbatim on any internal fault
    pub fn convert_to_unicode(&self, input: &str) -> String {
        self.try_convert(input).unwrap_or_else(|err| {
            warn!(error = %err, "unicode conversion failed, returning input");
            input.to_string()
        })
    }

    /// Like [`SymbolConverter::convert_to_unicode`], but reports the fault
    pub fn try_convert(&self, input: &str) -> SnippetResult<String> {
        if input.is_empty() {
            return Ok(String::new());
        }

        std::panic::catch_unwind(|| self.run_pipeline(input)).map_err(|e| {
            let message = if let Some(s) = e.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = e.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic during conversion".to_string()
            };
            SnippetError::internal(message)
        })
    }

    fn run_pipeline(&self, input: &str) -> String {
        let mut text = replace_symbols(input);
        if self.options.superscripts {
            text = fold_scripts(&text, &BRACED_SUPERSCRIPT_RE, &BARE_SUPERSCRIPT_RE, superscript_of);
        }
        if self.options.subscripts {
            text = fold_scripts(&text, &BRACED_SUBSCRIPT_RE, &BARE_SUBSCRIPT_RE, subscript_of);
        }
        if self.options.fractions {
            text = fold_fractions(&text);
        }
        text
    }
}

/// Replace every known command, longest first so `\leq` is not read as `\le`
fn replace_symbols(input: &str) -> String {
    let mut text = input.to_string();
    for (latex, glyph) in SORTED_UNICODE_SYMBOLS.iter() {
        if text.contains(latex) {
            text = text.replace(latex, glyph);
        }
    }
    text
}

/// Map each char through `glyph_of`; unmapped chars pass through
fn map_chars(content: &str, glyph_of: fn(char) -> Option<&'static str>) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match glyph_of(c) {
            Some(glyph) => out.push_str(glyph),
            None => out.push(c),
        }
    }
    out
}

fn fold_scripts(
    text: &str,
    braced: &Regex,
    bare: &Regex,
    glyph_of: fn(char) -> Option<&'static str>,
) -> String {
    let text = braced.replace_all(text, |caps: &Captures| map_chars(&caps[1], glyph_of));
    bare.replace_all(&text, |caps: &Captures| map_chars(&caps[1], glyph_of))
        .into_owned()
}

fn fold_fractions(text: &str) -> String {
    FRACTION_RE
        .replace_all(text, |caps: &Captures| {
            let (numerator, denominator) = (&caps[1], &caps[2]);
            let mut num = numerator.chars();
            let mut den = denominator.chars();
            if let (Some(n), None, Some(d), None) = (num.next(), num.next(), den.next(), den.next())
            {
                if let Some(glyph) = vulgar_fraction(n, d) {
                    return glyph.to_string();
                }
            }
            format!("{}/{}", numerator, denominator)
        })
        .into_owned()
}
