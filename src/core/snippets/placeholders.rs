//! Tab-stop placeholders
//!
//! Placeholders live in the text itself as `$N` tokens. Nothing here keeps
//! offsets between calls: every query rescans the text it is given, so edits
//! made by the host between engine calls can never leave stale positions
//! behind.
//!
//! Numbers encode nesting in base 10: `level = N / 10`, `position = N % 10`.
//! Level 0 holds `$0`..`$9` of the outermost template, and each nested
//! fraction takes the next free decade (`$11`, `$12`, `$10`, ...).

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\$([0-9]+)").unwrap();
}

/// A `$N` token found in the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub number: u32,
    pub level: u32,
    pub position: u32,
    /// Byte offset of the `$`
    pub start: usize,
    /// Byte offset just past the last digit
    pub end: usize,
    /// The literal token, e.g. `$12`
    pub text: String,
}

impl Placeholder {
    fn new(number: u32, start: usize, end: usize, text: &str) -> Self {
        Self {
            number,
            level: number / 10,
            position: number % 10,
            start,
            end,
            text: text.to_string(),
        }
    }

    /// `$0`: where the cursor rests once every other stop is done
    pub fn is_final(&self) -> bool {
        self.number == 0
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Sort key inside the navigation order: position 0 goes last in its level
    fn navigation_key(&self) -> (u32, u32, usize) {
        let slot = if self.position == 0 { 10 } else { self.position };
        (self.level, slot, self.start)
    }
}

/// Every placeholder token in `text`, in text order.
///
/// Tokens whose digits overflow `u32` are ordinary text.
pub fn scan_placeholders(text: &str) -> Vec<Placeholder> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let token = caps.get(0)?;
            let number = caps[1].parse::<u32>().ok()?;
            Some(Placeholder::new(
                number,
                token.start(),
                token.end(),
                token.as_str(),
            ))
        })
        .collect()
}

/// The order Tab visits stops in.
///
/// `$0` is excluded. Levels ascend; inside a level positions ascend with
/// position 0 last, so a nested fraction reads `$11, $12, $10`.
pub fn navigation_order(placeholders: &[Placeholder]) -> Vec<Placeholder> {
    let mut order: Vec<Placeholder> = placeholders
        .iter()
        .filter(|p| !p.is_final())
        .cloned()
        .collect();
    order.sort_by_key(Placeholder::navigation_key);
    order
}

/// The first `$0` token, if any
pub fn final_placeholder(placeholders: &[Placeholder]) -> Option<&Placeholder> {
    placeholders.iter().find(|p| p.is_final())
}

/// Deepest level currently present
pub fn max_level(placeholders: &[Placeholder]) -> Option<u32> {
    placeholders.iter().map(|p| p.level).max()
}

/// Fraction template whose stops live at `level`.
///
/// `None` when the level's numbers do not fit in `u32`.
pub fn nested_fraction_template(level: u32) -> Option<String> {
    let base = level.checked_mul(10)?;
    let denominator = base.checked_add(2)?;
    Some(format!("\\frac{{${}}}{{${}}} ${}", base + 1, denominator, base))
}
