//! LaTeX → Unicode glyph tables
//!
//! Static data for the Unicode converter: command and script shorthands
//! mapped to literal glyphs, the superscript and subscript character maps,
//! and the vulgar fraction glyphs.
//!
//! Symbol coverage follows unicodeit by Sven Kreiss (MIT).

use lazy_static::lazy_static;
use phf::phf_map;

/// LaTeX trigger → literal Unicode replacement.
///
/// Applied longest trigger first; see [`SORTED_UNICODE_SYMBOLS`].
pub static UNICODE_SYMBOLS: phf::Map<&'static str, &'static str> = phf_map! {
    // Greek letters (lowercase)
    "\\alpha" => "α",
    "\\beta" => "β",
    "\\gamma" => "γ",
    "\\delta" => "δ",
    "\\epsilon" => "ε",
    "\\varepsilon" => "ε",
    "\\zeta" => "ζ",
    "\\eta" => "η",
    "\\theta" => "θ",
    "\\vartheta" => "ϑ",
    "\\iota" => "ι",
    "\\kappa" => "κ",
    "\\lambda" => "λ",
    "\\mu" => "μ",
    "\\nu" => "ν",
    "\\xi" => "ξ",
    "\\omicron" => "ο",
    "\\pi" => "π",
    "\\varpi" => "ϖ",
    "\\rho" => "ρ",
    "\\varrho" => "ϱ",
    "\\sigma" => "σ",
    "\\varsigma" => "ς",
    "\\tau" => "τ",
    "\\upsilon" => "υ",
    "\\phi" => "φ",
    "\\varphi" => "φ",
    "\\chi" => "χ",
    "\\psi" => "ψ",
    "\\omega" => "ω",

    // Greek letters (uppercase)
    "\\Alpha" => "Α",
    "\\Beta" => "Β",
    "\\Gamma" => "Γ",
    "\\Delta" => "Δ",
    "\\Epsilon" => "Ε",
    "\\Zeta" => "Ζ",
    "\\Eta" => "Η",
    "\\Theta" => "Θ",
    "\\Iota" => "Ι",
    "\\Kappa" => "Κ",
    "\\Lambda" => "Λ",
    "\\Mu" => "Μ",
    "\\Nu" => "Ν",
    "\\Xi" => "Ξ",
    "\\Omicron" => "Ο",
    "\\Pi" => "Π",
    "\\Rho" => "Ρ",
    "\\Sigma" => "Σ",
    "\\Tau" => "Τ",
    "\\Upsilon" => "Υ",
    "\\Phi" => "Φ",
    "\\Chi" => "Χ",
    "\\Psi" => "Ψ",
    "\\Omega" => "Ω",

    // Mathematical operators
    "\\sum" => "∑",
    "\\prod" => "∏",
    "\\int" => "∫",
    "\\oint" => "∮",
    "\\iint" => "∬",
    "\\iiint" => "∭",
    "\\partial" => "∂",
    "\\nabla" => "∇",
    "\\infty" => "∞",
    "\\pm" => "±",
    "\\mp" => "∓",
    "\\times" => "×",
    "\\div" => "÷",
    "\\cdot" => "·",
    "\\bullet" => "•",
    "\\ast" => "*",
    "\\star" => "⋆",
    "\\circ" => "∘",
    "\\oplus" => "⊕",
    "\\ominus" => "⊖",
    "\\otimes" => "⊗",
    "\\oslash" => "⊘",
    "\\odot" => "⊙",

    // Relations
    "\\le" => "≤",
    "\\leq" => "≤",
    "\\ge" => "≥",
    "\\geq" => "≥",
    "\\ne" => "≠",
    "\\neq" => "≠",
    "\\equiv" => "≡",
    "\\approx" => "≈",
    "\\sim" => "∼",
    "\\simeq" => "≃",
    "\\cong" => "≅",
    "\\propto" => "∝",
    "\\perp" => "⊥",
    "\\parallel" => "∥",
    "\\in" => "∈",
    "\\notin" => "∉",
    "\\ni" => "∋",
    "\\subset" => "⊂",
    "\\supset" => "⊃",
    "\\subseteq" => "⊆",
    "\\supseteq" => "⊇",
    "\\cup" => "∪",
    "\\cap" => "∩",
    "\\setminus" => "∖",
    "\\emptyset" => "∅",
    "\\varnothing" => "∅",

    // Arrows
    "\\to" => "→",
    "\\rightarrow" => "→",
    "\\leftarrow" => "←",
    "\\leftrightarrow" => "↔",
    "\\Rightarrow" => "⇒",
    "\\Leftarrow" => "⇐",
    "\\Leftrightarrow" => "⇔",
    "\\uparrow" => "↑",
    "\\downarrow" => "↓",
    "\\updownarrow" => "↕",
    "\\nearrow" => "↗",
    "\\searrow" => "↘",
    "\\swarrow" => "↙",
    "\\nwarrow" => "↖",
    "\\mapsto" => "↦",
    "\\longmapsto" => "⟼",
    "\\longrightarrow" => "⟶",
    "\\longleftarrow" => "⟵",
    "\\longleftrightarrow" => "⟷",

    // Logic
    "\\land" => "∧",
    "\\lor" => "∨",
    "\\lnot" => "¬",
    "\\neg" => "¬",
    "\\forall" => "∀",
    "\\exists" => "∃",
    "\\nexists" => "∄",
    "\\top" => "⊤",
    "\\bot" => "⊥",
    "\\vdash" => "⊢",
    "\\dashv" => "⊣",
    "\\vDash" => "⊨",
    "\\models" => "⊨",

    // Miscellaneous
    "\\sqrt" => "√",
    "\\angle" => "∠",
    "\\triangle" => "△",
    "\\square" => "□",
    "\\lozenge" => "◊",
    "\\clubsuit" => "♣",
    "\\diamondsuit" => "♦",
    "\\heartsuit" => "♥",
    "\\spadesuit" => "♠",
    "\\flat" => "♭",
    "\\natural" => "♮",
    "\\sharp" => "♯",
    "\\checkmark" => "✓",
    "\\dag" => "†",
    "\\ddag" => "‡",
    "\\S" => "§",
    "\\P" => "¶",
    "\\copyright" => "©",
    "\\pounds" => "£",
    "\\euro" => "€",
    "\\yen" => "¥",
    "\\cent" => "¢",
    "\\degree" => "°",
    "\\prime" => "′",
    "\\dprime" => "″",
    "\\tprime" => "‴",
    "\\backprime" => "‵",
    "\\dots" => "…",
    "\\ldots" => "…",
    "\\cdots" => "⋯",
    "\\vdots" => "⋮",
    "\\ddots" => "⋱",
    "\\hbar" => "ℏ",
    "\\ell" => "ℓ",
    "\\wp" => "℘",
    "\\Re" => "ℜ",
    "\\Im" => "ℑ",
    "\\aleph" => "ℵ",
    "\\beth" => "ℶ",
    "\\gimel" => "ℷ",
    "\\daleth" => "ℸ",

    // Brackets and delimiters
    "\\langle" => "⟨",
    "\\rangle" => "⟩",
    "\\lceil" => "⌈",
    "\\rceil" => "⌉",
    "\\lfloor" => "⌊",
    "\\rfloor" => "⌋",
    "\\lbrace" => "{",
    "\\rbrace" => "}",
    "\\lbrack" => "[",
    "\\rbrack" => "]",
    "\\lparen" => "(",
    "\\rparen" => ")",
    "\\|" => "‖",
    "\\vert" => "|",
    "\\Vert" => "‖",

    // Accents and diacritics
    "\\hat" => "^",
    "\\check" => "ˇ",
    "\\breve" => "˘",
    "\\acute" => "´",
    "\\grave" => "`",
    "\\tilde" => "~",
    "\\bar" => "¯",
    "\\vec" => "→",
    "\\dot" => "˙",
    "\\ddot" => "¨",
    "\\dddot" => "⃛",
    "\\ddddot" => "⃜",

    // Superscript digits
    "^0" => "⁰",
    "^1" => "¹",
    "^2" => "²",
    "^3" => "³",
    "^4" => "⁴",
    "^5" => "⁵",
    "^6" => "⁶",
    "^7" => "⁷",
    "^8" => "⁸",
    "^9" => "⁹",
    "^+" => "⁺",
    "^-" => "⁻",
    "^=" => "⁼",
    "^(" => "⁽",
    "^)" => "⁾",
    "^n" => "ⁿ",
    "^i" => "ⁱ",

    // Subscript digits
    "_0" => "₀",
    "_1" => "₁",
    "_2" => "₂",
    "_3" => "₃",
    "_4" => "₄",
    "_5" => "₅",
    "_6" => "₆",
    "_7" => "₇",
    "_8" => "₈",
    "_9" => "₉",
    "_+" => "₊",
    "_-" => "₋",
    "_=" => "₌",
    "_(" => "₍",
    "_)" => "₎",
    "_a" => "ₐ",
    "_e" => "ₑ",
    "_h" => "ₕ",
    "_i" => "ᵢ",
    "_j" => "ⱼ",
    "_k" => "ₖ",
    "_l" => "ₗ",
    "_m" => "ₘ",
    "_n" => "ₙ",
    "_o" => "ₒ",
    "_p" => "ₚ",
    "_r" => "ᵣ",
    "_s" => "ₛ",
    "_t" => "ₜ",
    "_u" => "ᵤ",
    "_v" => "ᵥ",
    "_x" => "ₓ",

    // Sizing delimiters degrade to the bare delimiter
    "\\left" => "",
    "\\right" => "",
};

lazy_static! {
    /// Symbol table entries sorted longest trigger first.
    ///
    /// Ties are broken by trigger text so substitution order never depends
    /// on the hash layout of the map.
    pub static ref SORTED_UNICODE_SYMBOLS: Vec<(&'static str, &'static str)> = {
        let mut entries: Vec<_> = UNICODE_SYMBOLS.entries().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        entries
    };
}

/// Superscript glyphs by source character
pub static SUPERSCRIPTS: phf::Map<char, &'static str> = phf_map! {
    '0' => "⁰", '1' => "¹", '2' => "²", '3' => "³", '4' => "⁴",
    '5' => "⁵", '6' => "⁶", '7' => "⁷", '8' => "⁸", '9' => "⁹",
    '+' => "⁺", '-' => "⁻", '=' => "⁼", '(' => "⁽", ')' => "⁾",
    'a' => "ᵃ", 'b' => "ᵇ", 'c' => "ᶜ", 'd' => "ᵈ", 'e' => "ᵉ",
    'f' => "ᶠ", 'g' => "ᵍ", 'h' => "ʰ", 'i' => "ⁱ", 'j' => "ʲ",
    'k' => "ᵏ", 'l' => "ˡ", 'm' => "ᵐ", 'n' => "ⁿ", 'o' => "ᵒ",
    'p' => "ᵖ", 'r' => "ʳ", 's' => "ˢ", 't' => "ᵗ", 'u' => "ᵘ",
    'v' => "ᵛ", 'w' => "ʷ", 'x' => "ˣ", 'y' => "ʸ", 'z' => "ᶻ",
    'A' => "ᴬ", 'B' => "ᴮ", 'D' => "ᴰ", 'E' => "ᴱ", 'G' => "ᴳ",
    'H' => "ᴴ", 'I' => "ᴵ", 'J' => "ᴶ", 'K' => "ᴷ", 'L' => "ᴸ",
    'M' => "ᴹ", 'N' => "ᴺ", 'O' => "ᴼ", 'P' => "ᴾ", 'R' => "ᴿ",
    'T' => "ᵀ", 'U' => "ᵁ", 'V' => "ⱽ", 'W' => "ᵂ",
};

/// Subscript glyphs by source character
pub static SUBSCRIPTS: phf::Map<char, &'static str> = phf_map! {
    '0' => "₀", '1' => "₁", '2' => "₂", '3' => "₃", '4' => "₄",
    '5' => "₅", '6' => "₆", '7' => "₇", '8' => "₈", '9' => "₉",
    '+' => "₊", '-' => "₋", '=' => "₌", '(' => "₍", ')' => "₎",
    'a' => "ₐ", 'e' => "ₑ", 'h' => "ₕ", 'i' => "ᵢ", 'j' => "ⱼ",
    'k' => "ₖ", 'l' => "ₗ", 'm' => "ₘ", 'n' => "ₙ", 'o' => "ₒ",
    'p' => "ₚ", 'r' => "ᵣ", 's' => "ₛ", 't' => "ₜ", 'u' => "ᵤ",
    'v' => "ᵥ", 'x' => "ₓ",
};

/// Vulgar fraction glyphs keyed by `numerator/denominator`
pub static VULGAR_FRACTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "1/2" => "½", "1/3" => "⅓", "2/3" => "⅔", "1/4" => "¼", "3/4" => "¾",
    "1/5" => "⅕", "2/5" => "⅖", "3/5" => "⅗", "4/5" => "⅘", "1/6" => "⅙",
    "5/6" => "⅚", "1/7" => "⅐", "1/8" => "⅛", "3/8" => "⅜", "5/8" => "⅝",
    "7/8" => "⅞", "1/9" => "⅑",
};

/// Look up a literal replacement for a LaTeX trigger
pub fn lookup_unicode_symbol(trigger: &str) -> Option<&'static str> {
    UNICODE_SYMBOLS.get(trigger).copied()
}

/// Superscript form of a single character, if one exists
pub fn superscript_of(c: char) -> Option<&'static str> {
    SUPERSCRIPTS.get(&c).copied()
}

/// Subscript form of a single character, if one exists
pub fn subscript_of(c: char) -> Option<&'static str> {
    SUBSCRIPTS.get(&c).copied()
}

/// Vulgar fraction glyph for a single-character numerator and denominator
pub fn vulgar_fraction(numerator: char, denominator: char) -> Option<&'static str> {
    VULGAR_FRACTIONS
        .get(format!("{}/{}", numerator, denominator).as_str())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(lookup_unicode_symbol("\\alpha"), Some("α"));
        assert_eq!(lookup_unicode_symbol("\\leq"), Some("≤"));
        assert_eq!(lookup_unicode_symbol("^2"), Some("²"));
        assert_eq!(lookup_unicode_symbol("\\left"), Some(""));
        assert_eq!(lookup_unicode_symbol("\\nonexistent"), None);
    }

    #[test]
    fn test_sorted_symbols_longest_first() {
        let lengths: Vec<usize> = SORTED_UNICODE_SYMBOLS.iter().map(|(k, _)| k.len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));

        let pos = |t: &str| SORTED_UNICODE_SYMBOLS.iter().position(|(k, _)| *k == t);
        assert!(pos("\\leq") < pos("\\le"));
        assert!(pos("\\infty") < pos("\\in"));
        assert!(pos("\\rightarrow") < pos("\\right"));
    }

    #[test]
    fn test_script_maps() {
        assert_eq!(superscript_of('n'), Some("ⁿ"));
        assert_eq!(superscript_of('q'), None);
        assert_eq!(subscript_of('x'), Some("ₓ"));
        assert_eq!(subscript_of('b'), None);
    }

    #[test]
    fn test_vulgar_fractions() {
        assert_eq!(vulgar_fraction('1', '2'), Some("½"));
        assert_eq!(vulgar_fraction('7', '8'), Some("⅞"));
        assert_eq!(vulgar_fraction('2', '7'), None);
    }

    #[test]
    fn test_symbol_count() {
        assert!(
            UNICODE_SYMBOLS.len() > 250,
            "Expected 250+ symbols, got {}",
            UNICODE_SYMBOLS.len()
        );
    }
}
