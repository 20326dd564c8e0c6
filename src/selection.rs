// src/selection.rs
//
// Syntactic gate for selected text. Does not know about the glossary.

pub const MAX_TERM_CHARS: usize = 120;

/// Whitespace as the browser's `\s` and `String.prototype.trim` see it:
/// U+FEFF counts, U+0085 does not.
pub fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

pub fn trim(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// Multi-word selections such as "Financial Transactions" are allowed.
pub fn is_eligible(text: &str) -> bool {
    let text = trim(text);
    if text.is_empty() || text.chars().count() > MAX_TERM_CHARS {
        return false;
    }
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(is_term_char),
        _ => false,
    }
}

fn is_term_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || is_space(c)
        || matches!(c, '\'' | '’' | '-' | '(' | ')' | '/' | '.')
}
