//! Text cleanup for extracted PDF pages.
//!
//! The PDF text layer hands back fragments separated by arbitrary line
//! breaks and padding. A page is normalised to its non-empty fragments,
//! each with inner whitespace collapsed, joined by a single space.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Split a page's raw text into cleaned, non-empty fragments.
pub fn page_fragments(raw: &str) -> Vec<String> {
    remove_invisible_chars(raw)
        .lines()
        .map(clean_fragment)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Fragments of one page joined with a single space.
pub fn join_fragments(raw: &str) -> String {
    page_fragments(raw).join(" ")
}

fn clean_fragment(fragment: &str) -> String {
    RE_WHITESPACE.replace_all(fragment.trim(), " ").into_owned()
}

fn remove_invisible_chars(input: &str) -> String {
    input.replace(
        [
            '\u{200B}', '\u{FEFF}', '\u{00AD}', '\u{200C}', '\u{200D}', '\u{2060}',
        ],
        "",
    )
}

/// Decode a plain-text resume, tolerating invalid UTF-8 and a leading BOM.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{FEFF}').unwrap_or(&*text).to_string()
}
