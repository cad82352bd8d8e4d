//! Content normalization ahead of section detection.
//!
//! Rules, in order:
//! 1. CR-LF (and any lone CR) becomes LF
//! 2. Trailing spaces/tabs are stripped from every line
//! 3. Runs of 3+ newlines collapse to exactly 2
//! 4. Runs of spaces/tabs collapse to a single space
//! 5. Leading and trailing whitespace of the whole text is trimmed
//!
//! The result is a fixed point: `normalize(normalize(x)) == normalize(x)`.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());
static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_HORIZONTAL_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Normalize extracted document text.
#[must_use]
pub fn normalize(text: &str) -> String {
    let s = normalise_line_endings(text);
    let s = RE_TRAILING_WS.replace_all(&s, "\n");
    let s = RE_BLANK_LINES.replace_all(&s, "\n\n");
    let s = RE_HORIZONTAL_WS.replace_all(&s, " ");
    s.trim().to_string()
}

fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}
