use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::section::{SectionKey, SectionMap};

/// A line opening a new Markdown heading (`#`, `##`, ...).
static RE_HEADING_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#").unwrap());

static RE_ALIASES: Lazy<Vec<(SectionKey, Regex)>> = Lazy::new(|| {
    SectionKey::ALL
        .into_iter()
        .map(|key| {
            let alternation = key
                .aliases()
                .iter()
                .map(|alias| regex::escape(alias))
                .collect::<Vec<_>>()
                .join("|");
            (key, Regex::new(&format!("(?i){alternation}")).unwrap())
        })
        .collect()
});

/// Slice `text` into the known sections.
///
/// Each key is scanned independently: its value starts at the first
/// case-insensitive occurrence of one of its aliases and runs up to the next
/// line starting with `#`, or to the end of the text. Captures of different
/// keys may overlap. Keys without a matching alias are left absent.
#[must_use]
pub fn extract_sections(text: &str) -> SectionMap {
    let mut sections = SectionMap::default();
    for (key, re) in RE_ALIASES.iter() {
        if let Some(captured) = capture_section(text, re) {
            sections.insert(*key, captured);
        }
    }
    tracing::debug!(found = sections.len(), "extracted sections");
    sections
}

fn capture_section<'a>(text: &'a str, alias: &Regex) -> Option<&'a str> {
    let found = alias.find(text)?;
    let end = RE_HEADING_LINE
        .find_at(text, found.end())
        .map_or(text.len(), |heading| heading.start());
    Some(text[found.start()..end].trim())
}
