use crate::models::section::SectionMap;

/// Instructions appended to every assembled document for the prompt generator.
pub const TRAILER: &str = "Please analyze the above document and generate staged prompts for building this project.
Each stage should follow this format:

Prompt [1]: [Feature/Objective Title]
Objective: [Clear description of the prompt's goal]
Prompt: [Detailed prompt for development]
Outcome: [Expected results upon completion]

Generate 3-5 prompts that cover the key aspects of the project.";

/// Heading used when no known section was found.
pub const FALLBACK_TITLE: &str = "Document Content";

const BLOCK_SEPARATOR: &str = "\n\n";

/// Render sections (or the raw text when there are none) followed by the
/// trailer. Sections always appear in the fixed key order.
#[must_use]
pub fn assemble(sections: &SectionMap, raw_normalized_text: &str) -> String {
    let mut blocks: Vec<String> = sections
        .iter()
        .map(|(key, text)| block(key.title(), text))
        .collect();

    if blocks.is_empty() {
        blocks.push(block(FALLBACK_TITLE, raw_normalized_text));
    }
    blocks.push(TRAILER.to_string());

    blocks.join(BLOCK_SEPARATOR)
}

fn block(title: &str, text: &str) -> String {
    format!("# {title}\n{text}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::section::SectionKey;

    #[test]
    fn empty_map_falls_back_to_raw_text() {
        let out = assemble(&SectionMap::default(), "hello world");
        assert!(out.starts_with("# Document Content\nhello world"));
        assert_eq!(out, format!("# Document Content\nhello world\n\n{TRAILER}"));
    }

    #[test]
    fn sections_follow_fixed_order() {
        let mut reversed = SectionMap::default();
        reversed.insert(SectionKey::Technical, "Architecture\nRust.");
        reversed.insert(SectionKey::UserStories, "User Stories\nAs a user.");
        reversed.insert(SectionKey::Requirements, "Requirements\nFast.");
        reversed.insert(SectionKey::Overview, "Introduction\nHi.");

        let mut forward = SectionMap::default();
        forward.insert(SectionKey::Overview, "Introduction\nHi.");
        forward.insert(SectionKey::Requirements, "Requirements\nFast.");
        forward.insert(SectionKey::UserStories, "User Stories\nAs a user.");
        forward.insert(SectionKey::Technical, "Architecture\nRust.");

        let out = assemble(&reversed, "ignored");
        assert_eq!(out, assemble(&forward, "ignored"));

        let positions: Vec<usize> = [
            "# Project Overview",
            "# Requirements",
            "# User Stories",
            "# Technical Specifications",
        ]
        .iter()
        .map(|h| out.find(h).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!out.contains("ignored"));
    }

    #[test]
    fn present_sections_only() {
        let mut sections = SectionMap::default();
        sections.insert(SectionKey::Requirements, "Requirements\n- sync");
        let out = assemble(&sections, "raw");
        assert!(out.starts_with("# Requirements\nRequirements\n- sync\n\n"));
        assert!(!out.contains("# Document Content"));
        assert!(!out.contains("# Project Overview"));
    }

    #[test]
    fn trailer_always_last() {
        let mut sections = SectionMap::default();
        sections.insert(SectionKey::Technical, "Architecture");
        for out in [
            assemble(&sections, "x"),
            assemble(&SectionMap::default(), "x"),
            assemble(&SectionMap::default(), ""),
        ] {
            assert!(out.trim().ends_with(TRAILER));
        }
    }

    #[test]
    fn trailer_text_is_verbatim() {
        assert!(TRAILER.starts_with("Please analyze the above document"));
        assert!(TRAILER.contains("\n\nPrompt [1]: [Feature/Objective Title]\n"));
        assert!(TRAILER.ends_with("cover the key aspects of the project."));
    }
}
