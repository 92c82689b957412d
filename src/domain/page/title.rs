//! Page title value object

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Title used when a document has no level-1 heading
pub const DEFAULT_TITLE: &str = "My Static Site";

/// Matches a level-1 heading line: a single `#`, horizontal whitespace, then text.
fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^#[ \t]+(\S.*)$").expect("heading pattern is valid")
    })
}

/// Value object representing the title of a rendered page.
/// Derived from the source document, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    text: String,
}

impl Title {
    /// Extract the title from markdown text.
    ///
    /// The first line shaped like `# Some heading` wins and its text is
    /// trimmed. Documents without such a line get `fallback`.
    pub fn extract(markdown: &str, fallback: &str) -> Self {
        let text = heading_pattern()
            .captures(markdown)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| fallback.to_string());

        Self { text }
    }

    /// Get the title text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_level_one_heading() {
        let title = Title::extract("# Hello World\n\nBody\n\n# Second", DEFAULT_TITLE);
        assert_eq!(title.as_str(), "Hello World");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let title = Title::extract("#   Padded Title   \r\nbody", DEFAULT_TITLE);
        assert_eq!(title.as_str(), "Padded Title");
    }

    #[test]
    fn heading_need_not_be_first_line() {
        let title = Title::extract("intro text\n\n# Later Heading\n", DEFAULT_TITLE);
        assert_eq!(title.as_str(), "Later Heading");
    }

    #[test]
    fn ignores_deeper_headings() {
        let title = Title::extract("## Section\n### Sub", DEFAULT_TITLE);
        assert_eq!(title.as_str(), DEFAULT_TITLE);
    }

    #[test]
    fn requires_whitespace_after_marker() {
        let title = Title::extract("#hashtag\n", DEFAULT_TITLE);
        assert_eq!(title.as_str(), DEFAULT_TITLE);
    }

    #[test]
    fn marker_without_text_does_not_match() {
        let title = Title::extract("#   \nplain", DEFAULT_TITLE);
        assert_eq!(title.as_str(), DEFAULT_TITLE);
    }

    #[test]
    fn falls_back_to_given_default() {
        let title = Title::extract("no headings here", "Fallback");
        assert_eq!(title.as_str(), "Fallback");
    }

    #[test]
    fn display_writes_text() {
        let title = Title::extract("# Shown", DEFAULT_TITLE);
        assert_eq!(title.to_string(), "Shown");
    }
}
