//! Page template value object

use super::title::Title;

/// Marker replaced with the page title
pub const TITLE_PLACEHOLDER: &str = "{{title}}";

/// Marker replaced with the rendered markdown body
pub const CONTENT_PLACEHOLDER: &str = "{{content}}";

/// HTML skeleton with `{{title}}` and `{{content}}` markers.
///
/// Substitution is literal: no escaping, no expressions. Text inserted for
/// one marker is never scanned again, so a title containing `{{content}}`
/// stays as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    /// Wrap template text
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Get the raw template text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Fill every marker occurrence and return the final page
    pub fn render(&self, title: &Title, content: &str) -> String {
        let mut page = String::with_capacity(self.source.len() + content.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find('{') {
            let (before, tail) = rest.split_at(start);
            page.push_str(before);

            if let Some(after) = tail.strip_prefix(TITLE_PLACEHOLDER) {
                page.push_str(title.as_str());
                rest = after;
            } else if let Some(after) = tail.strip_prefix(CONTENT_PLACEHOLDER) {
                page.push_str(content);
                rest = after;
            } else {
                page.push('{');
                rest = &tail[1..];
            }
        }

        page.push_str(rest);
        page
    }
}
