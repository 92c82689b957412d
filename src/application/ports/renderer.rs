//! Markdown renderer port interface

/// Port for markdown to HTML conversion.
///
/// Conversion never fails: markup the engine does not understand is
/// emitted as literal text.
pub trait MarkdownRenderer: Send + Sync {
    /// Convert a markdown document to an HTML fragment
    fn to_html(&self, markdown: &str) -> String;
}

impl<R: MarkdownRenderer + ?Sized> MarkdownRenderer for Box<R> {
    fn to_html(&self, markdown: &str) -> String {
        self.as_ref().to_html(markdown)
    }
}
