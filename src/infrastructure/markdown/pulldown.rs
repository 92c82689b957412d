//! Markdown renderer adapter using pulldown-cmark

use std::collections::HashSet;

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::application::ports::MarkdownRenderer;

/// CommonMark renderer with GFM tables, strikethrough, task lists, and footnotes
#[derive(Debug, Clone, Copy)]
pub struct PulldownRenderer {
    heading_ids: bool,
}

impl PulldownRenderer {
    /// Create a renderer that gives headings `id` anchors
    pub fn new() -> Self {
        Self { heading_ids: true }
    }

    /// Toggle heading `id` anchors
    pub fn with_heading_ids(mut self, enabled: bool) -> Self {
        self.heading_ids = enabled;
        self
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
    }
}

impl Default for PulldownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn to_html(&self, markdown: &str) -> String {
        let mut events: Vec<Event<'_>> = Parser::new_ext(markdown, Self::options()).collect();

        if self.heading_ids {
            assign_heading_ids(&mut events);
        }

        let mut html = String::with_capacity(markdown.len() * 2);
        push_html(&mut html, events.into_iter());
        html
    }
}

/// Lowercase, collapse non-alphanumeric runs into single hyphens, and
/// trim hyphens from both ends.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut prev_hyphen = true;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Give every heading without an explicit id one derived from its text.
/// Repeated slugs get `-1`, `-2`, ... suffixes, skipping any suffixed form
/// that another heading already produced.
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut used: HashSet<String> = HashSet::new();
    let mut i = 0;

    while i < events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            i += 1;
            continue;
        }

        let mut text = String::new();
        let mut end = i + 1;
        while end < events.len() {
            match &events[end] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            end += 1;
        }

        let base = slugify(&text);
        if !base.is_empty() {
            let slug = unique_slug(&base, &mut used);
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                *id = Some(CowStr::from(slug));
            }
        }

        i = end + 1;
    }
}

fn unique_slug(base: &str, used: &mut HashSet<String>) -> String {
    let mut slug = base.to_string();
    let mut n = 0;
    while used.contains(&slug) {
        n += 1;
        slug = format!("{base}-{n}");
    }
    used.insert(slug.clone());
    slug
}
