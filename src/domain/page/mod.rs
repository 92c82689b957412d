//! Page domain module

mod file_name;
mod template;
mod title;

pub use file_name::{
    is_markdown, OutputName, PageName, SourceName, MARKDOWN_EXTENSIONS, PAGE_EXTENSION,
};
pub use template::{Template, CONTENT_PLACEHOLDER, TITLE_PLACEHOLDER};
pub use title::{Title, DEFAULT_TITLE};
