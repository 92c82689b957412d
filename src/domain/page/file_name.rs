//! File name value objects for sources, generated pages, and uploads

use std::fmt;
use std::path::Path;

use crate::domain::error::InvalidFileNameError;

/// Extensions recognised as markdown sources
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Extension of generated pages
pub const PAGE_EXTENSION: &str = "html";

/// Basename that keeps its special meaning as the site entry page
const INDEX_STEM: &str = "index";

/// Check whether a path carries a markdown extension
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext))
}

/// Strip a markdown extension from a file name, if there is one and
/// something is left afterwards.
fn strip_markdown_extension(name: &str) -> &str {
    for ext in MARKDOWN_EXTENSIONS {
        if let Some(stem) = name.strip_suffix(ext).and_then(|s| s.strip_suffix('.')) {
            if !stem.is_empty() {
                return stem;
            }
        }
    }
    name
}

/// Name of the generated HTML file for a source document.
///
/// A pure function of the source file name: `index.md` becomes
/// `index.html`, `about.md` becomes `about.html`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputName {
    name: String,
}

impl OutputName {
    /// Derive the output name from a source path
    pub fn for_source(source: &Path) -> Result<Self, InvalidFileNameError> {
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| InvalidFileNameError {
                input: source.display().to_string(),
                reason: "source path has no usable file name",
            })?;

        let stem = strip_markdown_extension(file_name);
        let name = if stem == INDEX_STEM {
            format!("{INDEX_STEM}.{PAGE_EXTENSION}")
        } else {
            format!("{stem}.{PAGE_EXTENSION}")
        };

        Ok(Self { name })
    }

    /// Get the file name
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Validated name for an uploaded markdown source.
///
/// Only the final path component of the client-supplied name is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceName {
    name: String,
}

impl SourceName {
    /// Parse a client-supplied file name
    pub fn parse(raw: &str) -> Result<Self, InvalidFileNameError> {
        let base = raw
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or_default()
            .trim();

        if base.is_empty() || base == "." || base == ".." {
            return Err(InvalidFileNameError {
                input: raw.to_string(),
                reason: "file name is empty",
            });
        }

        if !is_markdown(Path::new(base)) || strip_markdown_extension(base) == base {
            return Err(InvalidFileNameError {
                input: raw.to_string(),
                reason: "only .md and .markdown files are accepted",
            });
        }

        Ok(Self {
            name: base.to_string(),
        })
    }

    /// Get the file name
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Name of a generated page requested for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageName {
    name: String,
}

impl PageName {
    /// Parse a requested page name; anything that could escape the
    /// output directory is rejected.
    pub fn parse(raw: &str) -> Result<Self, InvalidFileNameError> {
        let escapes = raw.contains(|c: char| matches!(c, '/' | '\\' | '\0')) || raw.contains("..");
        if raw.is_empty() || raw == "." || escapes {
            return Err(InvalidFileNameError {
                input: raw.to_string(),
                reason: "page names must be plain file names",
            });
        }

        Ok(Self {
            name: raw.to_string(),
        })
    }

    /// Get the file name
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl From<OutputName> for PageName {
    fn from(output: OutputName) -> Self {
        Self { name: output.name }
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
