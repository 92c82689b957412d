//! Site configuration value object

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::page::DEFAULT_TITLE;

/// Default listen address for the upload service
pub const DEFAULT_BIND: &str = "127.0.0.1:4567";

const DEFAULT_CONTENT_DIR: &str = "content";
const DEFAULT_TEMPLATE_DIR: &str = "templates";
const DEFAULT_TEMPLATE: &str = "default.html";
const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_TMP_DIR: &str = "tmp";

/// Site configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub content_dir: Option<String>,
    pub template_dir: Option<String>,
    pub template: Option<String>,
    pub output_dir: Option<String>,
    pub tmp_dir: Option<String>,
    pub default_title: Option<String>,
    pub heading_ids: Option<bool>,
    pub bind: Option<String>,
}

impl SiteConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            content_dir: Some(DEFAULT_CONTENT_DIR.to_string()),
            template_dir: Some(DEFAULT_TEMPLATE_DIR.to_string()),
            template: Some(DEFAULT_TEMPLATE.to_string()),
            output_dir: Some(DEFAULT_OUTPUT_DIR.to_string()),
            tmp_dir: Some(DEFAULT_TMP_DIR.to_string()),
            default_title: Some(DEFAULT_TITLE.to_string()),
            heading_ids: Some(true),
            bind: Some(DEFAULT_BIND.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            content_dir: other.content_dir.or(self.content_dir),
            template_dir: other.template_dir.or(self.template_dir),
            template: other.template.or(self.template),
            output_dir: other.output_dir.or(self.output_dir),
            tmp_dir: other.tmp_dir.or(self.tmp_dir),
            default_title: other.default_title.or(self.default_title),
            heading_ids: other.heading_ids.or(self.heading_ids),
            bind: other.bind.or(self.bind),
        }
    }

    /// Resolve the directory layout, filling gaps with defaults
    pub fn layout(&self) -> SiteLayout {
        let template_dir = PathBuf::from(
            self.template_dir
                .as_deref()
                .unwrap_or(DEFAULT_TEMPLATE_DIR),
        );

        SiteLayout {
            content_dir: PathBuf::from(self.content_dir.as_deref().unwrap_or(DEFAULT_CONTENT_DIR)),
            template_path: template_dir.join(self.template.as_deref().unwrap_or(DEFAULT_TEMPLATE)),
            output_dir: PathBuf::from(self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)),
            tmp_dir: PathBuf::from(self.tmp_dir.as_deref().unwrap_or(DEFAULT_TMP_DIR)),
        }
    }

    /// Check every set value.
    ///
    /// Directories and the title must not be blank, the template must be a
    /// plain file name inside `template_dir`, and `bind` must be a socket
    /// address.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::ValidationError {
            key: key.to_string(),
            message,
        };

        let non_blank = [
            ("content_dir", &self.content_dir),
            ("template_dir", &self.template_dir),
            ("output_dir", &self.output_dir),
            ("tmp_dir", &self.tmp_dir),
            ("default_title", &self.default_title),
        ];
        for (key, value) in non_blank {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(invalid(key, "Value must not be empty".to_string()));
            }
        }

        if let Some(ref template) = self.template {
            if template.trim().is_empty() || template.contains(|c: char| c == '/' || c == '\\') {
                return Err(invalid(
                    "template",
                    "Value must be a file name inside template_dir".to_string(),
                ));
            }
        }

        if let Some(ref bind) = self.bind {
            bind.parse::<SocketAddr>()
                .map_err(|e| invalid("bind", format!("Invalid address '{}': {}", bind, e)))?;
        }

        Ok(())
    }

    /// Get the default page title, or "My Static Site" if not set
    pub fn default_title_or_default(&self) -> &str {
        self.default_title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Get heading id setting, or true if not set
    pub fn heading_ids_or_default(&self) -> bool {
        self.heading_ids.unwrap_or(true)
    }

    /// Get the service listen address, or the default if not set
    pub fn bind_or_default(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }
}

/// Resolved filesystem layout of a site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    /// Directory scanned for markdown sources
    pub content_dir: PathBuf,
    /// Full path of the page template
    pub template_path: PathBuf,
    /// Directory receiving generated pages
    pub output_dir: PathBuf,
    /// Staging area for uploads
    pub tmp_dir: PathBuf,
}

impl Default for SiteLayout {
    fn default() -> Self {
        SiteConfig::empty().layout()
    }
}
