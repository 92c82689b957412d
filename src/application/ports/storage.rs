//! Site storage port interface

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::page::{OutputName, PageName, SourceName};

/// Storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("{0} not found")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Port for the files a site is built from and into
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Create the content, output, and staging directories if absent.
    async fn ensure_layout(&self) -> Result<(), StorageError>;

    /// Directory scanned for sources
    fn content_dir(&self) -> &Path;

    /// Directory receiving generated pages
    fn output_dir(&self) -> &Path;

    /// Path of the page template
    fn template_path(&self) -> &Path;

    /// List markdown sources directly inside the content directory,
    /// sorted by file name.
    ///
    /// # Returns
    /// `StorageError::NotFound` when the content directory is absent
    async fn list_sources(&self) -> Result<Vec<PathBuf>, StorageError>;

    /// Read a source document as UTF-8 text.
    async fn read_source(&self, path: &Path) -> Result<String, StorageError>;

    /// Read the page template.
    ///
    /// # Returns
    /// `StorageError::NotFound` when the template file is absent
    async fn read_template(&self) -> Result<String, StorageError>;

    /// Write a generated page, replacing any previous version.
    ///
    /// # Returns
    /// The path written
    async fn write_page(&self, name: &OutputName, html: &str) -> Result<PathBuf, StorageError>;

    /// Store an uploaded source in the content directory.
    ///
    /// # Returns
    /// The path of the saved source
    async fn save_source(&self, name: &SourceName, bytes: &[u8]) -> Result<PathBuf, StorageError>;

    /// List generated page names, sorted.
    async fn list_pages(&self) -> Result<Vec<String>, StorageError>;

    /// Read a generated page, or `None` when it does not exist.
    async fn read_page(&self, name: &PageName) -> Result<Option<Vec<u8>>, StorageError>;
}
