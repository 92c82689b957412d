//! Upload publishing use case

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::error::InvalidFileNameError;
use crate::domain::page::{OutputName, PageName, SourceName};

use super::generate::{GenerateError, GenerateSiteUseCase};
use super::ports::{MarkdownRenderer, SiteStore, StorageError};

/// Route prefix under which generated pages are downloadable
pub const DOWNLOAD_ROUTE: &str = "/downloads";

/// Errors from the publish use case
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error(transparent)]
    InvalidFileName(#[from] InvalidFileNameError),

    #[error("{name} is not UTF-8 text: {reason}")]
    NotUtf8 { name: String, reason: String },

    #[error("Failed to save upload: {0}")]
    Save(StorageError),

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Output from the publish use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutput {
    /// Where the upload was saved
    pub source_path: PathBuf,
    /// Where the page was written
    pub output_path: PathBuf,
    /// Name of the generated page
    pub page: PageName,
    /// Relative URL the page can be downloaded from
    pub download_url: String,
}

/// Saves an uploaded markdown file into the content directory and renders it
pub struct PublishUploadUseCase<S, R>
where
    S: SiteStore,
    R: MarkdownRenderer,
{
    generator: Arc<GenerateSiteUseCase<S, R>>,
}

impl<S, R> PublishUploadUseCase<S, R>
where
    S: SiteStore,
    R: MarkdownRenderer,
{
    /// Create a new use case sharing an existing generator
    pub fn new(generator: Arc<GenerateSiteUseCase<S, R>>) -> Self {
        Self { generator }
    }

    /// Publish one uploaded file
    pub async fn execute(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<PublishOutput, PublishError> {
        let name = SourceName::parse(file_name)?;

        // Unreadable sources must never reach the content directory
        std::str::from_utf8(bytes).map_err(|e| PublishError::NotUtf8 {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let source_path = self
            .generator
            .store()
            .save_source(&name, bytes)
            .await
            .map_err(PublishError::Save)?;

        let output_path = self.generator.render(&source_path).await?;
        let page = PageName::from(OutputName::for_source(&source_path)?);
        let download_url = format!("{}/{}", DOWNLOAD_ROUTE, page);

        info!(source = %source_path.display(), page = %page, "published upload");

        Ok(PublishOutput {
            source_path,
            output_path,
            page,
            download_url,
        })
    }
}
