//! Site generation use case

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::error::InvalidFileNameError;
use crate::domain::page::{OutputName, Template, Title, DEFAULT_TITLE};

use super::ports::{MarkdownRenderer, SiteStore, StorageError};

/// Errors from the generate use case
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("Content directory '{}' not found", .0.display())]
    MissingContentDirectory(PathBuf),

    #[error("Content directory could not be listed: {0}")]
    ContentUnreadable(StorageError),

    #[error("No markdown files found in {}/", .0.display())]
    NoSourceFilesFound(PathBuf),

    #[error("Template {} not found", .0.display())]
    MissingTemplate(PathBuf),

    #[error("Template could not be read: {0}")]
    TemplateUnreadable(StorageError),

    #[error("{0}")]
    SourceRead(StorageError),

    #[error("{0}")]
    OutputWrite(StorageError),

    #[error(transparent)]
    InvalidFileName(#[from] InvalidFileNameError),

    #[error("{} also maps to {output}, already generated from {}", .path.display(), .first.display())]
    DuplicateOutput {
        path: PathBuf,
        output: String,
        first: PathBuf,
    },
}

impl GenerateError {
    /// Whether the error aborts a whole batch rather than a single page
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingContentDirectory(_)
                | Self::ContentUnreadable(_)
                | Self::NoSourceFilesFound(_)
                | Self::MissingTemplate(_)
                | Self::TemplateUnreadable(_)
        )
    }
}

/// Outcome of rendering one source during a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// The source document
    pub source: PathBuf,
    /// Written output path, or the per-page failure
    pub outcome: Result<PathBuf, GenerateError>,
}

/// Result of a batch run, in source discovery order
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub pages: Vec<PageResult>,
}

impl GenerateReport {
    /// Output paths that were written
    pub fn generated(&self) -> impl Iterator<Item = &Path> {
        self.pages
            .iter()
            .filter_map(|page| page.outcome.as_ref().ok().map(PathBuf::as_path))
    }

    /// Sources that failed, with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &GenerateError)> {
        self.pages
            .iter()
            .filter_map(|page| page.outcome.as_ref().err().map(|e| (page.source.as_path(), e)))
    }

    /// Number of pages written
    pub fn generated_count(&self) -> usize {
        self.generated().count()
    }

    /// True when every discovered source produced a page
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// The generated entry page, if the batch produced one
    pub fn index_page(&self) -> Option<&Path> {
        self.generated()
            .find(|path| path.file_name().is_some_and(|name| name == "index.html"))
    }
}

/// Callbacks for batch progress
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct GenerateCallbacks {
    /// Called once with every discovered source, before rendering starts
    pub on_discovered: Option<Box<dyn Fn(&[PathBuf]) + Send + Sync>>,
    /// Called after each source, successful or not
    pub on_page: Option<Box<dyn Fn(&PageResult) + Send + Sync>>,
}

/// Markdown to HTML site generation use case
pub struct GenerateSiteUseCase<S, R>
where
    S: SiteStore,
    R: MarkdownRenderer,
{
    store: S,
    renderer: R,
    default_title: String,
}

impl<S, R> GenerateSiteUseCase<S, R>
where
    S: SiteStore,
    R: MarkdownRenderer,
{
    /// Create a new use case instance
    pub fn new(store: S, renderer: R) -> Self {
        Self {
            store,
            renderer,
            default_title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Use a different title for documents without a level-1 heading
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Render one source document into the output directory.
    ///
    /// The template is read on every call, so edits to it show up
    /// without restarting anything.
    pub async fn render(&self, source: &Path) -> Result<PathBuf, GenerateError> {
        let markdown = self
            .store
            .read_source(source)
            .await
            .map_err(GenerateError::SourceRead)?;

        let title = Title::extract(&markdown, &self.default_title);
        let body = self.renderer.to_html(&markdown);
        let template = self.load_template().await?;
        let page = template.render(&title, &body);

        let name = OutputName::for_source(source)?;
        let written = self
            .store
            .write_page(&name, &page)
            .await
            .map_err(GenerateError::OutputWrite)?;

        debug!(source = %source.display(), output = %written.display(), title = %title, "rendered page");
        Ok(written)
    }

    /// Render every markdown source in the content directory.
    ///
    /// Fatal conditions (missing content directory, no sources, missing
    /// template) abort before anything is written. Per-page read and write
    /// failures are recorded in the report and the batch moves on.
    pub async fn render_all(
        &self,
        callbacks: GenerateCallbacks,
    ) -> Result<GenerateReport, GenerateError> {
        let sources = self.store.list_sources().await.map_err(|e| match e {
            StorageError::NotFound(path) => GenerateError::MissingContentDirectory(path),
            other => GenerateError::ContentUnreadable(other),
        })?;

        if sources.is_empty() {
            return Err(GenerateError::NoSourceFilesFound(
                self.store.content_dir().to_path_buf(),
            ));
        }

        info!(count = sources.len(), dir = %self.store.content_dir().display(), "discovered sources");
        if let Some(ref cb) = callbacks.on_discovered {
            cb(&sources);
        }

        self.load_template().await?;

        let mut report = GenerateReport {
            pages: Vec::with_capacity(sources.len()),
        };

        // output name -> first source that claimed it
        let mut claimed: HashMap<String, PathBuf> = HashMap::new();

        for source in sources {
            let outcome = match claim_output(&mut claimed, &source) {
                Err(e) => Err(e),
                Ok(()) => self.render(&source).await,
            };
            let outcome = match outcome {
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(source = %source.display(), error = %e, "skipping page");
                    Err(e)
                }
                Ok(path) => Ok(path),
            };

            let result = PageResult { source, outcome };
            if let Some(ref cb) = callbacks.on_page {
                cb(&result);
            }
            report.pages.push(result);
        }

        info!(
            generated = report.generated_count(),
            failed = report.pages.len() - report.generated_count(),
            "site generation finished"
        );
        Ok(report)
    }

    async fn load_template(&self) -> Result<Template, GenerateError> {
        self.store
            .read_template()
            .await
            .map(Template::new)
            .map_err(|e| match e {
                StorageError::NotFound(path) => GenerateError::MissingTemplate(path),
                other => GenerateError::TemplateUnreadable(other),
            })
    }
}

/// Reserve the output name of `source` for this batch. A later source
/// mapping to the same page is refused instead of overwriting it.
fn claim_output(
    claimed: &mut HashMap<String, PathBuf>,
    source: &Path,
) -> Result<(), GenerateError> {
    let output = OutputName::for_source(source)?;
    if let Some(first) = claimed.get(output.as_str()) {
        return Err(GenerateError::DuplicateOutput {
            path: source.to_path_buf(),
            output: output.to_string(),
            first: first.clone(),
        });
    }
    claimed.insert(output.to_string(), source.to_path_buf());
    Ok(())
}
