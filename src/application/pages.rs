//! Generated page catalog use case

use crate::domain::page::PageName;

use super::ports::{SiteStore, StorageError};

/// A generated page loaded for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDownload {
    pub name: PageName,
    pub bytes: Vec<u8>,
}

/// Lists generated pages and opens them for download
pub struct PageCatalog<S: SiteStore> {
    store: S,
}

impl<S: SiteStore> PageCatalog<S> {
    /// Create a new catalog over a store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Names of generated pages, sorted
    pub async fn list(&self) -> Result<Vec<String>, StorageError> {
        self.store.list_pages().await
    }

    /// Open a page by name.
    ///
    /// Names that could point outside the output directory are treated
    /// the same as missing pages.
    pub async fn open(&self, raw_name: &str) -> Result<Option<PageDownload>, StorageError> {
        let Ok(name) = PageName::parse(raw_name) else {
            return Ok(None);
        };

        Ok(self
            .store
            .read_page(&name)
            .await?
            .map(|bytes| PageDownload { name, bytes }))
    }
}
