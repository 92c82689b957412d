//! Local filesystem site store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::{SiteStore, StorageError};
use crate::domain::config::SiteLayout;
use crate::domain::page::{is_markdown, OutputName, PageName, SourceName, PAGE_EXTENSION};

/// Sequence for staged upload names within this process
static UPLOAD_SEQ: AtomicU64 = AtomicU64::new(0);

fn read_error(path: &Path, e: std::io::Error) -> StorageError {
    if e.kind() == ErrorKind::NotFound {
        StorageError::NotFound(path.to_path_buf())
    } else {
        StorageError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    }
}

fn write_error(path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Site store backed by the local filesystem
#[derive(Debug, Clone)]
pub struct LocalSiteStore {
    layout: SiteLayout,
}

impl LocalSiteStore {
    /// Create a store over a resolved layout
    pub fn new(layout: SiteLayout) -> Self {
        Self { layout }
    }

    /// Get the layout
    pub fn layout(&self) -> &SiteLayout {
        &self.layout
    }

    async fn create_dir(path: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| write_error(path, e))
    }

    async fn is_file(path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_file())
    }
}

impl Default for LocalSiteStore {
    fn default() -> Self {
        Self::new(SiteLayout::default())
    }
}

#[async_trait]
impl SiteStore for LocalSiteStore {
    async fn ensure_layout(&self) -> Result<(), StorageError> {
        for dir in [
            &self.layout.content_dir,
            &self.layout.output_dir,
            &self.layout.tmp_dir,
        ] {
            Self::create_dir(dir).await?;
        }
        Ok(())
    }

    fn content_dir(&self) -> &Path {
        &self.layout.content_dir
    }

    fn output_dir(&self) -> &Path {
        &self.layout.output_dir
    }

    fn template_path(&self) -> &Path {
        &self.layout.template_path
    }

    async fn list_sources(&self) -> Result<Vec<PathBuf>, StorageError> {
        let dir = &self.layout.content_dir;

        match fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(StorageError::NotFound(dir.clone())),
            Err(e) => return Err(read_error(dir, e)),
        }

        let mut entries = fs::read_dir(dir).await.map_err(|e| read_error(dir, e))?;
        let mut sources = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(|e| read_error(dir, e))? {
            let path = entry.path();
            if is_markdown(&path) && Self::is_file(&path).await {
                sources.push(path);
            }
        }

        sources.sort();
        Ok(sources)
    }

    async fn read_source(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path)
            .await
            .map_err(|e| read_error(path, e))
    }

    async fn read_template(&self) -> Result<String, StorageError> {
        let path = &self.layout.template_path;
        fs::read_to_string(path)
            .await
            .map_err(|e| read_error(path, e))
    }

    async fn write_page(&self, name: &OutputName, html: &str) -> Result<PathBuf, StorageError> {
        Self::create_dir(&self.layout.output_dir).await?;

        let path = self.layout.output_dir.join(name.as_str());
        fs::write(&path, html)
            .await
            .map_err(|e| write_error(&path, e))?;

        debug!(path = %path.display(), bytes = html.len(), "wrote page");
        Ok(path)
    }

    async fn save_source(&self, name: &SourceName, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        Self::create_dir(&self.layout.tmp_dir).await?;
        Self::create_dir(&self.layout.content_dir).await?;

        let seq = UPLOAD_SEQ.fetch_add(1, Ordering::Relaxed);
        let staged = self
            .layout
            .tmp_dir
            .join(format!("upload-{}-{}-{}", std::process::id(), seq, name));
        let target = self.layout.content_dir.join(name.as_str());

        fs::write(&staged, bytes)
            .await
            .map_err(|e| write_error(&staged, e))?;

        if fs::rename(&staged, &target).await.is_err() {
            // tmp and content may live on different filesystems
            let copied = fs::copy(&staged, &target).await;
            let _ = fs::remove_file(&staged).await;
            copied.map_err(|e| write_error(&target, e))?;
        }

        debug!(path = %target.display(), bytes = bytes.len(), "saved upload");
        Ok(target)
    }

    async fn list_pages(&self) -> Result<Vec<String>, StorageError> {
        let dir = &self.layout.output_dir;

        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(read_error(dir, e)),
        };

        let mut pages = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| read_error(dir, e))? {
            let path = entry.path();
            let is_page = path
                .extension()
                .is_some_and(|ext| ext == PAGE_EXTENSION);
            if !is_page || !Self::is_file(&path).await {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                pages.push(name.to_string());
            }
        }

        pages.sort();
        Ok(pages)
    }

    async fn read_page(&self, name: &PageName) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.layout.output_dir.join(name.as_str());
        if !Self::is_file(&path).await {
            return Ok(None);
        }

        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(read_error(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::SiteConfig;
    use tempfile::TempDir;

    fn store_in(root: &Path) -> LocalSiteStore {
        let config = SiteConfig {
            content_dir: Some(root.join("content").to_string_lossy().to_string()),
            template_dir: Some(root.join("templates").to_string_lossy().to_string()),
            output_dir: Some(root.join("output").to_string_lossy().to_string()),
            tmp_dir: Some(root.join("tmp").to_string_lossy().to_string()),
            ..Default::default()
        };
        LocalSiteStore::new(config.layout())
    }

    #[tokio::test]
    async fn ensure_layout_is_idempotent() {
        let root = TempDir::new().unwrap();
        let store = store_in(root.path());

        store.ensure_layout().await.unwrap();
        store.ensure_layout().await.unwrap();

        assert!(root.path().join("content").is_dir());
        assert!(root.path().join("output").is_dir());
        assert!(root.path().join("tmp").is_dir());
    }

    #[tokio::test]
    async fn list_sources_missing_dir_is_not_found() {
        let root = TempDir::new().unwrap();
        let store = store_in(root.path());

        let err = store.list_sources().await.unwrap_err();
        assert_eq!(err, StorageError::NotFound(root.path().join("content")));
    }

    #[tokio::test]
    async fn list_sources_is_sorted_and_shallow() {
        let root = TempDir::new().unwrap();
        let content = root.path().join("content");
        std::fs::create_dir_all(content.join("nested")).unwrap();
        std::fs::write(content.join("zeta.md"), "z").unwrap();
        std::fs::write(content.join("alpha.md"), "a").unwrap();
        std::fs::write(content.join("notes.txt"), "n").unwrap();
        std::fs::write(content.join("nested/deep.md"), "d").unwrap();
        std::fs::create_dir(content.join("folder.md")).unwrap();

        let sources = store_in(root.path()).list_sources().await.unwrap();

        assert_eq!(sources, vec![content.join("alpha.md"), content.join("zeta.md")]);
    }

    #[tokio::test]
    async fn read_template_missing_is_not_found() {
        let root = TempDir::new().unwrap();
        let store = store_in(root.path());

        let err = store.read_template().await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn read_source_rejects_invalid_utf8() {
        let root = TempDir::new().unwrap();
        let path = root.path().join("bad.md");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = store_in(root.path()).read_source(&path).await.unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
    }

    #[tokio::test]
    async fn write_page_creates_output_dir_and_overwrites() {
        let root = TempDir::new().unwrap();
        let store = store_in(root.path());
        let name = OutputName::for_source(Path::new("about.md")).unwrap();

        store.write_page(&name, "first").await.unwrap();
        let path = store.write_page(&name, "second").await.unwrap();

        assert_eq!(path, root.path().join("output/about.html"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }

    #[tokio::test]
    async fn save_source_moves_upload_into_content() {
        let root = TempDir::new().unwrap();
        let store = store_in(root.path());
        let name = SourceName::parse("post.md").unwrap();

        let path = store.save_source(&name, b"# Post").await.unwrap();

        assert_eq!(path, root.path().join("content/post.md"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Post");
        let leftovers = std::fs::read_dir(root.path().join("tmp")).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn list_pages_only_returns_html_files() {
        let root = TempDir::new().unwrap();
        let output = root.path().join("output");
        std::fs::create_dir_all(&output).unwrap();
        std::fs::write(output.join("b.html"), "b").unwrap();
        std::fs::write(output.join("a.html"), "a").unwrap();
        std::fs::write(output.join("style.css"), "c").unwrap();

        let pages = store_in(root.path()).list_pages().await.unwrap();
        assert_eq!(pages, vec!["a.html".to_string(), "b.html".to_string()]);
    }

    #[tokio::test]
    async fn list_pages_without_output_dir_is_empty() {
        let root = TempDir::new().unwrap();
        assert!(store_in(root.path()).list_pages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_page_returns_none_when_missing() {
        let root = TempDir::new().unwrap();
        let store = store_in(root.path());
        let name = PageName::parse("nope.html").unwrap();

        assert!(store.read_page(&name).await.unwrap().is_none());
    }
}
