//! Web layer - HTTP upload/download service
//!
//! Accepts markdown uploads, renders them into the output directory, and
//! serves the generated pages as downloadable attachments.

pub mod payload;
pub mod routes;

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use crate::application::{GenerateSiteUseCase, PageCatalog, PublishUploadUseCase};
use crate::infrastructure::{LocalSiteStore, PulldownRenderer};

/// Generator wired to the local filesystem and pulldown-cmark
pub type SiteGenerator = GenerateSiteUseCase<LocalSiteStore, PulldownRenderer>;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<SiteGenerator>,
    pub publisher: Arc<PublishUploadUseCase<LocalSiteStore, PulldownRenderer>>,
    pub catalog: Arc<PageCatalog<LocalSiteStore>>,
}

impl AppState {
    /// Build handler state around a generator
    pub fn new(generator: SiteGenerator) -> Self {
        let catalog = PageCatalog::new(generator.store().clone());
        let generator = Arc::new(generator);

        Self {
            publisher: Arc::new(PublishUploadUseCase::new(Arc::clone(&generator))),
            catalog: Arc::new(catalog),
            generator,
        }
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/upload", post(routes::upload))
        .route("/generate", post(routes::generate))
        .route("/files", get(routes::list_files))
        .route("/downloads/:filename", get(routes::download))
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
