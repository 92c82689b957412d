//! Web service runner

use std::process::ExitCode;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::application::ports::SiteStore;
use crate::domain::config::SiteConfig;
use crate::web::{self, AppState};

use super::app::{build_generator, EXIT_ERROR, EXIT_SUCCESS};
use super::presenter::Presenter;
use super::signals::wait_for_shutdown;

/// Run the upload/download service until SIGINT or SIGTERM
pub async fn run_serve(config: SiteConfig) -> ExitCode {
    let presenter = Presenter::new();
    let generator = build_generator(&config);

    if let Err(e) = generator.store().ensure_layout().await {
        presenter.error(&format!("Failed to prepare site directories: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let template = generator.store().template_path();
    if !template.is_file() {
        warn!(template = %template.display(), "template missing, renders will fail until it exists");
        presenter.warn(&format!("Template not found: {}", template.display()));
    }

    let bind = config.bind_or_default();
    let listener = match TcpListener::bind(bind).await {
        Ok(listener) => listener,
        Err(e) => {
            presenter.error(&format!("Failed to bind {}: {}", bind, e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let address = match listener.local_addr() {
        Ok(addr) => addr.to_string(),
        Err(_) => bind.to_string(),
    };
    info!(%address, "service listening");
    presenter.success(&format!("Listening on http://{}", address));
    presenter.info("Press Ctrl+C to stop");

    let shutdown = async {
        let reason = wait_for_shutdown().await;
        info!(%reason, "shutting down");
    };

    match web::serve(listener, AppState::new(generator), shutdown).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&format!("Service error: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}
