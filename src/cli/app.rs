//! App runners for the batch build, single render, and page listing

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::application::ports::{ConfigStore, SiteStore};
use crate::application::{GenerateCallbacks, GenerateSiteUseCase, PageCatalog, PageResult};
use crate::domain::config::SiteConfig;
use crate::domain::error::ConfigError;
use crate::infrastructure::{LocalSiteStore, PulldownRenderer};
use crate::web::SiteGenerator;

use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: SiteConfig,
) -> Result<SiteConfig, ConfigError> {
    let file_config = store.load().await?;
    let overrides = store.overrides()?;

    // Merge: defaults < file < env < cli
    Ok(SiteConfig::defaults()
        .merge(file_config)
        .merge(overrides)
        .merge(cli_config))
}

/// Wire the generator to the local filesystem and pulldown-cmark
pub fn build_generator(config: &SiteConfig) -> SiteGenerator {
    let store = LocalSiteStore::new(config.layout());
    let renderer = PulldownRenderer::new().with_heading_ids(config.heading_ids_or_default());

    GenerateSiteUseCase::new(store, renderer).with_default_title(config.default_title_or_default())
}

/// Build every page in the content directory
pub async fn run_build(config: SiteConfig) -> ExitCode {
    let generator = build_generator(&config);
    let mut presenter = Presenter::new();

    presenter.plain("Starting site generation...");
    presenter.start_progress(0);

    let discovered = presenter.clone();
    let progress = presenter.clone();
    let callbacks = GenerateCallbacks {
        on_discovered: Some(Box::new(move |sources: &[PathBuf]| {
            discovered.rule();
            discovered.plain(&format!("Found {} markdown file(s):", sources.len()));
            for source in sources {
                discovered.bullet(&display_name(source));
            }
            discovered.rule();
            discovered.set_progress_length(sources.len() as u64);
        })),
        on_page: Some(Box::new(move |page: &PageResult| {
            match page.outcome {
                Ok(ref output) => {
                    progress.success(&format!("Generated: {}", output.display()));
                }
                Err(ref e) => {
                    progress.error(&format!("Skipped {}: {}", page.source.display(), e));
                }
            }
            progress.advance_progress(&display_name(&page.source));
        })),
    };

    let result = generator.render_all(callbacks).await;
    presenter.finish_progress();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.rule();
    presenter.plain("Site generation complete!");
    presenter.plain(&format!(
        "Generated {} HTML file(s) in {}/",
        report.generated_count(),
        generator.store().output_dir().display()
    ));

    let failed = report.failures().count();
    if failed > 0 {
        presenter.warn(&format!("{} file(s) could not be generated", failed));
    }

    if let Some(index) = report.index_page() {
        presenter.index_ready(index);
    }

    if report.is_complete() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Render one file and print the output path
pub async fn run_render(config: SiteConfig, file: &Path) -> ExitCode {
    let generator = build_generator(&config);
    let presenter = Presenter::new();

    match generator.render(file).await {
        Ok(output) => {
            presenter.output(&output.display().to_string());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print the names of generated pages
pub async fn run_list(config: SiteConfig) -> ExitCode {
    let catalog = PageCatalog::new(LocalSiteStore::new(config.layout()));
    let presenter = Presenter::new();

    match catalog.list().await {
        Ok(pages) if pages.is_empty() => {
            presenter.info("No generated pages");
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(pages) => {
            for page in pages {
                presenter.output(&page);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("content/about.md")), "about.md");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn build_generator_uses_layout() {
        let config = SiteConfig::defaults().merge(SiteConfig {
            content_dir: Some("docs".to_string()),
            output_dir: Some("public".to_string()),
            ..Default::default()
        });

        let generator = build_generator(&config);
        assert_eq!(generator.store().content_dir(), Path::new("docs"));
        assert_eq!(generator.store().output_dir(), Path::new("public"));
        assert_eq!(
            generator.store().template_path(),
            PathBuf::from("templates").join("default.html")
        );
    }

    #[tokio::test]
    async fn merge_order_is_file_then_env_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml")).with_env([
            ("MDSITE_OUTPUT_DIR", "from-env"),
            ("MDSITE_CONTENT_DIR", "env-content"),
        ]);
        store
            .save(&SiteConfig {
                template: Some("blog.html".to_string()),
                output_dir: Some("from-file".to_string()),
                default_title: Some("From File".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let cli_config = SiteConfig {
            content_dir: Some("flag-content".to_string()),
            default_title: Some("From Flag".to_string()),
            ..Default::default()
        };
        let merged = load_merged_config(&store, cli_config).await.unwrap();

        assert_eq!(merged.template.as_deref(), Some("blog.html"));
        assert_eq!(merged.output_dir.as_deref(), Some("from-env"));
        assert_eq!(merged.content_dir.as_deref(), Some("flag-content"));
        assert_eq!(merged.default_title.as_deref(), Some("From Flag"));
        assert_eq!(merged.heading_ids, Some(true));
    }

    #[tokio::test]
    async fn broken_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "content_dir = [").unwrap();

        let store = XdgConfigStore::with_path(path).with_env([("MDSITE_BIND", "127.0.0.1:1")]);
        let result = load_merged_config(&store, SiteConfig::empty()).await;
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
