//! mdsite CLI entry point

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;

use mdsite::cli::{
    app::{init_tracing, load_merged_config, run_build, run_list, run_render},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    run_serve, EXIT_ERROR, EXIT_USAGE_ERROR,
};
use mdsite::domain::config::SiteConfig;
use mdsite::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = cli.check_conflicts() {
        e.exit();
    }
    let presenter = Presenter::new();

    init_tracing(if cli.serve { "info" } else { "warn" });

    let store = match cli.config {
        Some(ref path) => XdgConfigStore::with_path(path),
        None => XdgConfigStore::new(),
    };

    // Handle config subcommand before loading config
    let command = match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        other => other,
    };

    // Build CLI config from args
    let cli_config = SiteConfig {
        content_dir: cli.content_dir,
        template_dir: cli.template_dir,
        template: cli.template,
        output_dir: cli.output_dir,
        tmp_dir: None,
        default_title: cli.title,
        heading_ids: if cli.no_heading_ids { Some(false) } else { None },
        bind: cli.bind,
    };

    let config = match load_merged_config(&store, cli_config).await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match command {
        Some(Commands::Render { file }) => run_render(config, &file).await,
        Some(Commands::List) => run_list(config).await,
        Some(Commands::Config { .. }) => ExitCode::SUCCESS,
        None if cli.serve => {
            if let Err(e) = config.bind_or_default().parse::<SocketAddr>() {
                presenter.error(&format!(
                    "Invalid bind address '{}': {}",
                    config.bind_or_default(),
                    e
                ));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
            run_serve(config).await
        }
        None => run_build(config).await,
    }
}
