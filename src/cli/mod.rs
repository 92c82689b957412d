//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the build/render/serve runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod serve_app;
pub mod signals;

// Re-export commonly used types
pub use app::{
    build_generator, init_tracing, load_merged_config, run_build, run_list, run_render,
    EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR,
};
pub use args::{Cli, Commands, ConfigAction};
pub use config_cmd::handle_config_command;
pub use presenter::Presenter;
pub use serve_app::run_serve;
