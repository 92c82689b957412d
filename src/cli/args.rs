//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

/// mdsite - Markdown to HTML static site generator
#[derive(Parser, Debug)]
#[command(name = "mdsite")]
#[command(version)]
#[command(about = "Markdown to HTML static site generator with an upload service")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory containing markdown sources
    #[arg(short = 'c', long, value_name = "DIR")]
    pub content_dir: Option<String>,

    /// Directory containing page templates
    #[arg(short = 't', long, value_name = "DIR")]
    pub template_dir: Option<String>,

    /// Template file name inside the template directory
    #[arg(long, value_name = "FILE")]
    pub template: Option<String>,

    /// Directory receiving generated pages
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Title for pages without a level-1 heading
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Do not add id anchors to headings
    #[arg(long)]
    pub no_heading_ids: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", env = "MDSITE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run the upload/download web service
    #[arg(long)]
    pub serve: bool,

    /// Listen address for the web service
    #[arg(long, value_name = "ADDR", requires = "serve")]
    pub bind: Option<String>,

    /// Subcommand (builds the whole site when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Reject flag combinations the derive attributes cannot express
    pub fn check_conflicts(&self) -> Result<(), clap::Error> {
        if self.serve && self.command.is_some() {
            return Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                "--serve cannot be combined with a subcommand",
            ));
        }
        Ok(())
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a single markdown file
    Render {
        /// Markdown file to render
        file: PathBuf,
    },
    /// List generated pages
    List,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "content_dir",
    "template_dir",
    "template",
    "output_dir",
    "tmp_dir",
    "default_title",
    "heading_ids",
    "bind",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
