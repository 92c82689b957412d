//! TOML config file adapter with `MDSITE_*` environment overrides

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::SiteConfig;
use crate::domain::error::ConfigError;

/// Environment variables layered over the config file
pub const ENV_CONTENT_DIR: &str = "MDSITE_CONTENT_DIR";
pub const ENV_TEMPLATE_DIR: &str = "MDSITE_TEMPLATE_DIR";
pub const ENV_OUTPUT_DIR: &str = "MDSITE_OUTPUT_DIR";
pub const ENV_BIND: &str = "MDSITE_BIND";

const APP_DIR: &str = "mdsite";
const FILE_NAME: &str = "config.toml";

const HEADER: &str = "\
# mdsite configuration
#
# Relative directories are resolved against the directory mdsite runs in.
# Keys: content_dir, template_dir, template, output_dir, tmp_dir,
#       default_title, heading_ids, bind

";

/// Config file under the XDG config directory, or at an explicit path
pub struct XdgConfigStore {
    path: PathBuf,
    /// Fixed environment, `None` reads the process environment
    env: Option<BTreeMap<String, String>>,
}

impl XdgConfigStore {
    /// Store at `$XDG_CONFIG_HOME/mdsite/config.toml`
    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Store at an explicit path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env: None,
        }
    }

    /// Read overrides from `vars` instead of the process environment
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    fn default_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_default();
        base.join(APP_DIR).join(FILE_NAME)
    }

    fn var(&self, name: &str) -> Option<String> {
        let value = match self.env {
            Some(ref vars) => vars.get(name).cloned(),
            None => env::var(name).ok(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    fn parse(path: &Path, content: &str) -> Result<SiteConfig, ConfigError> {
        let config: SiteConfig = toml::from_str(content).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", path.display(), e.message()))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn render(config: &SiteConfig) -> Result<String, ConfigError> {
        let body =
            toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        Ok(format!("{HEADER}{body}"))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<SiteConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SiteConfig::empty());
            }
            Err(e) => {
                return Err(ConfigError::ReadError(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        debug!(path = %self.path.display(), "loaded config file");
        Self::parse(&self.path, &content)
    }

    fn overrides(&self) -> Result<SiteConfig, ConfigError> {
        let config = SiteConfig {
            content_dir: self.var(ENV_CONTENT_DIR),
            template_dir: self.var(ENV_TEMPLATE_DIR),
            output_dir: self.var(ENV_OUTPUT_DIR),
            bind: self.var(ENV_BIND),
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    async fn save(&self, config: &SiteConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        // Write beside the target and rename so a crash never leaves half a file
        let staged = self.path.with_extension("toml.tmp");
        fs::write(&staged, Self::render(config)?)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        fs::rename(&staged, &self.path)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.display().to_string(),
            ));
        }

        self.save(&SiteConfig::defaults()).await
    }
}
