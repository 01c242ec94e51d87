//! Processing configuration: an optional TOML file plus command line overrides.
//!
//! ```toml
//! width = 3840
//! height = 2160
//! format = "{scene}_{shot}_{take}{camera}_{Rating}"
//! prefix = "DAY01_"
//! profile = "labels"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use slate_model::{ProcessConfig, SchemaProfile};
use tracing::debug;

/// Values given on the command line; each one replaces the file setting.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<String>,
    pub prefix: Option<String>,
    pub profile: Option<SchemaProfile>,
}

impl ConfigOverrides {
    #[must_use]
    pub fn apply(&self, mut config: ProcessConfig) -> ProcessConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(format) = &self.format {
            config.format = Some(format.clone());
        }
        if let Some(prefix) = &self.prefix {
            config.prefix.clone_from(prefix);
        }
        if let Some(profile) = self.profile {
            config.profile = profile;
        }
        config
    }
}

/// Parse a TOML configuration document. Missing keys keep their defaults.
pub fn parse_config(content: &str) -> Result<ProcessConfig> {
    toml::from_str(content).context("parse configuration")
}

/// Build the effective configuration and validate it.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<ProcessConfig> {
    let base = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            debug!(path = %path.display(), "loaded configuration file");
            parse_config(&content).with_context(|| format!("in {}", path.display()))?
        }
        None => ProcessConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate().context("invalid configuration")?;
    Ok(config)
}
