use anyhow::{Context as AnyhowContext, Result};
use host_lca_fetch::FetchConfig;
use host_lca_lineage::TableFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a default config file
pub const CONFIG_ENV: &str = "HOST_LCA_CONFIG";

/// Settings read from an optional TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostLcaConfig {
    pub table: TableFormat,
    pub fetch: FetchConfig,
}

impl HostLcaConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Explicit path first, then `HOST_LCA_CONFIG`, then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::from_path(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.table.validate()?;
        self.fetch.validate()?;
        Ok(())
    }
}
