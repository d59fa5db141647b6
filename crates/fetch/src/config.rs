use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// MGBase de-novo assembly download page
pub const DEFAULT_BASE_URL: &str = "http://mgbase.qnlm.ac/page/download/deNovoDownload";

/// Where and what to look for on a download page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Page listing the downloadable files
    pub base_url: String,

    /// URL path every download link points at
    pub link_path: String,

    /// Query parameter carrying the file name
    pub query_key: String,

    /// Required suffix of the file name
    pub suffix: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            link_path: "/downloadData/deDownload".to_string(),
            query_key: "path".to_string(),
            suffix: ".fa.gz".to_string(),
            timeout_secs: 30,
        }
    }
}

impl FetchConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.base_url).is_err() {
            bail!("base_url is not an absolute URL: {}", self.base_url);
        }
        if !self.link_path.starts_with('/') {
            bail!("link_path must start with '/': {}", self.link_path);
        }
        if self.query_key.is_empty() {
            bail!("query_key must be non-empty");
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(FetchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_relative_base_url_rejected() {
        let config = FetchConfig {
            base_url: "/page/download".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = FetchConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
