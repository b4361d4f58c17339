use std::env;
use std::time::Duration;

use anyhow::Context;

/// Configuration for the remote product API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Load API configuration from environment variables
    ///
    /// Environment variables:
    /// - PRODUCT_API_BASE_URL: Base URL of the product API (required)
    /// - PRODUCT_API_TIMEOUT_SECS: Request timeout in seconds (default: 30)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let base_url = lookup("PRODUCT_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .context("PRODUCT_API_BASE_URL must be set")?;

        let timeout_secs = match lookup("PRODUCT_API_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("PRODUCT_API_TIMEOUT_SECS is not a number: {raw}"))?,
            None => 30,
        };

        Ok(Self {
            base_url: base_url.trim().to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
