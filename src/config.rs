//! Client configuration

use crate::types::NetworkConfig;
use crate::validation::validate_api_url;
use crate::{BlockrunError, Result};
use std::time::Duration;

/// Default BlockRun API endpoint
pub const DEFAULT_API_URL: &str = "https://blockrun.ai/api";

/// Default timeout for chat requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default timeout for image requests
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(120);

/// Default `max_tokens` for chat completions
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Environment variable overriding the API endpoint
pub const API_URL_ENV: &str = "BLOCKRUN_API_URL";

/// Configuration shared by the LLM and image clients
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash
    pub api_url: String,
    /// Per-request transport timeout
    pub timeout: Duration,
    /// EIP-712 token name forced for every payment
    pub token_name: Option<String>,
    /// EIP-712 token version forced for every payment
    pub token_version: Option<String>,
    /// Chain used when a challenge names an unrecognized network
    pub default_chain_id: u64,
}

impl ClientConfig {
    /// Create a config with the default endpoint and timeout
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            token_name: None,
            token_version: None,
            default_chain_id: NetworkConfig::base_mainnet().chain_id,
        }
    }

    /// Default config with `BLOCKRUN_API_URL` applied
    pub fn from_env() -> Self {
        Self::new().with_env_overrides()
    }

    /// Apply `BLOCKRUN_API_URL`, unless the caller already picked an endpoint
    pub fn with_env_overrides(self) -> Self {
        let env_url = std::env::var(API_URL_ENV).ok();
        self.with_api_url_fallback(env_url)
    }

    pub(crate) fn with_api_url_fallback(self, env_url: Option<String>) -> Self {
        match env_url.filter(|url| !url.trim().is_empty()) {
            Some(url) if self.api_url == DEFAULT_API_URL => self.with_api_url(url),
            _ => self,
        }
    }

    /// Set the API endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Force the EIP-712 token domain instead of the one advertised by the server
    pub fn with_token_domain(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.token_name = Some(name.into());
        self.token_version = Some(version.into());
        self
    }

    /// Set the fallback chain id
    pub fn with_default_chain(mut self, chain_id: u64) -> Self {
        self.default_chain_id = chain_id;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_api_url(&self.api_url)?;

        if self.timeout.is_zero() {
            return Err(BlockrunError::config("Timeout must be greater than zero"));
        }

        if self.default_chain_id == 0 {
            return Err(BlockrunError::config("Default chain id cannot be zero"));
        }

        Ok(())
    }

    /// Join an endpoint path onto the API URL
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
