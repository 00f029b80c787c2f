//! Registry connection settings
//!
//! Priority order (highest to lowest):
//!
//! 1. CLI flags (`--endpoint`, `--token`)
//! 2. Environment variables (`DOCPUB_REGISTRY_URL`, `DOCPUB_REGISTRY_TOKEN`),
//!    including values loaded from `.env`

use crate::error::{DocpubError, Result};

/// Environment variable naming the registry endpoint.
pub const ENDPOINT_ENV: &str = "DOCPUB_REGISTRY_URL";

/// Environment variable carrying the registry API token.
pub const TOKEN_ENV: &str = "DOCPUB_REGISTRY_TOKEN";

/// Resolved registry connection settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryConfig {
    pub endpoint: Option<String>,
    pub api_token: Option<String>,
}

impl RegistryConfig {
    /// Read settings from the environment.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Fill unset fields from environment variables. Empty values are
    /// ignored.
    pub fn with_env(mut self) -> Self {
        if self.endpoint.is_none() {
            if let Ok(value) = std::env::var(ENDPOINT_ENV) {
                if !value.is_empty() {
                    self.endpoint = Some(value);
                }
            }
        }
        if self.api_token.is_none() {
            if let Ok(value) = std::env::var(TOKEN_ENV) {
                if !value.is_empty() {
                    self.api_token = Some(value);
                }
            }
        }
        self
    }

    /// Apply CLI overrides, which win over environment values.
    pub fn with_overrides(mut self, endpoint: Option<String>, token: Option<String>) -> Self {
        if endpoint.is_some() {
            self.endpoint = endpoint;
        }
        if token.is_some() {
            self.api_token = token;
        }
        self
    }

    /// The configured endpoint, or a config error naming how to set one.
    pub fn endpoint(&self) -> Result<&str> {
        self.endpoint.as_deref().ok_or_else(|| DocpubError::Config {
            reason: format!("registry endpoint not set (use --endpoint or {})", ENDPOINT_ENV),
        })
    }
}
