//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/storyweaver/) and project (.storyweaver/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{gemini, server};
use crate::types::{Result, StoryError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Gemini provider settings
    pub llm: LlmConfig,

    /// Web server settings
    pub server: ServerConfig,

    /// Deployment secret store settings
    pub secrets: SecretsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            server: ServerConfig::default(),
            secrets: SecretsConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `StoryError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.llm.primary_model.trim().is_empty() {
            return Err(StoryError::Config(
                "llm.primary_model must not be empty".to_string(),
            ));
        }

        if self.llm.fallback_model.trim().is_empty() {
            return Err(StoryError::Config(
                "llm.fallback_model must not be empty".to_string(),
            ));
        }

        let url = url::Url::parse(&self.llm.api_base).map_err(|e| {
            StoryError::Config(format!("Invalid llm.api_base '{}': {}", self.llm.api_base, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(StoryError::Config(format!(
                "llm.api_base must use http or https scheme, got: {}",
                url.scheme()
            )));
        }

        if self.server.port == 0 {
            return Err(StoryError::Config(
                "server.port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Gemini REST API base URL
    pub api_base: String,

    /// Preferred model resource name
    pub primary_model: String,

    /// Model used when the preferred one is not listed
    pub fallback_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: gemini::DEFAULT_API_BASE.to_string(),
            primary_model: gemini::PRIMARY_MODEL.to_string(),
            fallback_model: gemini::FALLBACK_MODEL.to_string(),
        }
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Campus logo shown above the form (skipped when the file is missing)
    pub logo_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: server::DEFAULT_HOST.to_string(),
            port: server::DEFAULT_PORT,
            logo_path: PathBuf::from(server::DEFAULT_LOGO_PATH),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Secrets Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretsConfig {
    /// TOML file holding deployment secrets
    pub path: PathBuf,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".storyweaver/secrets.toml"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
