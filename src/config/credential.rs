//! API Credential Resolution
//!
//! The Gemini API key is looked up in two places, in priority order:
//! 1. The deployment secrets file (TOML, `GEMINI_API_KEY = "..."`)
//! 2. The `GEMINI_API_KEY` environment variable (a local `.env` is loaded
//!    into the environment at startup)
//!
//! A missing or unreadable secrets file falls through to the environment.
//! The key is held as a `SecretString` and never logged.

use secrecy::{ExposeSecret, SecretString};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::constants::credential::API_KEY_NAME;
use crate::types::{Result, StoryError};

/// Where the API key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    SecretsFile,
    Environment,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SecretsFile => write!(f, "secrets file"),
            Self::Environment => write!(f, "environment variable"),
        }
    }
}

/// Resolved Gemini API key
#[derive(Debug, Clone)]
pub struct Credential {
    key: SecretString,
    source: CredentialSource,
}

impl Credential {
    pub fn new(key: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            key: SecretString::from(key.into()),
            source,
        }
    }

    /// Resolve from the secrets file, then the process environment
    pub fn resolve(secrets_path: &Path) -> Result<Self> {
        Self::resolve_with(secrets_path, |name| std::env::var(name).ok())
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve_with<F>(secrets_path: &Path, env_lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = read_secrets_file(secrets_path) {
            info!("Using API key from secrets file: {}", secrets_path.display());
            return Ok(Self::new(key, CredentialSource::SecretsFile));
        }

        if let Some(key) = env_lookup(API_KEY_NAME).filter(|k| !k.trim().is_empty()) {
            info!("Using API key from environment variable {}", API_KEY_NAME);
            return Ok(Self::new(key, CredentialSource::Environment));
        }

        Err(StoryError::MissingCredential {
            secrets_path: secrets_path.display().to_string(),
        })
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub(crate) fn expose(&self) -> &str {
        self.key.expose_secret()
    }
}

/// Read the key from the secrets file. Any failure means "not available".
fn read_secrets_file(path: &Path) -> Option<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Secrets file {} not available: {}", path.display(), e);
            return None;
        }
    };

    let table: toml::Table = match content.parse() {
        Ok(table) => table,
        Err(e) => {
            debug!("Secrets file {} is not valid TOML: {}", path.display(), e);
            return None;
        }
    };

    table
        .get(API_KEY_NAME)
        .and_then(|v| v.as_str())
        .filter(|k| !k.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_secrets_file_takes_priority() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secrets.toml");
        fs::write(&path, "GEMINI_API_KEY = \"from-file\"\n").unwrap();

        let credential =
            Credential::resolve_with(&path, |_| Some("from-env".to_string())).unwrap();
        assert_eq!(credential.source(), CredentialSource::SecretsFile);
        assert_eq!(credential.expose(), "from-file");
    }

    #[test]
    fn test_falls_back_to_environment() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let credential = Credential::resolve_with(&path, |name| {
            assert_eq!(name, "GEMINI_API_KEY");
            Some("from-env".to_string())
        })
        .unwrap();
        assert_eq!(credential.source(), CredentialSource::Environment);
        assert_eq!(credential.expose(), "from-env");
    }

    #[test]
    fn test_unparsable_secrets_file_falls_through() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secrets.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let credential = Credential::resolve_with(&path, |_| Some("env-key".to_string())).unwrap();
        assert_eq!(credential.source(), CredentialSource::Environment);
    }

    #[test]
    fn test_secrets_file_without_key_falls_through() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secrets.toml");
        fs::write(&path, "OTHER_KEY = \"x\"\n").unwrap();

        let credential = Credential::resolve_with(&path, |_| Some("env-key".to_string())).unwrap();
        assert_eq!(credential.expose(), "env-key");
    }

    #[test]
    fn test_missing_everywhere_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secrets.toml");

        let err = Credential::resolve_with(&path, no_env).unwrap_err();
        assert!(matches!(err, StoryError::MissingCredential { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secrets.toml");

        let result = Credential::resolve_with(&path, |_| Some("   ".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let credential = Credential::new("super-secret", CredentialSource::Environment);
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("super-secret"));
    }
}
