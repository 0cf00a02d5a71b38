//! CLI Common Utilities
//!
//! Shared startup for commands that talk to Gemini: load configuration,
//! resolve the API key and build the story weaver.

use std::sync::Arc;

use crate::ai::{GeminiProvider, ModelHandle};
use crate::config::{Config, ConfigLoader, Credential, CredentialSource};
use crate::story::StoryWeaver;
use crate::types::Result;

/// Command execution context
///
/// Holds the resolved configuration and the story weaver. The API key and
/// the selected model live inside the weaver for the rest of the process.
#[derive(Clone)]
pub struct CommandContext {
    pub config: Config,
    pub credential_source: CredentialSource,
    pub weaver: Arc<StoryWeaver>,
}

impl CommandContext {
    /// Load config and resolve the credential. A missing key is fatal.
    pub fn load() -> Result<Self> {
        let config = ConfigLoader::load()?;
        let credential = Credential::resolve(&config.secrets.path)?;
        let credential_source = credential.source();
        let provider = GeminiProvider::new(credential, &config.llm.api_base)?;
        let weaver = Arc::new(StoryWeaver::new(Arc::new(provider), &config.llm));

        Ok(Self {
            config,
            credential_source,
            weaver,
        })
    }

    /// Select the model up front; failures here halt the command
    pub async fn require_model(&self) -> Result<&ModelHandle> {
        self.weaver.model().await
    }
}
