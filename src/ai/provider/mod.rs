//! Generative Provider Abstraction
//!
//! Defines the `GenerativeProvider` trait: the two remote operations the
//! story weaver needs (listing models and generating content).

mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use super::response::GenerateContentResponse;
use super::types::GenerateContentRequest;
use crate::constants::generation::GENERATE_CONTENT_METHOD;
use crate::types::Result;

/// Model description returned by model listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Resource name, e.g. `models/gemini-2.5-flash`
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports_generation(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == GENERATE_CONTENT_METHOD)
    }
}

/// Shared provider type
pub type SharedProvider = Arc<dyn GenerativeProvider>;

#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// List all models visible to the credential
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;

    /// Run a single `generateContent` call against `model`
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Names of the models that can generate content, in listing order
pub async fn generation_models(provider: &dyn GenerativeProvider) -> Result<Vec<String>> {
    Ok(provider
        .list_models()
        .await?
        .into_iter()
        .filter(ModelInfo::supports_generation)
        .map(|m| m.name)
        .collect())
}
