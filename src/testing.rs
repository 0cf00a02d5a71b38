//! In-process provider double for tests

use async_trait::async_trait;
use std::sync::Mutex;

use crate::ai::types::GenerateContentRequest;
use crate::ai::{GenerateContentResponse, GenerativeProvider, ModelInfo};
use crate::types::{ErrorCategory, LlmError, Result};

/// Serves a fixed model list and a scripted generation result,
/// recording every request it receives.
pub struct FakeProvider {
    models: Vec<ModelInfo>,
    reply: std::result::Result<serde_json::Value, LlmError>,
    listing_error: Option<LlmError>,
    pub requests: Mutex<Vec<(String, serde_json::Value)>>,
}

impl FakeProvider {
    pub fn replying(reply: serde_json::Value) -> Self {
        Self {
            models: vec![generation_model("models/gemini-2.5-flash")],
            reply: Ok(reply),
            listing_error: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            models: vec![generation_model("models/gemini-2.5-flash")],
            reply: Err(LlmError::with_provider(
                ErrorCategory::Network,
                message,
                "fake",
            )),
            listing_error: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_models(mut self, names: &[&str]) -> Self {
        self.models = names.iter().map(|n| generation_model(n)).collect();
        self
    }

    /// Make model listing fail with an auth error
    pub fn failing_listing(mut self, message: &str) -> Self {
        self.listing_error = Some(LlmError::with_provider(
            ErrorCategory::Auth,
            message,
            "fake",
        ));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn generation_model(name: &str) -> ModelInfo {
    ModelInfo {
        name: name.to_string(),
        display_name: None,
        supported_generation_methods: vec!["generateContent".to_string()],
    }
}

#[async_trait]
impl GenerativeProvider for FakeProvider {
    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        if let Some(e) = &self.listing_error {
            return Err(e.clone().into());
        }
        Ok(self.models.clone())
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), serde_json::to_value(request)?));

        match &self.reply {
            Ok(value) => Ok(serde_json::from_value(value.clone())?),
            Err(e) => Err(e.clone().into()),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}
