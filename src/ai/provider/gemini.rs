//! Google Gemini API Provider
//!
//! Talks to the Gemini REST API (`models` listing and `generateContent`).
//! The API key travels in the `x-goog-api-key` header, never in the URL.
//! Requests are sent once: no client-side timeout, no retry.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{GenerativeProvider, ModelInfo};
use crate::ai::response::GenerateContentResponse;
use crate::ai::types::GenerateContentRequest;
use crate::config::Credential;
use crate::constants::gemini::{API_KEY_HEADER, LIST_PAGE_SIZE};
use crate::types::{ErrorClassifier, Result, StoryError};

const PROVIDER_NAME: &str = "gemini";

/// Gemini API Provider
pub struct GeminiProvider {
    credential: Credential,
    api_base: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("credential", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(credential: Credential, api_base: &str) -> Result<Self> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            StoryError::Config(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            credential,
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Turn a non-success response into a classified provider error
    async fn error_from_response(response: reqwest::Response, context: &str) -> StoryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or(body);

        ErrorClassifier::classify_http_status(
            status.as_u16(),
            &format!("{} ({}): {}", context, status, detail),
            PROVIDER_NAME,
        )
        .into()
    }

    async fn list_page(&self, page_token: Option<&str>) -> Result<ListModelsResponse> {
        let url = format!("{}/models", self.api_base);
        let mut query = vec![("pageSize", LIST_PAGE_SIZE.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.credential.expose())
            .query(&query)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, PROVIDER_NAME))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response, "Model listing failed").await);
        }

        response
            .json()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, PROVIDER_NAME).into())
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_page(page_token.as_deref()).await?;
            models.extend(page.models);

            match next_page_token(page_token.as_deref(), page.next_page_token) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!("Listed {} models from Gemini", models.len());
        Ok(models)
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        info!("Generating with Gemini (model: {})", model);

        let start_time = Instant::now();
        let url = format!("{}/{}:generateContent", self.api_base, model);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, PROVIDER_NAME))?;

        if !response.status().is_success() {
            let err = Self::error_from_response(response, "Gemini API error").await;
            warn!("Generation failed: {}", err);
            return Err(err);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, PROVIDER_NAME))?;

        let elapsed = start_time.elapsed();
        match &body.usage_metadata {
            Some(usage) => info!(
                "Gemini responded in {:?} (tokens: {} prompt, {} output)",
                elapsed, usage.prompt_token_count, usage.candidates_token_count
            ),
            None => info!("Gemini responded in {:?}", elapsed),
        }
        if let Some(reason) = body.finish_reason() {
            debug!("Finish reason: {}", reason);
        }

        Ok(body)
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

/// Token for the following page. Empty or repeated tokens end the listing.
fn next_page_token(current: Option<&str>, next: Option<String>) -> Option<String> {
    next.filter(|token| !token.is_empty() && current != Some(token.as_str()))
}

// Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
