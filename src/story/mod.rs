//! Story Weaving
//!
//! The request/response cycle: validate the idea, assemble the prompt, make
//! one `generateContent` call with the fixed parameters, normalize the
//! response and classify the outcome.

pub mod context;
pub mod download;
pub mod outcome;
pub mod prompt;

pub use download::StoryDownload;
pub use outcome::StoryOutcome;
pub use prompt::build_story_prompt;

use tracing::{error, info};

use crate::ai::{
    GenerateContentRequest, Generation, ModelHandle, ModelSelector, SharedProvider,
};
use crate::config::LlmConfig;
use crate::constants::story::MAX_PROMPT_CHARS;
use crate::types::{Result, StoryError};
use context::CAMPUS_CONTEXT;

// =============================================================================
// Story Request
// =============================================================================

/// A validated story idea paired with the campus context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    user_prompt: String,
    campus_context: &'static str,
}

impl StoryRequest {
    /// Trim the idea and reject blank or oversized input.
    /// Form posts carry CRLF line breaks; they count as one character.
    pub fn new(raw: &str) -> Result<Self> {
        let normalized = raw.replace("\r\n", "\n");
        let user_prompt = normalized.trim();

        if user_prompt.is_empty() {
            return Err(StoryError::Validation(
                "story idea must not be blank".to_string(),
            ));
        }

        let chars = user_prompt.chars().count();
        if chars > MAX_PROMPT_CHARS {
            return Err(StoryError::Validation(format!(
                "story idea is {} characters long (maximum {})",
                chars, MAX_PROMPT_CHARS
            )));
        }

        Ok(Self {
            user_prompt: user_prompt.to_string(),
            campus_context: CAMPUS_CONTEXT,
        })
    }

    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    pub fn campus_context(&self) -> &'static str {
        self.campus_context
    }
}

/// Whether the submit action is available for this input
pub fn is_submittable(raw: &str) -> bool {
    !raw.trim().is_empty()
}

// =============================================================================
// Story Response
// =============================================================================

/// Result of one generation attempt
#[derive(Debug)]
pub enum StoryResponse {
    /// The call completed; text and feedback may each be absent
    Generated(Generation),
    /// The call failed; the error is shown to the user in place
    Failed(StoryError),
}

impl StoryResponse {
    pub fn outcome(&self) -> StoryOutcome {
        match self {
            Self::Generated(generation) => {
                StoryOutcome::classify(generation.text.as_deref(), generation.feedback.as_ref())
            }
            Self::Failed(_) => StoryOutcome::classify(None, None),
        }
    }

    pub fn error(&self) -> Option<&StoryError> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Generated(_) => None,
        }
    }
}

// =============================================================================
// Story Weaver
// =============================================================================

/// Holds the provider and the once-selected model for the process lifetime
pub struct StoryWeaver {
    provider: SharedProvider,
    selector: ModelSelector,
}

impl StoryWeaver {
    pub fn new(provider: SharedProvider, llm: &LlmConfig) -> Self {
        let selector = ModelSelector::new(provider.clone(), &llm.primary_model, &llm.fallback_model);
        Self { provider, selector }
    }

    /// Selected model (lists provider models on first use)
    pub async fn model(&self) -> Result<&ModelHandle> {
        self.selector.model().await
    }

    pub fn provider(&self) -> &SharedProvider {
        &self.provider
    }

    /// Generate a story. Failures are captured in the response, never retried.
    pub async fn weave(&self, request: &StoryRequest) -> StoryResponse {
        match self.generate(request).await {
            Ok(generation) => StoryResponse::Generated(generation),
            Err(e) => {
                error!("API error during generation: {}", e);
                StoryResponse::Failed(e)
            }
        }
    }

    async fn generate(&self, request: &StoryRequest) -> Result<Generation> {
        let model = self.model().await?;
        let prompt = build_story_prompt(request);
        info!(
            "Weaving story ({} chars of idea) with {}",
            request.user_prompt().chars().count(),
            model.name()
        );

        let response = self
            .provider
            .generate_content(model.name(), &GenerateContentRequest::story(prompt))
            .await?;

        Ok(Generation::from_response(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::BlockReason;
    use crate::testing::FakeProvider;
    use serde_json::json;
    use std::sync::Arc;

    fn weaver(provider: Arc<FakeProvider>) -> StoryWeaver {
        StoryWeaver::new(provider, &LlmConfig::default())
    }

    #[test]
    fn test_request_trims_input() {
        let request = StoryRequest::new("  A walk past the Auditorium \n").unwrap();
        assert_eq!(request.user_prompt(), "A walk past the Auditorium");
        assert_eq!(request.campus_context(), CAMPUS_CONTEXT);
    }

    #[test]
    fn test_request_rejects_blank() {
        for raw in ["", "   ", "\n\t "] {
            assert!(!is_submittable(raw));
            assert!(matches!(
                StoryRequest::new(raw),
                Err(StoryError::Validation(_))
            ));
        }
        assert!(is_submittable(" idea "));
    }

    #[test]
    fn test_request_length_bound_counts_chars() {
        let at_limit = "é".repeat(MAX_PROMPT_CHARS);
        assert!(StoryRequest::new(&at_limit).is_ok());

        let over = "a".repeat(MAX_PROMPT_CHARS + 1);
        assert!(StoryRequest::new(&over).is_err());
    }

    #[test]
    fn test_request_counts_crlf_as_one_char() {
        let half = MAX_PROMPT_CHARS / 2;
        let posted = format!("{}\r\n{}", "a".repeat(half), "b".repeat(half - 1));

        let request = StoryRequest::new(&posted).unwrap();
        assert_eq!(request.user_prompt().chars().count(), MAX_PROMPT_CHARS);
        assert_eq!(
            request.user_prompt(),
            format!("{}\n{}", "a".repeat(half), "b".repeat(half - 1))
        );

        let over = format!("{}\r\n{}", "a".repeat(half), "b".repeat(half));
        assert!(StoryRequest::new(&over).is_err());
    }

    #[tokio::test]
    async fn test_weave_sends_fixed_parameters() {
        let provider = Arc::new(FakeProvider::replying(json!({
            "candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}]
        })));
        let weaver = weaver(provider.clone());

        let request = StoryRequest::new("Friends at the Food Court").unwrap();
        let response = weaver.weave(&request).await;
        assert_eq!(response.outcome(), StoryOutcome::Story("Hello world".to_string()));

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (model, body) = &requests[0];
        assert_eq!(model, "models/gemini-2.5-flash");
        assert_eq!(body["generationConfig"]["topK"], 40);
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);

        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Friends at the Food Court"));
        assert!(prompt.contains(CAMPUS_CONTEXT));
    }

    #[tokio::test]
    async fn test_weave_blocked_prompt() {
        let provider = Arc::new(FakeProvider::replying(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        })));
        let response = weaver(provider).weave(&StoryRequest::new("x").unwrap()).await;

        assert!(response.error().is_none());
        assert_eq!(
            response.outcome(),
            StoryOutcome::Blocked {
                reason: BlockReason::Safety
            }
        );
    }

    #[tokio::test]
    async fn test_weave_failure_is_captured() {
        let provider = Arc::new(FakeProvider::failing("connection refused"));
        let response = weaver(provider).weave(&StoryRequest::new("x").unwrap()).await;

        let err = response.error().unwrap();
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(response.outcome(), StoryOutcome::AlreadyReported);
    }

    #[tokio::test]
    async fn test_weave_without_usable_model_fails_without_generating() {
        let provider =
            Arc::new(FakeProvider::replying(json!({})).with_models(&["models/gemma-3-1b-it"]));
        let weaver = weaver(provider.clone());

        let response = weaver.weave(&StoryRequest::new("x").unwrap()).await;
        assert!(matches!(
            response.error(),
            Some(StoryError::NoUsableModel { .. })
        ));
        assert_eq!(provider.request_count(), 0);
    }

    #[tokio::test]
    async fn test_weave_listing_failure_halts_before_generating() {
        let provider =
            Arc::new(FakeProvider::replying(json!({})).failing_listing("permission denied"));
        let weaver = weaver(provider.clone());

        assert!(matches!(weaver.model().await, Err(StoryError::Llm(_))));

        let response = weaver.weave(&StoryRequest::new("x").unwrap()).await;
        let err = response.error().unwrap();
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(provider.request_count(), 0);
    }

    #[tokio::test]
    async fn test_weave_empty_response_is_no_story() {
        let provider = Arc::new(FakeProvider::replying(json!({
            "candidates": [],
            "promptFeedback": {"safetyRatings": []}
        })));
        let response = weaver(provider).weave(&StoryRequest::new("x").unwrap()).await;
        assert_eq!(response.outcome(), StoryOutcome::NoStory);
    }
}
