//! Gemini Response Normalization
//!
//! A `generateContent` response can carry the story in two shapes: a list of
//! content parts on the first candidate, or a direct text field. Prompt
//! feedback is extracted independently and may be present without any text
//! (for example when the prompt itself was blocked).

use serde::{Deserialize, Serialize};

use super::types::{Content, Part};

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Flattened text, present on some API surfaces
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<BlockReason>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

impl PromptFeedback {
    pub fn blocked(reason: BlockReason) -> Self {
        Self {
            block_reason: Some(reason),
            safety_ratings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyRating {
    pub category: String,
    pub probability: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

/// Provider-supplied cause for withholding content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockReason {
    Unspecified,
    Safety,
    Other,
    Blocklist,
    ProhibitedContent,
    ImageSafety,
    /// Reason name this client does not know yet
    Unrecognized(String),
}

impl BlockReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unspecified => "BLOCK_REASON_UNSPECIFIED",
            Self::Safety => "SAFETY",
            Self::Other => "OTHER",
            Self::Blocklist => "BLOCKLIST",
            Self::ProhibitedContent => "PROHIBITED_CONTENT",
            Self::ImageSafety => "IMAGE_SAFETY",
            Self::Unrecognized(name) => name,
        }
    }
}

impl From<String> for BlockReason {
    fn from(name: String) -> Self {
        match name.as_str() {
            "BLOCK_REASON_UNSPECIFIED" => Self::Unspecified,
            "SAFETY" => Self::Safety,
            "OTHER" => Self::Other,
            "BLOCKLIST" => Self::Blocklist,
            "PROHIBITED_CONTENT" => Self::ProhibitedContent,
            "IMAGE_SAFETY" => Self::ImageSafety,
            _ => Self::Unrecognized(name),
        }
    }
}

impl From<BlockReason> for String {
    fn from(reason: BlockReason) -> Self {
        reason.as_str().to_string()
    }
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Response Shape
// =============================================================================

/// Where the generated text lives in a response
#[derive(Debug, Clone, Copy)]
pub enum ResponseShape<'a> {
    /// Non-empty content parts on the first candidate
    Parts(&'a [Part]),
    /// Non-empty direct text field
    Text(&'a str),
    /// Neither
    Empty,
}

impl GenerateContentResponse {
    pub fn shape(&self) -> ResponseShape<'_> {
        let parts = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default();

        if !parts.is_empty() {
            return ResponseShape::Parts(parts);
        }

        match self.text.as_deref() {
            Some(text) if !text.is_empty() => ResponseShape::Text(text),
            _ => ResponseShape::Empty,
        }
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
    }
}

// =============================================================================
// Generation
// =============================================================================

/// Normalized result of a successful `generateContent` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generation {
    /// Story text, absent when the response carried none
    pub text: Option<String>,
    /// Prompt feedback, independent of the text
    pub feedback: Option<PromptFeedback>,
}

impl Generation {
    pub fn from_response(response: GenerateContentResponse) -> Self {
        let text = match response.shape() {
            ResponseShape::Parts(parts) => Some(
                parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>(),
            ),
            ResponseShape::Text(text) => Some(text.to_string()),
            ResponseShape::Empty => None,
        };

        Self {
            text,
            feedback: response.prompt_feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parts_are_concatenated_in_order() {
        let response = parse(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello "}, {"text": "world"}]},
                "finishReason": "STOP"
            }]
        }));

        let generation = Generation::from_response(response);
        assert_eq!(generation.text.as_deref(), Some("Hello world"));
        assert!(generation.feedback.is_none());
    }

    #[test]
    fn test_parts_without_text_are_skipped() {
        let response = parse(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "Once"},
                    {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                    {"text": " more"}
                ]}
            }]
        }));

        let generation = Generation::from_response(response);
        assert_eq!(generation.text.as_deref(), Some("Once more"));
    }

    #[test]
    fn test_direct_text_used_when_no_parts() {
        let response = parse(json!({"text": "Once upon a time"}));
        assert!(matches!(response.shape(), ResponseShape::Text(_)));

        let generation = Generation::from_response(response);
        assert_eq!(generation.text.as_deref(), Some("Once upon a time"));
    }

    #[test]
    fn test_parts_take_priority_over_text() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": [{"text": "from parts"}]}}],
            "text": "from text"
        }));

        let generation = Generation::from_response(response);
        assert_eq!(generation.text.as_deref(), Some("from parts"));
    }

    #[test]
    fn test_blocked_prompt_has_feedback_but_no_text() {
        let response = parse(json!({
            "promptFeedback": {
                "blockReason": "SAFETY",
                "safetyRatings": [
                    {"category": "HARM_CATEGORY_HARASSMENT", "probability": "HIGH"}
                ]
            }
        }));
        assert!(matches!(response.shape(), ResponseShape::Empty));

        let generation = Generation::from_response(response);
        assert!(generation.text.is_none());

        let feedback = generation.feedback.unwrap();
        assert_eq!(feedback.block_reason, Some(BlockReason::Safety));
        assert_eq!(feedback.safety_ratings.len(), 1);
    }

    #[test]
    fn test_empty_text_field_is_absent() {
        let response = parse(json!({"candidates": [], "text": ""}));
        assert!(Generation::from_response(response).text.is_none());
    }

    #[test]
    fn test_candidate_without_content() {
        let response = parse(json!({"candidates": [{"finishReason": "SAFETY"}]}));
        assert_eq!(response.finish_reason(), Some("SAFETY"));
        assert!(Generation::from_response(response).text.is_none());
    }

    #[test]
    fn test_block_reason_names() {
        assert_eq!(BlockReason::from("SAFETY".to_string()), BlockReason::Safety);
        assert_eq!(BlockReason::ProhibitedContent.to_string(), "PROHIBITED_CONTENT");

        let unknown = BlockReason::from("NEW_REASON".to_string());
        assert_eq!(unknown, BlockReason::Unrecognized("NEW_REASON".to_string()));
        assert_eq!(unknown.as_str(), "NEW_REASON");
    }

    #[test]
    fn test_usage_metadata() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": [{"text": "x"}]}}],
            "usageMetadata": {"promptTokenCount": 900, "candidatesTokenCount": 400, "totalTokenCount": 1300}
        }));
        let usage = response.usage_metadata.unwrap();
        assert_eq!(usage.total_token_count, 1300);
    }
}
