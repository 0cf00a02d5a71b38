//! AI Integration Layer
//!
//! Gemini provider, request/response wire types, response normalization and
//! model selection.

pub mod provider;
pub mod response;
pub mod selection;
pub mod types;

pub use provider::{GeminiProvider, GenerativeProvider, ModelInfo, SharedProvider};
pub use response::{
    BlockReason, GenerateContentResponse, Generation, PromptFeedback, ResponseShape,
};
pub use selection::{ModelHandle, ModelSelector, normalize_model_name, select_model};
pub use types::{GenerateContentRequest, GenerationConfig, SafetySetting};
