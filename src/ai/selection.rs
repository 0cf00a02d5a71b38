//! Model Selection
//!
//! Picks the model used for every story: the primary model when the provider
//! lists it, otherwise the fallback, otherwise a fatal error naming what is
//! available. The choice is made at most once per process.

use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::provider::{SharedProvider, generation_models};
use crate::constants::gemini::MODEL_PREFIX;
use crate::types::{Result, StoryError};

/// The selected remote model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
    name: String,
    fallback_used: bool,
}

impl ModelHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fallback_used(&self) -> bool {
        self.fallback_used
    }
}

/// Accept both `gemini-pro` and `models/gemini-pro`
pub fn normalize_model_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with(MODEL_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", MODEL_PREFIX, name)
    }
}

/// Choose between the primary and fallback model given the available names
pub fn select_model(available: &[String], primary: &str, fallback: &str) -> Result<ModelHandle> {
    let primary = normalize_model_name(primary);
    if available.contains(&primary) {
        info!("Using model: {}", primary);
        return Ok(ModelHandle {
            name: primary,
            fallback_used: false,
        });
    }

    let fallback = normalize_model_name(fallback);
    if available.contains(&fallback) {
        warn!("{} not found. Falling back to {}", primary, fallback);
        return Ok(ModelHandle {
            name: fallback,
            fallback_used: true,
        });
    }

    Err(StoryError::NoUsableModel {
        available: available.to_vec(),
    })
}

/// Lazily selects the model once and serves the cached handle afterwards
pub struct ModelSelector {
    provider: SharedProvider,
    primary: String,
    fallback: String,
    selected: OnceCell<ModelHandle>,
}

impl ModelSelector {
    pub fn new(provider: SharedProvider, primary: &str, fallback: &str) -> Self {
        Self {
            provider,
            primary: primary.to_string(),
            fallback: fallback.to_string(),
            selected: OnceCell::new(),
        }
    }

    /// Selected model, listing provider models on first call only
    pub async fn model(&self) -> Result<&ModelHandle> {
        self.selected
            .get_or_try_init(|| async {
                let available = generation_models(self.provider.as_ref()).await?;
                select_model(&available, &self.primary, &self.fallback)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::{GenerativeProvider, ModelInfo};
    use crate::ai::response::GenerateContentResponse;
    use crate::ai::types::GenerateContentRequest;
    use crate::testing::FakeProvider;
    use crate::types::ErrorCategory;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PRIMARY: &str = "models/gemini-2.5-flash";
    const FALLBACK: &str = "models/gemini-pro";

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_primary_preferred() {
        let available = names(&[FALLBACK, PRIMARY]);
        let handle = select_model(&available, PRIMARY, FALLBACK).unwrap();
        assert_eq!(handle.name(), PRIMARY);
        assert!(!handle.fallback_used());
    }

    #[test]
    fn test_fallback_when_primary_missing() {
        let available = names(&["models/gemini-1.5-flash", FALLBACK]);
        let handle = select_model(&available, PRIMARY, FALLBACK).unwrap();
        assert_eq!(handle.name(), FALLBACK);
        assert!(handle.fallback_used());
    }

    #[test]
    fn test_neither_present_lists_available() {
        let available = names(&["models/gemini-1.5-flash", "models/gemma-3-27b-it"]);
        let err = select_model(&available, PRIMARY, FALLBACK).unwrap_err();

        match &err {
            StoryError::NoUsableModel { available: listed } => assert_eq!(listed, &available),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_fatal());
        assert!(err.to_string().contains("models/gemma-3-27b-it"));
    }

    #[test]
    fn test_bare_names_are_normalized() {
        assert_eq!(normalize_model_name("gemini-pro"), "models/gemini-pro");
        assert_eq!(normalize_model_name(" models/gemini-pro "), "models/gemini-pro");

        let available = names(&[PRIMARY]);
        let handle = select_model(&available, "gemini-2.5-flash", "gemini-pro").unwrap();
        assert_eq!(handle.name(), PRIMARY);
    }

    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GenerativeProvider for CountingProvider {
        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                ModelInfo {
                    name: PRIMARY.to_string(),
                    display_name: None,
                    supported_generation_methods: vec!["embedContent".to_string()],
                },
                ModelInfo {
                    name: FALLBACK.to_string(),
                    display_name: None,
                    supported_generation_methods: vec!["generateContent".to_string()],
                },
            ])
        }

        async fn generate_content(
            &self,
            _model: &str,
            _request: &GenerateContentRequest,
        ) -> Result<GenerateContentResponse> {
            Ok(GenerateContentResponse::default())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_selector_lists_once_and_ignores_non_generation_models() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let selector = ModelSelector::new(provider.clone(), PRIMARY, FALLBACK);

        let first = selector.model().await.unwrap().clone();
        let second = selector.model().await.unwrap().clone();

        // primary only supports embedding, so the fallback is chosen
        assert_eq!(first.name(), FALLBACK);
        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_selector_surfaces_listing_failure() {
        let provider =
            Arc::new(FakeProvider::replying(json!({})).failing_listing("API key not valid"));
        let selector = ModelSelector::new(provider.clone(), PRIMARY, FALLBACK);

        let err = selector.model().await.unwrap_err();
        match err {
            StoryError::Llm(e) => {
                assert_eq!(e.category, ErrorCategory::Auth);
                assert_eq!(e.message, "API key not valid");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(provider.request_count(), 0);
    }
}
