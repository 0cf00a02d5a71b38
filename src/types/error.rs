//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Taxonomy
//!
//! - **Configuration**: missing credential, no usable model, invalid config (fatal)
//! - **Provider**: failures talking to the Gemini API (reported, process continues)
//! - **Validation**: rejected user input (blank or oversized story idea)
//!
//! Safety blocks and empty results are not errors; they are classified
//! outcomes (see `story::outcome`).

use thiserror::Error;

use crate::constants::credential::API_KEY_NAME;

// =============================================================================
// Error Categories
// =============================================================================

/// Provider error categories, derived from HTTP status or transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited or quota exhausted
    RateLimit,
    /// Authentication failed (bad or revoked API key)
    Auth,
    /// Network/connectivity issues
    Network,
    /// Model or endpoint not available
    Unavailable,
    /// Invalid request
    BadRequest,
    /// Response body could not be decoded
    ParseError,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl ErrorCategory {
    /// Short user-facing hint shown next to a failed generation
    pub fn hint(&self) -> &'static str {
        match self {
            Self::RateLimit => "The API quota was exhausted. Wait a moment and try again.",
            Self::Auth => "Check that your Gemini API key is valid.",
            Self::Network => "Check your network connection.",
            Self::BadRequest => "Try a shorter or simpler story idea.",
            _ => "Check network, API key, or prompt complexity.",
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// Provider error with category and provider context
#[derive(Debug, Clone)]
pub struct LlmError {
    /// Error category for user guidance
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps transport and HTTP failures onto error categories
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify HTTP status code
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        let category = match status {
            429 => ErrorCategory::RateLimit,
            401 | 403 => ErrorCategory::Auth,
            400 => ErrorCategory::BadRequest,
            404 => ErrorCategory::Unavailable,
            500 | 502 | 503 | 504 => ErrorCategory::Transient,
            _ => ErrorCategory::Unknown,
        };
        LlmError::with_provider(category, message, provider)
    }

    /// Classify a transport-level reqwest failure
    pub fn classify_transport(err: &reqwest::Error, provider: &str) -> LlmError {
        let category = if err.is_connect() || err.is_timeout() {
            ErrorCategory::Network
        } else if err.is_decode() {
            ErrorCategory::ParseError
        } else if let Some(status) = err.status() {
            return Self::classify_http_status(status.as_u16(), &err.to_string(), provider);
        } else {
            ErrorCategory::Unknown
        };
        LlmError::with_provider(category, err.to_string(), provider)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum StoryError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors (fatal)
    // -------------------------------------------------------------------------
    #[error(
        "Gemini API key not found.\n\
         Set it in one of the following places:\n  \
         1. Secrets file ({secrets_path}): {key} = \"YOUR_API_KEY\"\n  \
         2. Environment or a local .env file: {key}=YOUR_API_KEY\n\
         Get your key from Google AI Studio: https://aistudio.google.com/",
        key = API_KEY_NAME
    )]
    MissingCredential { secrets_path: String },

    #[error(
        "No valid Gemini models found for content generation. Available models supporting 'generateContent': [{}]",
        available.join(", ")
    )]
    NoUsableModel { available: Vec<String> },

    #[error("Config error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Provider Errors
    // -------------------------------------------------------------------------
    #[error("LLM error: {0}")]
    Llm(LlmError),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid story idea: {0}")]
    Validation(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl From<LlmError> for StoryError {
    fn from(err: LlmError) -> Self {
        StoryError::Llm(err)
    }
}

pub type Result<T> = std::result::Result<T, StoryError>;

impl StoryError {
    /// Configuration errors halt the process instead of being shown in place
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. } | Self::NoUsableModel { .. } | Self::Config(_)
        )
    }

    /// User guidance for provider failures
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Llm(e) => Some(e.category.hint()),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
