//! Global Constants
//!
//! Centralized constants for generation parameters, model names and the
//! user-facing surface. Generation values are fixed per call and are not
//! user-configurable.

/// Generation parameters sent with every request
pub mod generation {
    /// Sampling temperature (creativity)
    pub const TEMPERATURE: f32 = 0.75;

    /// Nucleus sampling
    pub const TOP_P: f32 = 0.85;

    /// Top-k sampling
    pub const TOP_K: u32 = 40;

    /// Maximum tokens in the generated story
    pub const MAX_OUTPUT_TOKENS: u32 = 2048;

    /// Method a model must support to be selectable
    pub const GENERATE_CONTENT_METHOD: &str = "generateContent";
}

/// Gemini API endpoints and model names
pub mod gemini {
    /// REST API base
    pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Preferred model
    pub const PRIMARY_MODEL: &str = "models/gemini-2.5-flash";

    /// Used when the preferred model is not listed
    pub const FALLBACK_MODEL: &str = "models/gemini-pro";

    /// Model resource name prefix
    pub const MODEL_PREFIX: &str = "models/";

    /// Page size for model listing
    pub const LIST_PAGE_SIZE: u32 = 1000;

    /// Header carrying the API key
    pub const API_KEY_HEADER: &str = "x-goog-api-key";
}

/// Credential lookup
pub mod credential {
    /// Key name in the secrets file and the environment
    pub const API_KEY_NAME: &str = "GEMINI_API_KEY";
}

/// Story input and download surface
pub mod story {
    /// Maximum characters accepted for a story idea
    pub const MAX_PROMPT_CHARS: usize = 500;

    /// Download filename prefix
    pub const DOWNLOAD_PREFIX: &str = "sgu_story_";

    /// Download timestamp format (YYYYMMDD_HHMMSS)
    pub const DOWNLOAD_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Download media type
    pub const DOWNLOAD_MIME: &str = "text/plain";
}

/// Web server defaults
pub mod server {
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    pub const DEFAULT_PORT: u16 = 8501;

    /// Rendered logo width in pixels
    pub const LOGO_WIDTH: u32 = 550;

    pub const DEFAULT_LOGO_PATH: &str = "images/SGU_Logo.jpg";
}
