//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/storyweaver/config.toml)
//! 3. Project config (.storyweaver/config.toml)
//! 4. Environment variables (STORYWEAVER_*)
//!
//! The Gemini API key is not part of this tree; it is resolved separately
//! by [`credential`].

pub mod credential;
mod loader;
mod types;

pub use credential::{Credential, CredentialSource};
pub use loader::ConfigLoader;
pub use types::*;
