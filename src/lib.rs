//! SGU Story Weaver
//!
//! Turns a short story idea into a campus story set at Sanjay Ghodawat
//! University, using Google's Gemini models. The idea is combined with a
//! fixed description of the campus, sent as a single generation request and
//! the result is shown on a web form or printed in the terminal.

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod story;
pub mod types;
pub mod web;

#[cfg(test)]
mod testing;

pub use ai::{GeminiProvider, GenerativeProvider, ModelHandle};
pub use config::{Config, ConfigLoader, Credential};
pub use story::{StoryOutcome, StoryRequest, StoryResponse, StoryWeaver};
pub use types::{Result, StoryError};
