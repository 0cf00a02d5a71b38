//! Outcome Classification
//!
//! Turns the (text, feedback) pair of a generation into exactly one outcome.
//! Priority: story text, then a safety block, then the silent branch for a
//! failure that was already reported, then a generic empty result.
//!
//! "Feedback present without a block reason" and "no feedback at all" stay
//! separate branches even though not every provider version distinguishes
//! them.

use crate::ai::{BlockReason, PromptFeedback};

/// What to show the user after a generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryOutcome {
    /// Render the story and offer a download
    Story(String),
    /// Withheld by safety settings
    Blocked { reason: BlockReason },
    /// The call failed and the error has already been shown
    AlreadyReported,
    /// Call succeeded but produced nothing usable
    NoStory,
}

impl StoryOutcome {
    pub fn classify(text: Option<&str>, feedback: Option<&PromptFeedback>) -> Self {
        if let Some(text) = text.filter(|t| !t.is_empty()) {
            return Self::Story(text.to_string());
        }

        match feedback {
            Some(PromptFeedback {
                block_reason: Some(reason),
                ..
            }) => Self::Blocked {
                reason: reason.clone(),
            },
            None => Self::AlreadyReported,
            Some(_) => Self::NoStory,
        }
    }

    /// User-facing message for the non-story outcomes
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Story(_) | Self::AlreadyReported => None,
            Self::Blocked { reason } => Some(format!(
                "Story generation was blocked due to safety settings. Reason: {}",
                reason
            )),
            Self::NoStory => Some(
                "No story was generated. This might be due to the prompt or API issues. Please try again or rephrase."
                    .to_string(),
            ),
        }
    }

    /// Follow-up hint shown under a block
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Blocked { .. } => Some(
                "Please try rephrasing your prompt to be clearer and avoid sensitive topics.",
            ),
            _ => None,
        }
    }
}
