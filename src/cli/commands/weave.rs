//! Weave Command
//!
//! One-shot story generation from the terminal.
//!
//! Usage:
//!   storyweaver weave "A rainy evening at the Food Court"
//!   storyweaver weave "..." --save [--output DIR]

use std::path::PathBuf;

use crate::cli::{CommandContext, Output};
use crate::story::{StoryDownload, StoryOutcome, StoryRequest, StoryResponse};
use crate::types::Result;

pub struct WeaveOptions {
    pub idea: String,
    pub save: bool,
    pub output: Option<PathBuf>,
}

pub async fn run(options: WeaveOptions) -> Result<()> {
    let output = Output::new();

    // Reject bad input before touching the network
    let request = StoryRequest::new(&options.idea)?;

    let ctx = CommandContext::load()?;
    output.info(&format!("Using API Key from {}", ctx.credential_source));
    let model = ctx.require_model().await?;
    output.model(model);
    output.info("Gemini is crafting your SGU story... Please wait.");

    let generation = match ctx.weaver.weave(&request).await {
        StoryResponse::Generated(generation) => generation,
        StoryResponse::Failed(e) => {
            if let Some(hint) = e.hint() {
                output.info(hint);
            }
            return Err(e);
        }
    };

    let outcome = StoryOutcome::classify(generation.text.as_deref(), generation.feedback.as_ref());
    match &outcome {
        StoryOutcome::Story(text) => {
            output.section("📜 Your SGU Story");
            println!("{}", text);

            if options.save {
                let dir = match options.output {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                let path = StoryDownload::for_story(text).write_to(&dir)?;
                output.success(&format!("Saved story to {}", path.display()));
            }
        }
        StoryOutcome::Blocked { .. } => {
            if let Some(message) = outcome.message() {
                output.error(&message);
            }
            if let Some(hint) = outcome.hint() {
                output.warning(hint);
            }
        }
        StoryOutcome::NoStory => {
            if let Some(message) = outcome.message() {
                output.warning(&message);
            }
        }
        StoryOutcome::AlreadyReported => {}
    }

    Ok(())
}
