//! Models Command
//!
//! List the models the key can generate with and show which one would be
//! selected.

use console::style;
use serde_json::json;

use crate::ai::provider::generation_models;
use crate::ai::select_model;
use crate::cli::{CommandContext, Output};
use crate::types::Result;

pub async fn run(format: &str) -> Result<()> {
    let ctx = CommandContext::load()?;
    let llm = &ctx.config.llm;

    let available = generation_models(&**ctx.weaver.provider()).await?;
    let selection = select_model(&available, &llm.primary_model, &llm.fallback_model);

    if format == "json" {
        let selected = selection.as_ref().ok().map(|m| m.name().to_string());
        let report = json!({
            "models": available,
            "primary": llm.primary_model,
            "fallback": llm.fallback_model,
            "selected": selected,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let output = Output::new();
    output.header(&format!("Generation models ({})", available.len()));
    for name in &available {
        let marker = match &selection {
            Ok(m) if m.name() == name.as_str() => style("→").green().to_string(),
            _ => " ".to_string(),
        };
        println!("  {} {}", marker, name);
    }
    println!();

    match selection {
        Ok(model) => output.model(&model),
        Err(e) => output.error(&e.to_string()),
    }
    Ok(())
}
