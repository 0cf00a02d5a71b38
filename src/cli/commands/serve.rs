//! Serve Command
//!
//! Select the model, then host the story form until Ctrl-C.

use crate::cli::{CommandContext, Output};
use crate::types::Result;
use crate::web::Server;

pub struct ServeOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
}

pub async fn run(options: ServeOptions) -> Result<()> {
    let output = Output::new();
    let mut ctx = CommandContext::load()?;

    if let Some(host) = options.host {
        ctx.config.server.host = host;
    }
    if let Some(port) = options.port {
        ctx.config.server.port = port;
    }

    // No usable model means nothing to serve
    output.info(&format!("Using API Key from {}", ctx.credential_source));
    let model = ctx.require_model().await?;
    output.model(model);

    let addr = ctx.config.server.bind_addr();
    output.info(&format!("Open http://{} in your browser", addr));

    Server::new(ctx.weaver.clone())
        .with_logo(ctx.config.server.logo_path.clone())
        .with_credential_source(ctx.credential_source)
        .run(&addr)
        .await
}
