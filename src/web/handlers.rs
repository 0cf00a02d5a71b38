use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

use super::AppState;
use super::page::{PageView, ResultView, render_page};
use crate::story::StoryRequest;

#[derive(Debug, Deserialize)]
pub struct StoryForm {
    #[serde(default)]
    pub idea: String,
}

/// Render the empty form
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let model = state.weaver.model().await.ok();
    Html(render_page(&PageView {
        idea: "",
        model,
        credential_source: state.credential_source,
        show_logo: state.logo_path.is_some(),
        result: None,
    }))
}

/// Run one generation for the submitted idea and render the outcome
pub async fn weave_story(State(state): State<AppState>, Form(form): Form<StoryForm>) -> Response {
    let model = state.weaver.model().await.ok();
    let show_logo = state.logo_path.is_some();

    let request = match StoryRequest::new(&form.idea) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected story idea: {}", e);
            let page = render_page(&PageView {
                idea: &form.idea,
                model,
                credential_source: state.credential_source,
                show_logo,
                result: Some(ResultView::Rejected(e.to_string())),
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
        }
    };

    let response = state.weaver.weave(&request).await;

    Html(render_page(&PageView {
        idea: &form.idea,
        model,
        credential_source: state.credential_source,
        show_logo,
        result: Some(ResultView::Response(&response)),
    }))
    .into_response()
}

/// Serve the campus logo
pub async fn logo(State(state): State<AppState>) -> Response {
    let Some(path) = state.logo_path.as_deref() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };

    match tokio::fs::read(path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(e) => {
            warn!("Failed to read logo {}: {}", path.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
