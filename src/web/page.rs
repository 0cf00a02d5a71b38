//! HTML Rendering
//!
//! Server-rendered single page: logo, title, idea inspiration, the idea form
//! and the result area. Story text is rendered from markdown with raw HTML
//! neutralized.

use pulldown_cmark::{CowStr, Event, Parser, Tag, html};
use std::fmt::Write;

use crate::ai::ModelHandle;
use crate::config::CredentialSource;
use crate::constants::server::LOGO_WIDTH;
use crate::constants::story::MAX_PROMPT_CHARS;
use crate::story::context::{IDEA_PLACEHOLDER, STORY_IDEAS};
use crate::story::{StoryDownload, StoryOutcome, StoryResponse, is_submittable};

/// Everything needed to render the page
pub struct PageView<'a> {
    /// Current contents of the idea box
    pub idea: &'a str,
    /// Selected model, when selection succeeded
    pub model: Option<&'a ModelHandle>,
    pub credential_source: Option<CredentialSource>,
    pub show_logo: bool,
    pub result: Option<ResultView<'a>>,
}

/// What to show under the form
pub enum ResultView<'a> {
    /// Input was rejected before any call
    Rejected(String),
    /// A generation attempt ran
    Response(&'a StoryResponse),
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// URL schemes allowed in story links and images
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Relative URLs pass; absolute ones need an allowed scheme
fn is_safe_url(url: &str) -> bool {
    let end = url.find(['/', '?', '#']).unwrap_or(url.len());
    match url[..end].find(':') {
        None => true,
        Some(colon) => SAFE_SCHEMES
            .iter()
            .any(|scheme| url[..colon].eq_ignore_ascii_case(scheme)),
    }
}

/// Render markdown to HTML, passing any embedded HTML through as text.
/// Link and image targets with other schemes are emptied.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new(text).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut body = String::new();

    if view.show_logo {
        let _ = writeln!(
            body,
            r#"<img class="logo" src="/logo" width="{}" alt="Sanjay Ghodawat University logo">"#,
            LOGO_WIDTH
        );
    }

    body.push_str("<h1>📖 SGU Story Weaver ✨</h1>\n");
    body.push_str(
        "<p>Weave a tale set right here on the <strong>Sanjay Ghodawat University</strong> campus!</p>\n",
    );

    if let Some(source) = view.credential_source {
        let _ = writeln!(body, r#"<div class="info">🔑 Using API Key from {}.</div>"#, source);
    }

    if let Some(model) = view.model {
        body.push_str(&render_model_banner(model));
    }

    body.push_str(&render_inspiration());
    body.push_str(&render_form(view.idea));

    match &view.result {
        Some(ResultView::Rejected(message)) => {
            let _ = writeln!(body, r#"<div class="warning">⚠️ {}</div>"#, escape_html(message));
        }
        Some(ResultView::Response(response)) => body.push_str(&render_response(response)),
        None => {}
    }

    body.push_str(&render_footer());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>SGU Story Weaver</title>
<style>{style}</style>
</head>
<body>
<main>
{body}</main>
<script>{script}</script>
</body>
</html>
"#,
        style = STYLE,
        body = body,
        script = SCRIPT,
    )
}

fn render_model_banner(model: &ModelHandle) -> String {
    if model.fallback_used() {
        format!(
            r#"<div class="warning">⚠️ Primary model not found. Falling back to <code>{}</code>.</div>
"#,
            escape_html(model.name())
        )
    } else {
        format!(
            r#"<div class="success">✅ Using model: <code>{}</code></div>
"#,
            escape_html(model.name())
        )
    }
}

fn render_inspiration() -> String {
    let mut out = String::from("<details>\n<summary>💡 Need inspiration? Click for story ideas!</summary>\n<ul>\n");
    for idea in STORY_IDEAS {
        let item = render_markdown(idea);
        let item = item
            .trim()
            .trim_start_matches("<p>")
            .trim_end_matches("</p>");
        let _ = writeln!(out, "<li>{}</li>", item);
    }
    out.push_str("</ul>\n</details>\n");
    out
}

fn render_form(idea: &str) -> String {
    let disabled = if is_submittable(idea) { "" } else { " disabled" };
    format!(
        r#"<form id="story-form" method="post" action="/story">
<label for="idea"><strong>What should your SGU story be about?</strong> (Be descriptive!)</label>
<textarea id="idea" name="idea" rows="5" maxlength="{max}" placeholder="{placeholder}">{idea}</textarea>
<button id="weave" type="submit"{disabled}>✨ Weave My Story!</button>
<div id="spinner" hidden>✍️ Gemini is crafting your SGU story... Please wait.</div>
</form>
"#,
        max = MAX_PROMPT_CHARS,
        placeholder = escape_html(IDEA_PLACEHOLDER),
        idea = escape_html(idea),
        disabled = disabled,
    )
}

fn render_response(response: &StoryResponse) -> String {
    let mut out = String::new();

    if let Some(err) = response.error() {
        let _ = writeln!(
            out,
            r#"<div class="error">❌ API Error during generation: {}</div>"#,
            escape_html(&err.to_string())
        );
        if let Some(hint) = err.hint() {
            let _ = writeln!(out, r#"<div class="info">{}</div>"#, escape_html(hint));
        }
    }

    let outcome = response.outcome();
    match &outcome {
        StoryOutcome::Story(text) => {
            let download = StoryDownload::for_story(text);
            let _ = write!(
                out,
                r#"<hr>
<h2>📜 Your SGU Story:</h2>
<div class="story">
{story}</div>
<a class="download" download="{file_name}" type="{mime}" href="{href}">📥 Download Story (.txt)</a>
"#,
                story = render_markdown(text),
                file_name = escape_html(download.file_name()),
                mime = download.mime(),
                href = escape_html(&download.data_url()),
            );
        }
        StoryOutcome::Blocked { .. } => {
            if let Some(message) = outcome.message() {
                let _ = writeln!(out, r#"<div class="error">🚫 {}</div>"#, escape_html(&message));
            }
            if let Some(hint) = outcome.hint() {
                let _ = writeln!(out, r#"<div class="warning">{}</div>"#, hint);
            }
        }
        StoryOutcome::NoStory => {
            if let Some(message) = outcome.message() {
                let _ = writeln!(out, r#"<div class="warning">⚠️ {}</div>"#, escape_html(&message));
            }
        }
        StoryOutcome::AlreadyReported => {}
    }

    out
}

fn render_footer() -> String {
    r#"<footer>
<hr>
<p>Powered by Google Gemini</p>
</footer>
"#
    .to_string()
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; background: #fafafa; color: #222; }
main { max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
.logo { display: block; max-width: 100%; height: auto; margin: 0 auto 1rem; }
textarea { width: 100%; box-sizing: border-box; font: inherit; padding: .5rem; margin: .5rem 0; }
button { display: block; margin: .5rem auto; padding: .6rem 2rem; font-size: 1rem; }
.story { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; background: #fff; }
.download { display: block; text-align: center; margin: 1rem 0; }
.success, .warning, .error, .info { padding: .6rem 1rem; border-radius: 6px; margin: .5rem 0; }
.success { background: #e6f4ea; } .warning { background: #fff4e5; }
.error { background: #fdecea; } .info { background: #e8f0fe; }
footer { text-align: center; font-size: .85em; color: #777; }
"#;

const SCRIPT: &str = r#"
const idea = document.getElementById('idea');
const weave = document.getElementById('weave');
idea.addEventListener('input', () => { weave.disabled = idea.value.trim() === ''; });
document.getElementById('story-form').addEventListener('submit', () => {
  weave.disabled = true;
  document.getElementById('spinner').hidden = false;
});
"#;
