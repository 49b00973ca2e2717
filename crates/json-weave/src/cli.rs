//! `weave-cli` — logic behind the command-line entry points.
//!
//! - `weave-render` — render a JsonML page template with a content file
//! - `weave-diff`   — diff an edited working value against a content file

use json_weave_core::{content, diff::diff, Binder};
use json_weave_dom::{to_html, Document};
use serde_json::Value;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Json(serde_json::Error),
    Template(String),
    Content(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Json(e) => write!(f, "{e}"),
            CliError::Template(e) => write!(f, "Invalid template: {e}"),
            CliError::Content(e) => write!(f, "{e}"),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

// ── weave-render ──────────────────────────────────────────────────────────

/// Render a JsonML template against a content document and return HTML.
///
/// `template_json`: the page template as a JsonML string.
/// `content_json`: the content file (`{ ...metadata, data: ... }`).
pub fn render_page(
    template_json: &str,
    content_json: &str,
    source_id: &str,
) -> Result<String, CliError> {
    let template: Value = serde_json::from_str(template_json)?;
    let doc =
        Document::from_jsonml(&template).map_err(|e| CliError::Template(e.to_string()))?;
    let snapshot =
        content::from_str(source_id, content_json).map_err(|e| CliError::Content(e.to_string()))?;
    let binder = Binder::initialize(doc, snapshot);
    Ok(to_html(binder.document()))
}

// ── weave-diff ────────────────────────────────────────────────────────────

/// Diff an edited working value against a content file's pristine data.
///
/// Returns the changelist as a pretty-printed JSON array.
pub fn diff_against_content(
    content_json: &str,
    working_json: &str,
    source_id: &str,
) -> Result<String, CliError> {
    let snapshot =
        content::from_str(source_id, content_json).map_err(|e| CliError::Content(e.to_string()))?;
    let working: Value = serde_json::from_str(working_json)?;
    let records = diff(&snapshot.data, &working);
    Ok(serde_json::to_string_pretty(&records)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────
