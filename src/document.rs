// src/document.rs
//! Page artifact assembly and the HTML document shell.
//!
//! The artifact is everything the render layer receives for one page: the
//! props (`page`, `successStories`, `preview`), the projected head tags and
//! the composed render tree. The shell only places those into a document;
//! leaf components that render the tree live elsewhere.

use crate::compose::{compose, RenderTree};
use crate::constants::PAGE_DATA_ELEMENT_ID;
use crate::error::AppError;
use crate::model::{ContentSnapshot, Page, SuccessStory};
use crate::preview::PreviewGate;
use crate::seo::{self, MetaTag};
use crate::types::{PageId, RenderedDocument};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

const DOCUMENT_TEMPLATE_NAME: &str = "document";

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"/>
{{{head}}}</head>
<body>
{{#if banner}}<div class="preview-banner" role="status">{{banner}}</div>
{{/if}}<div id="root" data-page="{{page_id}}"></div>
<script type="application/json" id="{{element_id}}">{{{page_data}}}</script>
</body>
</html>
"#;

/// Props handed to the page's leaf components.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    pub page: Option<Page>,
    pub success_stories: Vec<SuccessStory>,
    pub preview: bool,
}

/// One fully assembled page, ready to deliver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageArtifact {
    pub page_id: PageId,
    pub props: PageProps,
    pub head: Vec<MetaTag>,
    pub tree: RenderTree,
    /// Preview affordance from the build's [`PreviewGate`], absent in published builds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<&'static str>,
}

/// Projects and composes a fetched snapshot. Never fails.
pub fn assemble(page_id: PageId, snapshot: ContentSnapshot, gate: PreviewGate) -> PageArtifact {
    let head = seo::project(snapshot.page());
    let tree = compose(&snapshot, gate);
    let (page, success_stories) = snapshot.into_parts();

    log::debug!(
        "Assembled page '{}': {} head tags, {} sections",
        page_id,
        head.len(),
        tree.sections.len()
    );

    PageArtifact {
        page_id,
        props: PageProps {
            page,
            success_stories,
            preview: gate.is_preview(),
        },
        head,
        tree,
        banner: gate.banner(),
    }
}

/// Serializes the artifact as pretty JSON.
pub fn to_json(artifact: &PageArtifact) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(artifact)?)
}

/// Renders the HTML document shell around an artifact.
pub fn render_document(artifact: &PageArtifact) -> Result<RenderedDocument, AppError> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string(DOCUMENT_TEMPLATE_NAME, DOCUMENT_TEMPLATE)
        .map_err(|e| AppError::TemplateRenderError {
            name: DOCUMENT_TEMPLATE_NAME.to_string(),
            message: e.to_string(),
        })?;

    let data = json!({
        "head": seo::render_head(&artifact.head),
        "banner": artifact.banner,
        "page_id": artifact.page_id.as_str(),
        "element_id": PAGE_DATA_ELEMENT_ID,
        "page_data": embeddable_json(artifact)?,
    });

    let html = handlebars
        .render(DOCUMENT_TEMPLATE_NAME, &data)
        .map_err(|e| AppError::TemplateRenderError {
            name: DOCUMENT_TEMPLATE_NAME.to_string(),
            message: e.to_string(),
        })?;

    Ok(RenderedDocument::new(html))
}

/// JSON safe to place inside a `<script>` element.
fn embeddable_json(artifact: &PageArtifact) -> Result<String, AppError> {
    Ok(serde_json::to_string(artifact)?.replace("</", "<\\/"))
}
