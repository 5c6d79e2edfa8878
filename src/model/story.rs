use crate::types::{HexColor, RecordId, Slug, ValidatedUrl};
use chrono::{DateTime, Utc};
use pulldown_cmark::{html, Parser};
use serde::Serialize;
use std::cmp::Ordering;

/// Rich text delivered by the hub as rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RichText(String);

impl RichText {
    pub fn from_html(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Renders authored markdown the way the hub does for `markdown: true` fields.
    pub fn from_markdown(markdown: &str) -> Self {
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, Parser::new(markdown));
        Self(out)
    }

    pub fn as_html(&self) -> &str {
        &self.0
    }
}

/// A customer success story as the render layer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessStory {
    #[serde(skip)]
    pub id: RecordId,
    pub accent_color: HexColor,
    pub duotone_color1: HexColor,
    pub duotone_color2: HexColor,
    pub title: RichText,
    pub slug: Slug,
    pub logo_url: ValidatedUrl,
    /// `None` for records that only exist as drafts
    #[serde(skip)]
    pub first_published_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

impl SuccessStory {
    pub fn is_draft_only(&self) -> bool {
        self.first_published_at.is_none()
    }
}

/// Total order used for success stories.
///
/// Newest first publication first; never-published drafts after every
/// published record; ties broken by creation time (oldest first) and then
/// by record id, so identical inputs always produce identical output.
pub fn publish_order(a: &SuccessStory, b: &SuccessStory) -> Ordering {
    let by_publication = match (&a.first_published_at, &b.first_published_at) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_publication
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}
