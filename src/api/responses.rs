// src/api/responses.rs
//! Wire shapes of hub responses and their conversion into the domain model.
//!
//! Raw records keep every field as the hub sent it; validation happens in
//! `to_domain`, so a bad value is reported with the field that carried it.

use crate::error::FetchFailure;
use crate::model::{Page, RichText, SuccessStory};
use crate::types::{HexColor, RecordId, Slug, ValidatedUrl};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GraphQL response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl GraphQlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }
}

/// `data` of the homepage query. Roots the query did not select decode as empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageData {
    #[serde(default)]
    pub page: Option<Page>,
    #[serde(default)]
    pub success_stories: Vec<RawSuccessStory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawColor {
    pub hex: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFile {
    pub url: Option<String>,
}

/// A success story exactly as the hub returned it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSuccessStory {
    pub id: RecordId,
    #[serde(rename = "_firstPublishedAt", default)]
    pub first_published_at: Option<DateTime<Utc>>,
    #[serde(rename = "_createdAt")]
    pub created_at: DateTime<Utc>,
    pub accent_color: Option<RawColor>,
    pub duotone_color1: Option<RawColor>,
    pub duotone_color2: Option<RawColor>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub logo: Option<RawFile>,
}

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, FetchFailure>;
}

fn required_color(color: Option<RawColor>, field: &str, id: &RecordId) -> Result<HexColor, FetchFailure> {
    let hex = color
        .and_then(|c| c.hex)
        .ok_or_else(|| FetchFailure::Malformed(format!("story {} has no {}", id, field)))?;
    hex.parse::<HexColor>()
        .map_err(|e| FetchFailure::Malformed(format!("story {} field {}: {}", id, field, e)))
}

impl ToDomain<SuccessStory> for RawSuccessStory {
    fn to_domain(self) -> Result<SuccessStory, FetchFailure> {
        let id = self.id;

        let slug = self
            .slug
            .ok_or_else(|| FetchFailure::Malformed(format!("story {} has no slug", id)))?;
        let slug = Slug::parse(&slug)
            .map_err(|e| FetchFailure::Malformed(format!("story {}: {}", id, e)))?;

        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| FetchFailure::Malformed(format!("story {} has no title", id)))?;

        let logo_url = self
            .logo
            .and_then(|l| l.url)
            .ok_or_else(|| FetchFailure::Malformed(format!("story {} has no logo", id)))?;
        let logo_url = ValidatedUrl::parse(&logo_url)
            .map_err(|e| FetchFailure::Malformed(format!("story {}: {}", id, e)))?;

        Ok(SuccessStory {
            accent_color: required_color(self.accent_color, "accentColor", &id)?,
            duotone_color1: required_color(self.duotone_color1, "duotoneColor1", &id)?,
            duotone_color2: required_color(self.duotone_color2, "duotoneColor2", &id)?,
            title: RichText::from_html(title),
            slug,
            logo_url,
            first_published_at: self.first_published_at,
            created_at: self.created_at,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawSuccessStory {
        serde_json::from_value(value).unwrap()
    }

    fn complete() -> serde_json::Value {
        json!({
            "id": "4153029",
            "_firstPublishedAt": "2021-03-02T10:00:00+01:00",
            "_createdAt": "2021-02-20T09:00:00+01:00",
            "accentColor": { "hex": "#FF7751" },
            "duotoneColor1": { "hex": "#1d2d35" },
            "duotoneColor2": { "hex": "#ffddd3" },
            "title": "<p>How <strong>Chillys</strong> grew</p>",
            "slug": "chillys",
            "logo": { "url": "https://www.datocms-assets.com/205/chillys.svg" }
        })
    }

    #[test]
    fn test_complete_story_converts() {
        let story = raw(complete()).to_domain().unwrap();
        assert_eq!(story.slug.as_str(), "chillys");
        assert_eq!(story.accent_color.as_str(), "#ff7751");
        assert!(!story.is_draft_only());
        assert_eq!(
            story.first_published_at.unwrap().to_rfc3339(),
            "2021-03-02T09:00:00+00:00"
        );
    }

    #[test]
    fn test_missing_logo_is_malformed() {
        let mut value = complete();
        value["logo"] = serde_json::Value::Null;
        let err = raw(value).to_domain().unwrap_err();
        assert!(matches!(err, FetchFailure::Malformed(ref m) if m.contains("no logo")), "{}", err);
    }

    #[test]
    fn test_bad_color_is_malformed() {
        let mut value = complete();
        value["duotoneColor2"] = json!({ "hex": "pink" });
        let err = raw(value).to_domain().unwrap_err();
        assert!(err.to_string().contains("duotoneColor2"), "{}", err);
    }

    #[test]
    fn test_draft_has_no_publication_time() {
        let mut value = complete();
        value["_firstPublishedAt"] = serde_json::Value::Null;
        assert!(raw(value).to_domain().unwrap().is_draft_only());
    }
}
