// src/seo.rs
//! Projection of raw SEO entries into renderable document-head tags.

use crate::model::{Page, RawSeoTag};
use handlebars::html_escape;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

/// The head elements this site renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaKind {
    Title,
    Meta,
    Link,
}

impl MetaKind {
    fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "title" => Some(MetaKind::Title),
            "meta" => Some(MetaKind::Meta),
            "link" => Some(MetaKind::Link),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetaKind::Title => "title",
            MetaKind::Meta => "meta",
            MetaKind::Link => "link",
        }
    }
}

/// A normalized, renderable head tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub kind: MetaKind,
    pub attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl MetaTag {
    /// Whether the tag carries everything its kind needs to render.
    fn is_complete(&self) -> bool {
        let has = |key: &str| {
            self.attributes
                .get(key)
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false)
        };
        match self.kind {
            MetaKind::Title => self
                .content
                .as_deref()
                .map(|c| !c.trim().is_empty())
                .unwrap_or(false),
            MetaKind::Meta => self.attributes.contains_key("content") && (has("name") || has("property")),
            MetaKind::Link => has("rel") && has("href"),
        }
    }
}

/// Projects the page's raw SEO entries, preserving their order.
///
/// No page means no tags. Entries with an unknown kind or missing required
/// fields are dropped.
pub fn project(page: Option<&Page>) -> Vec<MetaTag> {
    let Some(page) = page else {
        return Vec::new();
    };

    page.seo
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let tag = normalize(raw);
            if tag.is_none() {
                log::debug!("Dropping SEO entry {}: {:?}", index, raw);
            }
            tag
        })
        .collect()
}

fn normalize(raw: &RawSeoTag) -> Option<MetaTag> {
    let kind = MetaKind::parse(raw.tag.as_ref()?.as_str()?)?;

    let attributes = match &raw.attributes {
        None => IndexMap::new(),
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(key, value)| attribute_text(value).map(|text| (key.clone(), text)))
            .collect(),
        Some(_) => return None,
    };

    let content = match &raw.content {
        None => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => return None,
    };

    let tag = MetaTag {
        kind,
        attributes,
        content,
    };
    tag.is_complete().then_some(tag)
}

/// Attribute values arrive as JSON; only scalars render.
fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Renders tags as head markup, one element per line.
pub fn render_head(tags: &[MetaTag]) -> String {
    let mut out = String::new();
    for tag in tags {
        let mut attributes = String::new();
        for (key, value) in &tag.attributes {
            let _ = write!(attributes, " {}=\"{}\"", html_escape(key), html_escape(value));
        }
        match tag.kind {
            MetaKind::Title => {
                let _ = writeln!(
                    out,
                    "<title{}>{}</title>",
                    attributes,
                    html_escape(tag.content.as_deref().unwrap_or_default())
                );
            }
            MetaKind::Meta | MetaKind::Link => {
                let _ = writeln!(out, "<{}{}/>", tag.kind.as_str(), attributes);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(tag: &str, attributes: Value, content: Option<&str>) -> RawSeoTag {
        RawSeoTag {
            tag: Some(Value::from(tag)),
            attributes: Some(attributes).filter(|v| !v.is_null()),
            content: content.map(Value::from),
        }
    }

    fn page(seo: Vec<RawSeoTag>) -> Page {
        Page { seo }
    }

    #[test]
    fn test_no_page_projects_nothing() {
        assert_eq!(project(None), Vec::<MetaTag>::new());
    }

    #[test]
    fn test_order_is_preserved() {
        let page = page(vec![
            raw("meta", json!({"property": "og:title", "content": "Home"}), None),
            raw("title", Value::Null, Some("Home | Site")),
            raw("link", json!({"rel": "canonical", "href": "https://example.com/"}), None),
        ]);
        let kinds: Vec<MetaKind> = project(Some(&page)).iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![MetaKind::Meta, MetaKind::Title, MetaKind::Link]);
    }

    #[test]
    fn test_incomplete_entries_are_dropped() {
        let page = page(vec![
            raw("script", json!({"src": "x.js"}), None),
            raw("title", Value::Null, Some("  ")),
            raw("meta", json!({"name": "description"}), None),
            raw("link", json!({"rel": "icon"}), None),
            RawSeoTag {
                tag: None,
                attributes: None,
                content: Some(Value::from("orphan")),
            },
            raw("meta", json!({"name": "robots", "content": "index"}), None),
        ]);
        let tags = project(Some(&page));
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].attributes.get("name").map(String::as_str), Some("robots"));
    }

    #[test]
    fn test_wrongly_typed_entries_are_dropped() {
        let page = page(vec![
            RawSeoTag {
                tag: Some(Value::from(42)),
                attributes: None,
                content: Some(Value::from("Home")),
            },
            raw("meta", json!(["name", "robots"]), None),
            RawSeoTag {
                tag: Some(Value::from("title")),
                attributes: None,
                content: Some(json!({"text": "Home"})),
            },
            RawSeoTag::default(),
            raw("title", Value::Null, Some("Home")),
        ]);
        let tags = project(Some(&page));
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].kind, MetaKind::Title);
        assert_eq!(tags[0].content.as_deref(), Some("Home"));
    }

    #[test]
    fn test_non_scalar_attributes_are_skipped() {
        let page = page(vec![raw(
            "meta",
            json!({"name": "twitter:card", "content": "summary", "extra": {"nested": true}}),
            None,
        )]);
        let tags = project(Some(&page));
        assert_eq!(tags[0].attributes.len(), 2);
    }

    #[test]
    fn test_render_head_escapes() {
        let page = page(vec![
            raw("title", Value::Null, Some("Tips & <tricks>")),
            raw("meta", json!({"name": "description", "content": "Say \"hi\""}), None),
        ]);
        let head = render_head(&project(Some(&page)));
        assert_eq!(
            head,
            "<title>Tips &amp; &lt;tricks&gt;</title>\n<meta name=\"description\" content=\"Say &quot;hi&quot;\"/>\n"
        );
    }
}
