pub(crate) mod story;

pub use story::{publish_order, RichText, SuccessStory};

use crate::constants::SUCCESS_STORIES_LIMIT;
use crate::types::{LimitedVec, ValidationError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// One raw document-head entry as published by the hub.
///
/// Fields are kept as untyped JSON: the hub may send entries this site
/// cannot render, and those are dropped by the SEO projector rather than
/// failing the whole fetch. JSON `null` is stored as `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RawSeoTag {
    pub tag: Option<Value>,
    pub attributes: Option<Value>,
    pub content: Option<Value>,
}

impl RawSeoTag {
    /// Takes the known members of an entry; anything but an object is an empty entry.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };
        let mut take = |key: &str| fields.remove(key).filter(|v| !v.is_null());
        Self {
            tag: take("tag"),
            attributes: take("attributes"),
            content: take("content"),
        }
    }
}

/// The home page record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    /// Head entries in publication order
    #[serde(default, deserialize_with = "lenient_seo_entries")]
    pub seo: Vec<RawSeoTag>,
}

/// Decodes head entries one by one so a single odd entry never rejects the page.
/// A missing, null or non-array `seo` member is an empty list.
fn lenient_seo_entries<'de, D>(deserializer: D) -> Result<Vec<RawSeoTag>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(entries) => Ok(entries.into_iter().map(RawSeoTag::from_value).collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            log::debug!("Ignoring non-array SEO member: {}", other);
            Ok(Vec::new())
        }
    }
}

/// Ordered success stories, at most [`SUCCESS_STORIES_LIMIT`].
pub type SuccessStories = LimitedVec<SuccessStory, SUCCESS_STORIES_LIMIT>;

/// Result of one fetch, owned by a single render.
///
/// A snapshot is only built through [`ContentSnapshot::assemble`], so every
/// value of this type has its stories ordered, bounded and uniquely slugged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSnapshot {
    page: Option<Page>,
    success_stories: SuccessStories,
}

impl ContentSnapshot {
    /// Builds a snapshot, enforcing the story invariants.
    ///
    /// Stories are stably sorted by [`publish_order`] and cut to `limit`
    /// (never more than [`SUCCESS_STORIES_LIMIT`]). A repeated slug is an error.
    pub fn assemble(
        page: Option<Page>,
        mut stories: Vec<SuccessStory>,
        limit: usize,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for story in &stories {
            if !seen.insert(story.slug.clone()) {
                return Err(ValidationError::DuplicateSlug(story.slug.to_string()));
            }
        }

        stories.sort_by(publish_order);
        stories.truncate(limit.min(SUCCESS_STORIES_LIMIT));

        Ok(Self {
            page,
            success_stories: SuccessStories::truncating(stories)?,
        })
    }

    /// Snapshot of a hub with nothing published.
    pub fn empty() -> Self {
        Self {
            page: None,
            success_stories: SuccessStories::default(),
        }
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn success_stories(&self) -> &[SuccessStory] {
        self.success_stories.as_slice()
    }

    pub fn into_parts(self) -> (Option<Page>, Vec<SuccessStory>) {
        (self.page, self.success_stories.into_inner())
    }
}
