use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static SLUG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]+(?:[-_][a-z0-9]+)*$")
        .expect("Failed to compile slug regex - this is a bug in the code")
});

/// URL-safe unique identifier of a record (e.g. `matter-supply`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Parse a slug, rejecting anything that would not survive as a URL path segment
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::EmptyField("slug"));
        }
        if !SLUG_REGEX.is_match(input) {
            return Err(ValidationError::InvalidSlug {
                slug: input.to_string(),
                reason: "must be lowercase alphanumeric words joined by '-' or '_'".to_string(),
            });
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Slug::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Opaque record identifier assigned by the content hub.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let well_formed = input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if input.is_empty() || !well_formed {
            return Err(ValidationError::InvalidRecordId(input.to_string()));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // The hub sends numeric ids as strings, older fixtures as numbers
        let value = serde_json::Value::deserialize(deserializer)?;
        let text = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "record id must be a string or number, got {}",
                    other
                )))
            }
        };
        RecordId::parse(&text).map_err(serde::de::Error::custom)
    }
}
