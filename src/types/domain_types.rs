// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Read-only access token for the content hub
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Create a new API token with validation
    pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
        let token = token.into();

        if token.is_empty() {
            return Err(ValidationError::InvalidApiToken {
                reason: "API token cannot be empty".to_string(),
            });
        }

        // The token travels in an HTTP header
        if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::InvalidApiToken {
                reason: "API token must not contain whitespace or control characters".to_string(),
            });
        }

        if token.len() < 16 {
            return Err(ValidationError::InvalidApiToken {
                reason: "API token is too short".to_string(),
            });
        }

        Ok(Self(token))
    }

    /// Get the API token as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact all but a short prefix
        let prefix: String = self.0.chars().take(6).collect();
        write!(f, "{}...", prefix)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken({})", self)
    }
}

/// Shared secret that unlocks preview (draft) builds
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewSecret(String);

impl PreviewSecret {
    pub fn new(secret: impl Into<String>) -> Result<Self, ValidationError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ValidationError::InvalidPreviewSecret {
                reason: "preview secret cannot be blank".to_string(),
            });
        }
        Ok(Self(secret))
    }

    /// Compares without short-circuiting on the first differing byte.
    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();
        if expected.len() != candidate.len() {
            return false;
        }
        expected
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for PreviewSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PreviewSecret(<redacted>)")
    }
}

/// Validated URL type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl Serialize for ValidatedUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValidatedUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ValidatedUrl::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl ValidatedUrl {
    /// Create a new validated URL
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url) {
            Ok(parsed_url) => {
                if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "Only HTTP and HTTPS URLs are supported".to_string(),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Get the URL as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Get the underlying URL
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the page being built, used in logs and error reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyField("page id"));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '/')
        {
            return Err(ValidationError::InvalidPageId {
                id: id.clone(),
                reason: "only alphanumerics, '-', '_' and '/' are allowed".to_string(),
            });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully rendered output document ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument(String);

impl RenderedDocument {
    pub fn new(content: String) -> Self {
        Self(content)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_token_validation() {
        assert!(ApiToken::new("").is_err());
        assert!(ApiToken::new("short").is_err());
        assert!(ApiToken::new("has a space in the token").is_err());
        let token = ApiToken::new("faeb9172e232a75339242faafb9e56de").unwrap();
        assert_eq!(token.to_string(), "faeb91...");
        assert!(!format!("{:?}", token).contains("faafb9e56de"));
    }

    #[test]
    fn test_preview_secret_matching() {
        let secret = PreviewSecret::new("let-me-see-drafts").unwrap();
        assert!(secret.matches("let-me-see-drafts"));
        assert!(!secret.matches("let-me-see-draft"));
        assert!(!secret.matches("LET-ME-SEE-DRAFTS"));
        assert!(PreviewSecret::new("   ").is_err());
    }

    #[test]
    fn test_validated_url() {
        assert!(ValidatedUrl::parse("https://www.datocms-assets.com/logo.svg").is_ok());
        assert!(ValidatedUrl::parse("ftp://example.com/logo.svg").is_err());
        assert!(ValidatedUrl::parse("not a url").is_err());
    }

    #[test]
    fn test_page_id() {
        assert_eq!(PageId::new("homepage").unwrap().as_str(), "homepage");
        assert!(PageId::new("").is_err());
        assert!(PageId::new("home page").is_err());
    }
}
