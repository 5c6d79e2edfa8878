// src/preview.rs
//! The preview flag for one build.
//!
//! A `PreviewGate` is decided once, when the build starts, and then passed by
//! value to every stage that cares: the fetcher (drafts or published only),
//! the composer and the document shell (the visible preview banner). No stage
//! reads preview state from anywhere else.

use crate::constants::PREVIEW_BANNER_TEXT;
use crate::error::AppError;
use crate::types::PreviewSecret;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PreviewGate {
    preview: bool,
}

impl PreviewGate {
    /// Only published content is visible.
    pub const fn published() -> Self {
        Self { preview: false }
    }

    /// Drafts are visible alongside published content.
    pub const fn preview() -> Self {
        Self { preview: true }
    }

    /// Decides the flag at build entry.
    ///
    /// No requested secret means a published build. A requested secret must
    /// equal the configured one; asking for preview on a site without a
    /// configured secret is refused.
    pub fn enter(
        requested: Option<&str>,
        configured: Option<&PreviewSecret>,
    ) -> Result<Self, AppError> {
        match (requested, configured) {
            (None, _) => Ok(Self::published()),
            (Some(_), None) => Err(AppError::PreviewDenied(
                "no preview secret is configured for this site".to_string(),
            )),
            (Some(candidate), Some(secret)) if secret.matches(candidate) => {
                log::info!("Preview mode enabled: drafts will be included");
                Ok(Self::preview())
            }
            (Some(_), Some(_)) => Err(AppError::PreviewDenied(
                "preview secret does not match".to_string(),
            )),
        }
    }

    pub fn is_preview(self) -> bool {
        self.preview
    }

    /// Text of the preview affordance, present only in preview mode.
    pub fn banner(self) -> Option<&'static str> {
        self.preview.then_some(PREVIEW_BANNER_TEXT)
    }
}

impl fmt::Display for PreviewGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.preview {
            write!(f, "preview")
        } else {
            write!(f, "published")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_request_means_published() {
        let secret = PreviewSecret::new("drafts-please").unwrap();
        assert_eq!(
            PreviewGate::enter(None, Some(&secret)).unwrap(),
            PreviewGate::published()
        );
        assert_eq!(PreviewGate::enter(None, None).unwrap(), PreviewGate::published());
    }

    #[test]
    fn test_matching_secret_enables_preview() {
        let secret = PreviewSecret::new("drafts-please").unwrap();
        let gate = PreviewGate::enter(Some("drafts-please"), Some(&secret)).unwrap();
        assert!(gate.is_preview());
        assert_eq!(gate.banner(), Some(PREVIEW_BANNER_TEXT));
    }

    #[test]
    fn test_wrong_or_unconfigured_secret_is_refused() {
        let secret = PreviewSecret::new("drafts-please").unwrap();
        assert!(matches!(
            PreviewGate::enter(Some("guess"), Some(&secret)),
            Err(AppError::PreviewDenied(_))
        ));
        assert!(matches!(
            PreviewGate::enter(Some("drafts-please"), None),
            Err(AppError::PreviewDenied(_))
        ));
    }

    #[test]
    fn test_published_has_no_banner() {
        assert_eq!(PreviewGate::published().banner(), None);
        assert_eq!(PreviewGate::published().to_string(), "published");
        assert_eq!(PreviewGate::preview().to_string(), "preview");
    }
}
