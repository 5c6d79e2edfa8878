use thiserror::Error;

mod collections;
mod colors;
mod domain_types;
mod ids;

pub use collections::*;
pub use colors::*;
pub use domain_types::*;
pub use ids::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid slug: {slug} - {reason}")]
    InvalidSlug { slug: String, reason: String },

    #[error("Duplicate slug in snapshot: {0}")]
    DuplicateSlug(String),

    #[error("Invalid record ID: {0}")]
    InvalidRecordId(String),

    #[error("Invalid hex color: {0}")]
    InvalidColor(String),

    #[error("Collection bounds violation: {actual} items, expected {min}..={max}")]
    BoundsViolation {
        actual: usize,
        min: usize,
        max: usize,
    },

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid API token format: {reason}")]
    InvalidApiToken { reason: String },

    #[error("Invalid preview secret: {reason}")]
    InvalidPreviewSecret { reason: String },

    #[error("Invalid page identifier: {id} - {reason}")]
    InvalidPageId { id: String, reason: String },
}
