// src/lib.rs
//! hub2page library: turns content-hub records into a typed page render tree.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ContentFetchError`, `FetchFailure`, `ValidationError`
//! - **Configuration**: `PipelineConfig`, `CommandLineInput`
//! - **Queries**: `QuerySpec` and the `homepage_query` it is built into
//! - **Fetching**: `ContentFetcher`, `ContentHub`, `HubHttpClient`, `FixtureHub`
//! - **Composition**: `seo::project`, `compose::compose`, `document::assemble`
//! - **Delivery**: `OutputPlan`, `deliver`

mod api;
mod config;
mod constants;
mod error;
mod model;
mod output;
mod pipeline;
mod preview;
mod types;

pub mod compose;
pub mod document;
pub mod query;
pub mod seo;

// --- Error Handling ---
pub use crate::error::{AppError, ContentFetchError, FetchFailure, HubErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, HubSource, PipelineConfig};
pub use crate::constants::*;

// --- Domain Model ---
pub use crate::model::{publish_order, ContentSnapshot, Page, RawSeoTag, RichText, SuccessStory};
pub use crate::preview::PreviewGate;

// --- Domain Types ---
pub use crate::types::{
    ApiToken, BoundedVec, Duotone, HexColor, LimitedVec, PageId, PreviewSecret, RecordId,
    RenderedDocument, Slug, ValidatedUrl,
};

// --- Queries ---
pub use crate::query::homepage::homepage_query;
pub use crate::query::{HubSchema, QuerySpec};

// --- API Client ---
pub use crate::api::{
    parser::{parse_api_response, parse_homepage_response},
    ApiResponse, ContentFetcher, ContentHub, FixtureHub, GraphQlEnvelope, GraphQlError,
    HomepageData, HubHttpClient, RawSuccessStory, ToDomain,
};

// --- Composition ---
pub use crate::compose::{RenderTree, Section, SectionSlot};
pub use crate::document::{PageArtifact, PageProps};
pub use crate::seo::{MetaKind, MetaTag};

// --- Delivery ---
pub use crate::output::{deliver, DeliveryTarget, OutputFormat, OutputPlan, OutputReport};

// --- Pipeline Traits ---
pub use crate::pipeline::{build_page, ContentSource, PageComposer, PageDelivery};
