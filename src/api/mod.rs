// src/api/mod.rs
//! Content hub interaction: the ability to run a query against the hub.
//!
//! Transport (`client`, `fixture`), decoding (`parser`, `responses`) and
//! orchestration (`fetcher`) are kept apart so the fetcher never sees HTTP.

pub mod client;
mod fetcher;
pub mod fixture;
pub mod parser;
mod responses;

use crate::error::FetchFailure;
use crate::preview::PreviewGate;
use crate::query::QuerySpec;

pub use client::{ApiResponse, HubHttpClient};
pub use fetcher::ContentFetcher;
pub use fixture::FixtureHub;
pub use responses::{GraphQlEnvelope, GraphQlError, HomepageData, RawSuccessStory, ToDomain};

/// The ability to execute a query against a content hub.
///
/// Implementations return the raw response; status and envelope handling is
/// shared in [`parser`]. Business logic depends on this trait, never on HTTP.
#[async_trait::async_trait]
pub trait ContentHub: Send + Sync {
    /// Runs `query` once. Drafts are visible only when `gate` is in preview.
    async fn execute(
        &self,
        query: &QuerySpec,
        gate: PreviewGate,
    ) -> Result<ApiResponse<String>, FetchFailure>;

    /// Short human description of where content comes from, for logs.
    fn describe(&self) -> String;
}
