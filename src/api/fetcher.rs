// src/api/fetcher.rs
//! Executes query specs against a hub and yields content snapshots.

use super::parser::parse_homepage_response;
use super::ContentHub;
use crate::error::{AppError, ContentFetchError, FetchFailure};
use crate::model::ContentSnapshot;
use crate::preview::PreviewGate;
use crate::query::QuerySpec;
use futures::future::try_join_all;
use std::sync::Arc;

/// Fetches content snapshots from a [`ContentHub`].
///
/// One call, one request: nothing is cached and nothing is retried. Every
/// failure comes back tagged with the query that caused it.
#[derive(Clone)]
pub struct ContentFetcher {
    hub: Arc<dyn ContentHub>,
}

impl ContentFetcher {
    pub fn new(hub: Arc<dyn ContentHub>) -> Self {
        Self { hub }
    }

    /// Runs `spec` once and decodes the result.
    pub async fn fetch(
        &self,
        spec: &QuerySpec,
        gate: PreviewGate,
    ) -> Result<ContentSnapshot, AppError> {
        log::info!(
            "Fetching query '{}' from {} ({})",
            spec.name(),
            self.hub.describe(),
            gate
        );
        log::debug!("Query text:\n{}", spec.to_graphql());

        let outcome = match self.hub.execute(spec, gate).await {
            Ok(response) => parse_homepage_response(response, spec, gate),
            Err(failure) => Err(failure),
        };

        match outcome {
            Ok(snapshot) => {
                log::info!(
                    "Query '{}' returned {} success stories (page {})",
                    spec.name(),
                    snapshot.success_stories().len(),
                    if snapshot.page().is_some() { "present" } else { "absent" }
                );
                Ok(snapshot)
            }
            Err(failure) => Err(Self::fetch_error(spec, failure).into()),
        }
    }

    /// Runs independent specs concurrently; snapshots come back in input order.
    /// The first failure aborts the whole batch.
    pub async fn fetch_all(
        &self,
        specs: &[QuerySpec],
        gate: PreviewGate,
    ) -> Result<Vec<ContentSnapshot>, AppError> {
        try_join_all(specs.iter().map(|spec| self.fetch(spec, gate))).await
    }

    fn fetch_error(spec: &QuerySpec, failure: FetchFailure) -> ContentFetchError {
        if failure.is_timeout() {
            log::error!("Query '{}' timed out", spec.name());
        } else {
            log::error!("Query '{}' failed: {}", spec.name(), failure);
        }
        ContentFetchError {
            query: spec.name().to_string(),
            query_text: spec.to_graphql(),
            failure,
        }
    }
}
