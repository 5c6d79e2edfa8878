// src/pipeline.rs
//! Pipeline capability traits: the three stages of a page build.
//!
//! Each trait describes a single capability, so every stage can be tested
//! in isolation and [`build_page`] can be driven by stubs.

use crate::document::PageArtifact;
use crate::error::AppError;
use crate::model::ContentSnapshot;
use crate::output::OutputReport;
use crate::preview::PreviewGate;
use crate::query::QuerySpec;

/// Retrieves a content snapshot for a query.
#[async_trait::async_trait]
pub trait ContentSource {
    async fn fetch(&self, spec: &QuerySpec, gate: PreviewGate)
        -> Result<ContentSnapshot, AppError>;
}

/// Turns a snapshot into a page artifact. Composition cannot fail.
pub trait PageComposer {
    fn compose(&self, snapshot: ContentSnapshot, gate: PreviewGate) -> PageArtifact;
}

/// Delivers an artifact to its destinations.
pub trait PageDelivery {
    fn deliver(&self, artifact: &PageArtifact) -> Result<OutputReport, AppError>;
}

/// Runs fetch, compose and deliver in order.
///
/// Composition starts only after the fetch has fully succeeded; a failed
/// fetch returns before anything is composed or written.
pub async fn build_page<P>(
    pipeline: &P,
    spec: &QuerySpec,
    gate: PreviewGate,
) -> Result<(PageArtifact, OutputReport), AppError>
where
    P: ContentSource + PageComposer + PageDelivery + Sync,
{
    let snapshot = pipeline.fetch(spec, gate).await?;
    let artifact = pipeline.compose(snapshot, gate);
    let report = pipeline.deliver(&artifact)?;
    Ok((artifact, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::assemble;
    use crate::error::{ContentFetchError, FetchFailure};
    use crate::query::homepage::homepage_query;
    use crate::types::PageId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Recorder {
        fail_fetch: bool,
        composed: AtomicUsize,
        delivered: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ContentSource for Recorder {
        async fn fetch(
            &self,
            spec: &QuerySpec,
            _gate: PreviewGate,
        ) -> Result<ContentSnapshot, AppError> {
            if self.fail_fetch {
                return Err(ContentFetchError {
                    query: spec.name().to_string(),
                    query_text: spec.to_graphql(),
                    failure: FetchFailure::Malformed("truncated body".to_string()),
                }
                .into());
            }
            Ok(ContentSnapshot::empty())
        }
    }

    impl PageComposer for Recorder {
        fn compose(&self, snapshot: ContentSnapshot, gate: PreviewGate) -> PageArtifact {
            self.composed.fetch_add(1, Ordering::SeqCst);
            assemble(PageId::new("index").unwrap(), snapshot, gate)
        }
    }

    impl PageDelivery for Recorder {
        fn deliver(&self, _artifact: &PageArtifact) -> Result<OutputReport, AppError> {
            self.delivered.fetch_add(1, Ordering::SeqCst);
            Ok(OutputReport::new())
        }
    }

    #[tokio::test]
    async fn test_stages_run_in_order() {
        let recorder = Recorder::default();
        let (artifact, _) = build_page(&recorder, &homepage_query(), PreviewGate::published())
            .await
            .unwrap();
        assert!(artifact.head.is_empty());
        assert_eq!(recorder.composed.load(Ordering::SeqCst), 1);
        assert_eq!(recorder.delivered.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_never_composes() {
        let recorder = Recorder {
            fail_fetch: true,
            ..Recorder::default()
        };
        let err = build_page(&recorder, &homepage_query(), PreviewGate::published())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ContentFetch(_)));
        assert_eq!(recorder.composed.load(Ordering::SeqCst), 0);
        assert_eq!(recorder.delivered.load(Ordering::SeqCst), 0);
    }
}
