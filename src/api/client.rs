// src/api/client.rs
//! HTTP client for the content hub's GraphQL endpoint.
//!
//! A thin wrapper around reqwest: authentication, the draft-inclusion
//! header and the request timeout live here. Parsing lives in `parser`.

use super::ContentHub;
use crate::constants::INCLUDE_DRAFTS_HEADER;
use crate::error::{AppError, FetchFailure};
use crate::preview::PreviewGate;
use crate::query::QuerySpec;
use crate::types::{ApiToken, ValidatedUrl};
use reqwest::{header, Client, Response};
use std::time::Duration;

/// A thin wrapper around reqwest Client for content hub requests.
#[derive(Clone)]
pub struct HubHttpClient {
    client: Client,
    endpoint: ValidatedUrl,
}

impl HubHttpClient {
    /// Creates a new HTTP client authenticated with `token`.
    pub fn new(
        token: &ApiToken,
        endpoint: ValidatedUrl,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::MissingConfiguration(format!("HTTP client: {}", e)))?;
        Ok(Self { client, endpoint })
    }

    /// Creates the default headers for hub requests.
    fn create_headers(token: &ApiToken) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Posts a GraphQL document.
    ///
    /// Drafts are requested only when `gate` is in preview mode.
    pub async fn post_query(
        &self,
        query: &str,
        gate: PreviewGate,
    ) -> Result<Response, FetchFailure> {
        log::debug!("POST {} ({})", self.endpoint, gate);

        let mut request = self
            .client
            .post(self.endpoint.as_str())
            .json(&serde_json::json!({ "query": query }));
        if gate.is_preview() {
            request = request.header(INCLUDE_DRAFTS_HEADER, "true");
        }

        let response = request.send().await?;
        log::debug!("Hub responded with status {}", response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl ContentHub for HubHttpClient {
    async fn execute(
        &self,
        query: &QuerySpec,
        gate: PreviewGate,
    ) -> Result<ApiResponse<String>, FetchFailure> {
        let response = self.post_query(&query.to_graphql(), gate).await?;
        extract_response_text(response).await
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(
    response: Response,
) -> Result<ApiResponse<String>, FetchFailure> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_carry_bearer_token() {
        let token = ApiToken::new("faeb9172e232a75339242faafb9e56de").unwrap();
        let headers = HubHttpClient::create_headers(&token).unwrap();
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer faeb9172e232a75339242faafb9e56de"
        );
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "application/json");
        assert!(headers.get(INCLUDE_DRAFTS_HEADER).is_none());
    }
}
