// src/api/parser.rs
//! Decoding of hub responses.
//!
//! Every response goes through [`parse_api_response`], which separates HTTP
//! failures, schema rejections and undecodable bodies before any domain
//! conversion runs.

use super::client::ApiResponse;
use super::responses::{GraphQlEnvelope, HomepageData, ToDomain};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{FetchFailure, HubErrorCode};
use crate::model::{ContentSnapshot, SuccessStory};
use crate::preview::PreviewGate;
use crate::query::homepage::SUCCESS_STORIES_ALIAS;
use crate::query::QuerySpec;
use reqwest::StatusCode;
use serde_json::Value;

/// Parse a GraphQL response, returning its `data` member.
///
/// A non-2xx status is a service failure; an `errors` entry is a schema
/// rejection even when partial `data` came with it.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, FetchFailure>
where
    T: serde::de::DeserializeOwned,
{
    if !result.status.is_success() {
        return Err(parse_error_response(&result.data, result.status, &result.url));
    }

    let envelope: GraphQlEnvelope<T> = serde_json::from_str(&result.data).map_err(|e| {
        log::error!(
            "Failed to parse response from {}: {} (body: {})",
            result.url,
            e,
            body_preview(&result.data)
        );
        FetchFailure::Malformed(e.to_string())
    })?;

    if !envelope.errors.is_empty() {
        return Err(FetchFailure::QueryRejected {
            messages: envelope.errors.into_iter().map(|e| e.message).collect(),
        });
    }

    envelope
        .data
        .ok_or_else(|| FetchFailure::Malformed("response carries neither data nor errors".to_string()))
}

/// Map an error body to a typed service failure.
///
/// GraphQL errors carry their code under `extensions`; the hub's REST-style
/// errors carry it under `data[0].attributes`. Without either, the HTTP
/// status decides.
fn parse_error_response(body: &str, status: StatusCode, url: &str) -> FetchFailure {
    let json: Option<Value> = serde_json::from_str(body).ok();

    let code = json.as_ref().and_then(|v| {
        v.pointer("/errors/0/extensions/code")
            .or_else(|| v.pointer("/data/0/attributes/code"))
            .and_then(Value::as_str)
    });
    let message = json
        .as_ref()
        .and_then(|v| v.pointer("/errors/0/message").and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {} from {}", status, url));

    let code = match code {
        Some(code) => HubErrorCode::from_api_response(code),
        None => HubErrorCode::from_http_status(status.as_u16()),
    };

    log::warn!("Hub rejected request ({}): {}", code, body_preview(body));

    FetchFailure::Service {
        code,
        status: status.as_u16(),
        message,
    }
}

fn body_preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

/// Parse the homepage response into a snapshot that honors `spec`.
///
/// Outside preview every story must have been published at least once; the
/// hub returning a draft there is a broken contract, not content to show.
pub fn parse_homepage_response(
    result: ApiResponse<String>,
    spec: &QuerySpec,
    gate: PreviewGate,
) -> Result<ContentSnapshot, FetchFailure> {
    let data: HomepageData = parse_api_response(result)?;

    let stories = data
        .success_stories
        .into_iter()
        .map(ToDomain::to_domain)
        .collect::<Result<Vec<SuccessStory>, _>>()?;

    if !gate.is_preview() {
        if let Some(draft) = stories.iter().find(|s| s.is_draft_only()) {
            return Err(FetchFailure::Malformed(format!(
                "unpublished story '{}' returned outside preview",
                draft.slug
            )));
        }
    }

    let limit = spec
        .limit_of(SUCCESS_STORIES_ALIAS)
        .map(|l| l as usize)
        .unwrap_or(0);

    Ok(ContentSnapshot::assemble(data.page, stories, limit)?)
}
