// src/api/fixture.rs
//! An offline content hub backed by a JSON dump of records.
//!
//! The dump maps model names to records: a single model (`homePage`) holds
//! one object, a collection (`allSuccessStories`) an array. Records may carry
//! `_status` (`published`, `draft` or `updated`); only `draft` records are
//! hidden from published builds. Markdown fields are stored as authored and
//! rendered when the query asks for `markdown: true`, like the live hub does.

use super::client::ApiResponse;
use super::responses::{GraphQlEnvelope, GraphQlError};
use super::ContentHub;
use crate::error::{AppError, FetchFailure};
use crate::model::RichText;
use crate::preview::PreviewGate;
use crate::query::{
    ArgValue, Direction, Field, HubSchema, OrderBy, QuerySpec, RootKind, RootSelection,
};
use chrono::{DateTime, FixedOffset};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::path::Path;

const STATUS_FIELD: &str = "_status";
const DRAFT_STATUS: &str = "draft";

/// Offline hub answering queries from an in-memory record dump.
pub struct FixtureHub {
    records: Map<String, Value>,
    schema: HubSchema,
    source: String,
}

impl FixtureHub {
    /// Loads a dump from disk.
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::FixtureLoad {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        let value: Value = serde_json::from_str(&text).map_err(|e| AppError::FixtureLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::info!("Loaded content fixture from {}", path.display());
        Self::from_json(value, &path.display().to_string())
    }

    /// Builds a hub from an already parsed dump.
    pub fn from_json(value: Value, source: &str) -> Result<Self, AppError> {
        match value {
            Value::Object(records) => Ok(Self {
                records,
                schema: HubSchema::marketing_site(),
                source: source.to_string(),
            }),
            other => Err(AppError::FixtureLoad {
                path: source.to_string(),
                message: format!("expected an object of models, found {}", type_name(&other)),
            }),
        }
    }

    /// Evaluates `query` the way the hub would, producing a GraphQL envelope.
    fn evaluate(&self, query: &QuerySpec, gate: PreviewGate) -> GraphQlEnvelope<Value> {
        // The live hub rejects anything outside its schema before running
        if let Err(AppError::InvalidQuery { reason, .. }) = query.validate(&self.schema) {
            return GraphQlEnvelope {
                data: None,
                errors: vec![GraphQlError::new(reason)],
            };
        }

        let mut data = Map::new();
        let mut errors = Vec::new();
        for root in query.roots() {
            match self.evaluate_root(query, root, gate) {
                Ok(value) => {
                    data.insert(root.alias.clone(), value);
                }
                Err(message) => errors.push(GraphQlError::new(message)),
            }
        }

        GraphQlEnvelope {
            data: Some(Value::Object(data)),
            errors,
        }
    }

    fn evaluate_root(
        &self,
        query: &QuerySpec,
        root: &RootSelection,
        gate: PreviewGate,
    ) -> Result<Value, String> {
        let stored = self.records.get(&root.model).unwrap_or(&Value::Null);

        match &root.kind {
            RootKind::Single => match stored {
                Value::Object(record) if is_visible(record, gate) => {
                    project(query, record, &root.fields)
                }
                _ => Ok(Value::Null),
            },
            RootKind::Collection { first, order_by } => {
                let mut visible: Vec<&Map<String, Value>> = match stored {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_object)
                        .filter(|record| is_visible(record, gate))
                        .collect(),
                    Value::Null => Vec::new(),
                    other => {
                        return Err(format!(
                            "fixture model '{}' must be an array, found {}",
                            root.model,
                            type_name(other)
                        ))
                    }
                };

                visible.sort_by(|a, b| compare_records(a, b, order_by));
                visible
                    .into_iter()
                    .take(*first as usize)
                    .map(|record| project(query, record, &root.fields))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
        }
    }
}

#[async_trait::async_trait]
impl ContentHub for FixtureHub {
    async fn execute(
        &self,
        query: &QuerySpec,
        gate: PreviewGate,
    ) -> Result<ApiResponse<String>, FetchFailure> {
        let envelope = self.evaluate(query, gate);
        Ok(ApiResponse {
            data: serde_json::to_string(&envelope)?,
            status: StatusCode::OK,
            url: format!("fixture://{}", self.source),
        })
    }

    fn describe(&self) -> String {
        format!("fixture {}", self.source)
    }
}

fn is_visible(record: &Map<String, Value>, gate: PreviewGate) -> bool {
    gate.is_preview()
        || record.get(STATUS_FIELD).and_then(Value::as_str) != Some(DRAFT_STATUS)
}

fn project(
    query: &QuerySpec,
    record: &Map<String, Value>,
    fields: &[Field],
) -> Result<Value, String> {
    let mut out = Map::new();
    project_into(query, record, fields, &mut out)?;
    Ok(Value::Object(out))
}

fn project_into(
    query: &QuerySpec,
    record: &Map<String, Value>,
    fields: &[Field],
    out: &mut Map<String, Value>,
) -> Result<(), String> {
    for field in fields {
        match field {
            Field::Scalar { name, args, .. } => {
                let value = record.get(name).cloned().unwrap_or(Value::Null);
                let key = field.response_key().unwrap_or(name).to_string();
                out.insert(key, apply_args(value, args));
            }
            Field::Object { name, fields, .. } => {
                let key = field.response_key().unwrap_or(name).to_string();
                let value = match record.get(name) {
                    Some(Value::Object(nested)) => project(query, nested, fields)?,
                    Some(Value::Array(items)) => Value::Array(
                        items
                            .iter()
                            .filter_map(Value::as_object)
                            .map(|nested| project(query, nested, fields))
                            .collect::<Result<Vec<Value>, String>>()?,
                    ),
                    _ => Value::Null,
                };
                out.insert(key, value);
            }
            Field::Spread(fragment) => {
                let definition = query
                    .fragments()
                    .iter()
                    .find(|f| &f.name == fragment)
                    .ok_or_else(|| format!("Unknown fragment '{}'", fragment))?;
                project_into(query, record, &definition.fields, out)?;
            }
        }
    }
    Ok(())
}

fn apply_args(value: Value, args: &[(String, ArgValue)]) -> Value {
    let markdown = args
        .iter()
        .any(|(name, arg)| name == "markdown" && *arg == ArgValue::Bool(true));
    match value {
        Value::String(text) if markdown => {
            Value::String(RichText::from_markdown(&text).as_html().to_string())
        }
        other => other,
    }
}

/// Orders records by the query's `orderBy` keys; missing values sort last.
fn compare_records(
    a: &Map<String, Value>,
    b: &Map<String, Value>,
    order_by: &[OrderBy],
) -> Ordering {
    for key in order_by {
        let name = key.field.api_name();
        let ordering = match (non_null(a.get(name)), non_null(b.get(name))) {
            (Some(x), Some(y)) => {
                let natural = compare_values(x, y);
                match key.direction {
                    Direction::Asc => natural,
                    Direction::Desc => natural.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(x), Value::String(y)) => match (parse_instant(x), parse_instant(y)) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x.cmp(y),
        },
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

fn parse_instant(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).ok()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::homepage::homepage_query;
    use crate::query::{OrderField, RootSelection};
    use serde_json::json;

    fn hub() -> FixtureHub {
        FixtureHub::from_json(
            json!({
                "homePage": {
                    "_seoMetaTags": [
                        { "tag": "title", "attributes": null, "content": "Home" }
                    ]
                },
                "allSuccessStories": [
                    {
                        "id": "1", "_status": "published", "slug": "older",
                        "_firstPublishedAt": "2020-01-01T00:00:00Z",
                        "_createdAt": "2019-01-01T00:00:00Z",
                        "title": "Older **story**"
                    },
                    {
                        "id": "2", "_status": "draft", "slug": "draft",
                        "_firstPublishedAt": null,
                        "_createdAt": "2022-01-01T00:00:00Z",
                        "title": "Draft"
                    },
                    {
                        "id": "3", "_status": "updated", "slug": "newer",
                        "_firstPublishedAt": "2021-01-01T01:00:00+01:00",
                        "_createdAt": "2019-06-01T00:00:00Z",
                        "title": "Newer"
                    }
                ]
            }),
            "inline",
        )
        .unwrap()
    }

    fn stories(envelope: &GraphQlEnvelope<Value>) -> Vec<String> {
        envelope.data.as_ref().unwrap()["successStories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["slug"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_published_build_hides_drafts() {
        let envelope = hub().evaluate(&homepage_query(), PreviewGate::published());
        assert!(envelope.errors.is_empty());
        assert_eq!(stories(&envelope), vec!["newer", "older"]);
    }

    #[test]
    fn test_preview_build_shows_drafts_last() {
        let envelope = hub().evaluate(&homepage_query(), PreviewGate::preview());
        assert_eq!(stories(&envelope), vec!["newer", "older", "draft"]);
    }

    #[test]
    fn test_markdown_title_is_rendered() {
        let envelope = hub().evaluate(&homepage_query(), PreviewGate::published());
        let data = envelope.data.unwrap();
        assert_eq!(
            data["successStories"][1]["title"],
            json!("<p>Older <strong>story</strong></p>\n")
        );
        assert_eq!(data["page"]["seo"][0]["content"], json!("Home"));
    }

    #[test]
    fn test_unknown_field_is_rejected_like_the_hub() {
        let spec = QuerySpec::new(
            "broken",
            vec![RootSelection::collection(
                "items",
                "allSuccessStories",
                4,
                vec![OrderBy::desc(OrderField::FirstPublishedAt)],
                vec![Field::scalar("colour")],
            )],
            vec![],
        );
        let envelope = hub().evaluate(&spec, PreviewGate::published());
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors.len(), 1);
        assert!(envelope.errors[0].message.contains("colour"));
    }

    #[test]
    fn test_non_object_dump_is_refused() {
        assert!(matches!(
            FixtureHub::from_json(json!([1, 2]), "list.json"),
            Err(AppError::FixtureLoad { .. })
        ));
    }
}
