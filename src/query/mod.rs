// src/query/mod.rs
//! Declarative description of the content a page needs.
//!
//! A `QuerySpec` is an immutable value: which models to read, which fields to
//! select, how collections are ordered and how many records they may return.
//! It renders to GraphQL text deterministically and is checked against a
//! [`HubSchema`] before any request is made, so the query shape is decoupled
//! from fetch execution.

pub mod homepage;
pub mod schema;

pub use schema::HubSchema;

use serde::Serialize;

/// Sort direction of an `orderBy` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn suffix(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Record metadata fields a collection can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OrderField {
    FirstPublishedAt,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

impl OrderField {
    pub fn api_name(self) -> &'static str {
        match self {
            OrderField::FirstPublishedAt => "_firstPublishedAt",
            OrderField::PublishedAt => "_publishedAt",
            OrderField::CreatedAt => "_createdAt",
            OrderField::UpdatedAt => "_updatedAt",
        }
    }
}

/// One `orderBy` key, e.g. `_firstPublishedAt_DESC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    pub field: OrderField,
    pub direction: Direction,
}

impl OrderBy {
    pub const fn desc(field: OrderField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }

    pub const fn asc(field: OrderField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    pub fn to_graphql(self) -> String {
        format!("{}_{}", self.field.api_name(), self.direction.suffix())
    }
}

/// Literal argument values that can appear on a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Enum(String),
}

impl ArgValue {
    fn to_graphql(&self) -> String {
        match self {
            ArgValue::Bool(b) => b.to_string(),
            ArgValue::Int(i) => i.to_string(),
            ArgValue::Enum(e) => e.clone(),
        }
    }
}

/// A selected field. Selections form a tree mirroring the response shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Field {
    Scalar {
        name: String,
        alias: Option<String>,
        args: Vec<(String, ArgValue)>,
    },
    Object {
        name: String,
        alias: Option<String>,
        fields: Vec<Field>,
    },
    Spread(String),
}

impl Field {
    pub fn scalar(name: &str) -> Self {
        Field::Scalar {
            name: name.to_string(),
            alias: None,
            args: Vec::new(),
        }
    }

    pub fn scalar_with_args(name: &str, args: Vec<(&str, ArgValue)>) -> Self {
        Field::Scalar {
            name: name.to_string(),
            alias: None,
            args: args
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    pub fn object(name: &str, fields: Vec<Field>) -> Self {
        Field::Object {
            name: name.to_string(),
            alias: None,
            fields,
        }
    }

    pub fn spread(fragment: &str) -> Self {
        Field::Spread(fragment.to_string())
    }

    /// Returns the same field answered under `alias`.
    pub fn aliased(self, new_alias: &str) -> Self {
        match self {
            Field::Scalar { name, args, .. } => Field::Scalar {
                name,
                alias: Some(new_alias.to_string()),
                args,
            },
            Field::Object { name, fields, .. } => Field::Object {
                name,
                alias: Some(new_alias.to_string()),
                fields,
            },
            spread @ Field::Spread(_) => spread,
        }
    }

    /// Key under which the field appears in the response.
    pub fn response_key(&self) -> Option<&str> {
        match self {
            Field::Scalar { name, alias, .. } | Field::Object { name, alias, .. } => {
                Some(alias.as_deref().unwrap_or(name))
            }
            Field::Spread(_) => None,
        }
    }

    fn write_graphql(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match self {
            Field::Scalar { name, alias, args } => {
                out.push_str(&indent);
                push_alias(out, alias.as_deref());
                out.push_str(name);
                if !args.is_empty() {
                    let rendered: Vec<String> = args
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, v.to_graphql()))
                        .collect();
                    out.push_str(&format!("({})", rendered.join(", ")));
                }
                out.push('\n');
            }
            Field::Object {
                name,
                alias,
                fields,
            } => {
                out.push_str(&indent);
                push_alias(out, alias.as_deref());
                out.push_str(name);
                out.push_str(" {\n");
                for field in fields {
                    field.write_graphql(out, depth + 1);
                }
                out.push_str(&indent);
                out.push_str("}\n");
            }
            Field::Spread(fragment) => {
                out.push_str(&format!("{}...{}\n", indent, fragment));
            }
        }
    }
}

fn push_alias(out: &mut String, alias: Option<&str>) {
    if let Some(alias) = alias {
        out.push_str(alias);
        out.push_str(": ");
    }
}

/// Whether a root reads a singleton model or a collection of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RootKind {
    Single,
    Collection { first: u32, order_by: Vec<OrderBy> },
}

/// A top-level model read, e.g. `successStories: allSuccessStories(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootSelection {
    pub alias: String,
    pub model: String,
    pub kind: RootKind,
    pub fields: Vec<Field>,
}

impl RootSelection {
    pub fn single(alias: &str, model: &str, fields: Vec<Field>) -> Self {
        Self {
            alias: alias.to_string(),
            model: model.to_string(),
            kind: RootKind::Single,
            fields,
        }
    }

    pub fn collection(
        alias: &str,
        model: &str,
        first: u32,
        order_by: Vec<OrderBy>,
        fields: Vec<Field>,
    ) -> Self {
        Self {
            alias: alias.to_string(),
            model: model.to_string(),
            kind: RootKind::Collection { first, order_by },
            fields,
        }
    }

    fn write_graphql(&self, out: &mut String) {
        out.push_str(&format!("  {}: {}", self.alias, self.model));
        if let RootKind::Collection { first, order_by } = &self.kind {
            let keys: Vec<String> = order_by.iter().map(|o| o.to_graphql()).collect();
            out.push_str(&format!("(first: {}, orderBy: [{}])", first, keys.join(", ")));
        }
        out.push_str(" {\n");
        for field in &self.fields {
            field.write_graphql(out, 2);
        }
        out.push_str("  }\n");
    }
}

/// A named fragment, e.g. `fragment seoMetaTagsFields on Tag { ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentDef {
    pub name: String,
    pub on_type: String,
    pub fields: Vec<Field>,
}

/// Immutable, declarative description of what content a page needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySpec {
    name: String,
    roots: Vec<RootSelection>,
    fragments: Vec<FragmentDef>,
}

impl QuerySpec {
    pub fn new(name: &str, roots: Vec<RootSelection>, fragments: Vec<FragmentDef>) -> Self {
        Self {
            name: name.to_string(),
            roots,
            fragments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roots(&self) -> &[RootSelection] {
        &self.roots
    }

    pub fn fragments(&self) -> &[FragmentDef] {
        &self.fragments
    }

    pub fn root(&self, alias: &str) -> Option<&RootSelection> {
        self.roots.iter().find(|r| r.alias == alias)
    }

    /// The `first:` limit of a collection root, if `alias` names one.
    pub fn limit_of(&self, alias: &str) -> Option<u32> {
        match self.root(alias).map(|r| &r.kind) {
            Some(RootKind::Collection { first, .. }) => Some(*first),
            _ => None,
        }
    }

    /// The ordering of a collection root, if `alias` names one.
    pub fn order_of(&self, alias: &str) -> Option<&[OrderBy]> {
        match self.root(alias).map(|r| &r.kind) {
            Some(RootKind::Collection { order_by, .. }) => Some(order_by),
            _ => None,
        }
    }

    /// Renders the GraphQL document sent to the hub.
    ///
    /// Rendering is deterministic: the same spec always yields the same text.
    pub fn to_graphql(&self) -> String {
        let mut out = format!("query {} {{\n", self.name);
        for root in &self.roots {
            root.write_graphql(&mut out);
        }
        out.push_str("}\n");
        for fragment in &self.fragments {
            out.push_str(&format!(
                "\nfragment {} on {} {{\n",
                fragment.name, fragment.on_type
            ));
            for field in &fragment.fields {
                field.write_graphql(&mut out, 1);
            }
            out.push_str("}\n");
        }
        out
    }

    /// Checks the spec against the hub's schema contract.
    pub fn validate(&self, schema: &HubSchema) -> Result<(), crate::error::AppError> {
        schema::validate(self, schema).map_err(|reason| crate::error::AppError::InvalidQuery {
            query: self.name.clone(),
            reason,
        })
    }
}
