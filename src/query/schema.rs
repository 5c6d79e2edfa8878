// src/query/schema.rs
//! The subset of the content hub schema this site reads.
//!
//! Queries are checked against this contract when the build is configured,
//! so a typo in a field name fails before any network call.

use super::{Field, OrderField, QuerySpec, RootKind};
use crate::constants::HUB_MAX_PAGE_SIZE;
use std::collections::HashSet;

/// Shape of a field in the schema.
#[derive(Debug, Clone)]
pub enum FieldType {
    Scalar,
    Object {
        type_name: &'static str,
        fields: Vec<FieldSchema>,
    },
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub args: &'static [&'static str],
    pub ty: FieldType,
}

impl FieldSchema {
    fn scalar(name: &'static str) -> Self {
        Self {
            name,
            args: &[],
            ty: FieldType::Scalar,
        }
    }

    fn scalar_with_args(name: &'static str, args: &'static [&'static str]) -> Self {
        Self {
            name,
            args,
            ty: FieldType::Scalar,
        }
    }

    fn object(name: &'static str, type_name: &'static str, fields: Vec<FieldSchema>) -> Self {
        Self {
            name,
            args: &[],
            ty: FieldType::Object { type_name, fields },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Single,
    Collection,
}

/// A queryable root model.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    pub api_name: &'static str,
    pub kind: ModelKind,
    pub fields: Vec<FieldSchema>,
}

/// A named type that fragments can target.
#[derive(Debug, Clone)]
pub struct TypeSchema {
    pub name: &'static str,
    pub fields: Vec<FieldSchema>,
}

/// Schema contract the build validates queries against.
#[derive(Debug, Clone)]
pub struct HubSchema {
    pub models: Vec<ModelSchema>,
    pub types: Vec<TypeSchema>,
}

fn tag_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::scalar("tag"),
        FieldSchema::scalar("attributes"),
        FieldSchema::scalar("content"),
    ]
}

fn color_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::scalar("hex"),
        FieldSchema::scalar("red"),
        FieldSchema::scalar("green"),
        FieldSchema::scalar("blue"),
        FieldSchema::scalar("alpha"),
    ]
}

fn record_meta_fields() -> Vec<FieldSchema> {
    vec![
        FieldSchema::scalar("id"),
        FieldSchema::scalar("_firstPublishedAt"),
        FieldSchema::scalar("_publishedAt"),
        FieldSchema::scalar("_createdAt"),
        FieldSchema::scalar("_updatedAt"),
        FieldSchema::scalar("_status"),
        FieldSchema::object("_seoMetaTags", "Tag", tag_fields()),
    ]
}

impl HubSchema {
    /// Schema of the marketing site: the home page singleton and success stories.
    pub fn marketing_site() -> Self {
        let mut home_fields = record_meta_fields();
        home_fields.push(FieldSchema::scalar("title"));

        let mut story_fields = record_meta_fields();
        story_fields.extend([
            FieldSchema::scalar_with_args("title", &["markdown"]),
            FieldSchema::scalar("slug"),
            FieldSchema::object("accentColor", "ColorField", color_fields()),
            FieldSchema::object("duotoneColor1", "ColorField", color_fields()),
            FieldSchema::object("duotoneColor2", "ColorField", color_fields()),
            FieldSchema::object(
                "logo",
                "FileField",
                vec![
                    FieldSchema::scalar("url"),
                    FieldSchema::scalar("alt"),
                    FieldSchema::scalar("width"),
                    FieldSchema::scalar("height"),
                ],
            ),
        ]);

        Self {
            models: vec![
                ModelSchema {
                    api_name: "homePage",
                    kind: ModelKind::Single,
                    fields: home_fields,
                },
                ModelSchema {
                    api_name: "allSuccessStories",
                    kind: ModelKind::Collection,
                    fields: story_fields,
                },
            ],
            types: vec![TypeSchema {
                name: "Tag",
                fields: tag_fields(),
            }],
        }
    }

    pub fn model(&self, api_name: &str) -> Option<&ModelSchema> {
        self.models.iter().find(|m| m.api_name == api_name)
    }

    fn type_named(&self, name: &str) -> Option<&TypeSchema> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// Validates `spec` against `schema`, returning the first violation found.
pub(super) fn validate(spec: &QuerySpec, schema: &HubSchema) -> Result<(), String> {
    if spec.roots().is_empty() {
        return Err("query selects no models".to_string());
    }

    let mut aliases = HashSet::new();
    for root in spec.roots() {
        if !aliases.insert(root.alias.as_str()) {
            return Err(format!("duplicate root alias '{}'", root.alias));
        }

        let model = schema
            .model(&root.model)
            .ok_or_else(|| format!("unknown model '{}'", root.model))?;

        match (&root.kind, model.kind) {
            (RootKind::Single, ModelKind::Single) => {}
            (RootKind::Collection { first, order_by }, ModelKind::Collection) => {
                if *first == 0 || *first > HUB_MAX_PAGE_SIZE {
                    return Err(format!(
                        "'{}' limit {} outside 1..={}",
                        root.alias, first, HUB_MAX_PAGE_SIZE
                    ));
                }
                if order_by.is_empty() {
                    return Err(format!("'{}' has no orderBy", root.alias));
                }
                let mut seen: HashSet<OrderField> = HashSet::new();
                for key in order_by {
                    if !seen.insert(key.field) {
                        return Err(format!(
                            "'{}' orders by {} twice",
                            root.alias,
                            key.field.api_name()
                        ));
                    }
                }
            }
            (RootKind::Single, ModelKind::Collection) => {
                return Err(format!(
                    "'{}' is a collection; a limit is required",
                    root.model
                ));
            }
            (RootKind::Collection { .. }, ModelKind::Single) => {
                return Err(format!(
                    "'{}' is a single record; it cannot be paginated",
                    root.model
                ));
            }
        }

        validate_fields(&root.fields, &model.fields, &root.model, spec, schema)?;
    }

    for fragment in spec.fragments() {
        let ty = schema.type_named(&fragment.on_type).ok_or_else(|| {
            format!(
                "fragment '{}' targets unknown type '{}'",
                fragment.name, fragment.on_type
            )
        })?;
        validate_fields(&fragment.fields, &ty.fields, ty.name, spec, schema)?;
    }

    Ok(())
}

fn validate_fields(
    fields: &[Field],
    available: &[FieldSchema],
    parent: &str,
    spec: &QuerySpec,
    schema: &HubSchema,
) -> Result<(), String> {
    let mut keys = HashSet::new();
    for field in fields {
        if let Some(key) = field.response_key() {
            if !keys.insert(key) {
                return Err(format!("'{}' selects '{}' twice", parent, key));
            }
        }

        match field {
            Field::Scalar { name, args, .. } => {
                let def = lookup(available, name, parent)?;
                if !matches!(def.ty, FieldType::Scalar) {
                    return Err(format!("'{}.{}' needs a sub-selection", parent, name));
                }
                for (arg, _) in args {
                    if !def.args.contains(&arg.as_str()) {
                        return Err(format!("'{}.{}' has no argument '{}'", parent, name, arg));
                    }
                }
            }
            Field::Object { name, fields, .. } => {
                let def = lookup(available, name, parent)?;
                match &def.ty {
                    FieldType::Object {
                        type_name,
                        fields: children,
                    } => {
                        validate_fields(fields, children, type_name, spec, schema)?;
                    }
                    FieldType::Scalar => {
                        return Err(format!("'{}.{}' is a scalar", parent, name));
                    }
                }
            }
            Field::Spread(fragment_name) => {
                let fragment = spec
                    .fragments()
                    .iter()
                    .find(|f| &f.name == fragment_name)
                    .ok_or_else(|| format!("unknown fragment '{}'", fragment_name))?;
                if fragment.on_type != parent {
                    return Err(format!(
                        "fragment '{}' on '{}' spread inside '{}'",
                        fragment.name, fragment.on_type, parent
                    ));
                }
            }
        }
    }
    Ok(())
}

fn lookup<'a>(
    available: &'a [FieldSchema],
    name: &str,
    parent: &str,
) -> Result<&'a FieldSchema, String> {
    available
        .iter()
        .find(|f| f.name == name)
        .ok_or_else(|| format!("'{}' has no field '{}'", parent, name))
}

#[cfg(test)]
mod tests {
    use super::super::{ArgValue, OrderBy, RootSelection};
    use super::*;

    fn stories(first: u32, fields: Vec<Field>) -> QuerySpec {
        QuerySpec::new(
            "t",
            vec![RootSelection::collection(
                "stories",
                "allSuccessStories",
                first,
                vec![OrderBy::desc(OrderField::FirstPublishedAt)],
                fields,
            )],
            vec![],
        )
    }

    #[test]
    fn test_accepts_known_fields() {
        let spec = stories(
            4,
            vec![
                Field::scalar("slug"),
                Field::scalar_with_args("title", vec![("markdown", ArgValue::Bool(true))]),
                Field::object("logo", vec![Field::scalar("url")]),
            ],
        );
        assert_eq!(validate(&spec, &HubSchema::marketing_site()), Ok(()));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let spec = stories(4, vec![Field::scalar("subtitle")]);
        let err = validate(&spec, &HubSchema::marketing_site()).unwrap_err();
        assert!(err.contains("no field 'subtitle'"), "{}", err);
    }

    #[test]
    fn test_rejects_unknown_argument() {
        let spec = stories(
            4,
            vec![Field::scalar_with_args("slug", vec![("markdown", ArgValue::Bool(true))])],
        );
        assert!(validate(&spec, &HubSchema::marketing_site()).is_err());
    }

    #[test]
    fn test_rejects_limits_outside_hub_range() {
        let schema = HubSchema::marketing_site();
        assert!(validate(&stories(0, vec![Field::scalar("slug")]), &schema).is_err());
        assert!(validate(&stories(101, vec![Field::scalar("slug")]), &schema).is_err());
        assert!(validate(&stories(100, vec![Field::scalar("slug")]), &schema).is_ok());
    }

    #[test]
    fn test_rejects_object_without_selection() {
        let spec = stories(4, vec![Field::scalar("logo")]);
        assert!(validate(&spec, &HubSchema::marketing_site()).is_err());
    }

    #[test]
    fn test_rejects_collection_read_as_single() {
        let spec = QuerySpec::new(
            "t",
            vec![RootSelection::single(
                "stories",
                "allSuccessStories",
                vec![Field::scalar("slug")],
            )],
            vec![],
        );
        assert!(validate(&spec, &HubSchema::marketing_site()).is_err());
    }

    #[test]
    fn test_rejects_unknown_fragment() {
        let spec = QuerySpec::new(
            "t",
            vec![RootSelection::single(
                "page",
                "homePage",
                vec![Field::object("_seoMetaTags", vec![Field::spread("missing")])],
            )],
            vec![],
        );
        let err = validate(&spec, &HubSchema::marketing_site()).unwrap_err();
        assert_eq!(err, "unknown fragment 'missing'");
    }
}
