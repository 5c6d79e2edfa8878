// src/query/homepage.rs
//! The fixed query behind the marketing homepage.

use super::{ArgValue, Field, FragmentDef, OrderBy, OrderField, QuerySpec, RootSelection};
use crate::constants::SUCCESS_STORIES_LIMIT;

pub const HOMEPAGE_QUERY_NAME: &str = "homepage";

/// Response key of the home page record.
pub const PAGE_ALIAS: &str = "page";

/// Response key of the success stories collection.
pub const SUCCESS_STORIES_ALIAS: &str = "successStories";

pub const SEO_FRAGMENT: &str = "seoMetaTagsFields";

/// Fragment selecting everything needed to render a document head tag.
pub fn seo_meta_tags_fragment() -> FragmentDef {
    FragmentDef {
        name: SEO_FRAGMENT.to_string(),
        on_type: "Tag".to_string(),
        fields: vec![
            Field::scalar("attributes"),
            Field::scalar("content"),
            Field::scalar("tag"),
        ],
    }
}

fn hex_color(name: &str) -> Field {
    Field::object(name, vec![Field::scalar("hex")])
}

/// The homepage query: SEO tags of the home page plus the four most
/// recently published success stories.
///
/// Stories are ordered by first publication, newest first; records first
/// published at the same instant fall back to creation order.
pub fn homepage_query() -> QuerySpec {
    QuerySpec::new(
        HOMEPAGE_QUERY_NAME,
        vec![
            RootSelection::single(
                PAGE_ALIAS,
                "homePage",
                vec![Field::object("_seoMetaTags", vec![Field::spread(SEO_FRAGMENT)]).aliased("seo")],
            ),
            RootSelection::collection(
                SUCCESS_STORIES_ALIAS,
                "allSuccessStories",
                SUCCESS_STORIES_LIMIT as u32,
                vec![
                    OrderBy::desc(OrderField::FirstPublishedAt),
                    OrderBy::asc(OrderField::CreatedAt),
                ],
                vec![
                    Field::scalar("id"),
                    Field::scalar("_firstPublishedAt"),
                    Field::scalar("_createdAt"),
                    hex_color("accentColor"),
                    hex_color("duotoneColor1"),
                    hex_color("duotoneColor2"),
                    Field::scalar_with_args("title", vec![("markdown", ArgValue::Bool(true))]),
                    Field::scalar("slug"),
                    Field::object("logo", vec![Field::scalar("url")]),
                ],
            ),
        ],
        vec![seo_meta_tags_fragment()],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::HubSchema;

    #[test]
    fn test_homepage_query_matches_schema() {
        homepage_query()
            .validate(&HubSchema::marketing_site())
            .expect("homepage query must satisfy the hub schema");
    }

    #[test]
    fn test_homepage_query_fixes_limit_and_order() {
        let spec = homepage_query();
        assert_eq!(spec.limit_of(SUCCESS_STORIES_ALIAS), Some(4));
        let order = spec.order_of(SUCCESS_STORIES_ALIAS).unwrap();
        assert_eq!(order[0], OrderBy::desc(OrderField::FirstPublishedAt));
        assert_eq!(order[1], OrderBy::asc(OrderField::CreatedAt));
    }

    #[test]
    fn test_homepage_query_text() {
        let text = homepage_query().to_graphql();
        assert!(text.starts_with("query homepage {\n  page: homePage {\n    seo: _seoMetaTags {\n      ...seoMetaTagsFields\n"));
        assert!(text.contains(
            "successStories: allSuccessStories(first: 4, orderBy: [_firstPublishedAt_DESC, _createdAt_ASC])"
        ));
        assert!(text.contains("    title(markdown: true)\n"));
        assert!(text.ends_with("fragment seoMetaTagsFields on Tag {\n  attributes\n  content\n  tag\n}\n"));
    }
}
