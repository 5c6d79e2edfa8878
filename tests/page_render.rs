// tests/page_render.rs
//! Projection, composition and delivery of a fetched homepage.

use hub2page::compose::compose;
use hub2page::document::{self, assemble};
use hub2page::seo::{project, render_head};
use hub2page::{
    build_page, deliver, homepage_query, AppError, ContentFetcher, ContentSnapshot,
    ContentSource, DeliveryTarget, FixtureHub, MetaKind, OutputPlan, OutputReport, PageArtifact,
    PageComposer, PageDelivery, PageId, PreviewGate, QuerySpec, Section, SectionSlot,
    PREVIEW_BANNER_TEXT,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::Arc;

const STATIC_SLOTS: [SectionSlot; 6] = [
    SectionSlot::Hero,
    SectionSlot::ProblemFlags,
    SectionSlot::Stats,
    SectionSlot::SolutionFlags,
    SectionSlot::Numbers,
    SectionSlot::PersonaPicker,
];

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

async fn fetch_fixture(name: &str, gate: PreviewGate) -> ContentSnapshot {
    let hub = FixtureHub::load(&fixture_path(name)).await.unwrap();
    ContentFetcher::new(Arc::new(hub))
        .fetch(&homepage_query(), gate)
        .await
        .unwrap()
}

fn page_id() -> PageId {
    PageId::new("index").unwrap()
}

#[test]
fn test_empty_hub_renders_static_sections_only() {
    let artifact = assemble(page_id(), ContentSnapshot::empty(), PreviewGate::published());

    assert!(artifact.head.is_empty());
    assert!(artifact.props.page.is_none());
    assert_eq!(artifact.tree.slots(), STATIC_SLOTS.to_vec());
    assert_eq!(artifact.tree.use_case_count(), 0);
    assert!(!artifact.tree.preview);
}

#[test]
fn test_absent_page_projects_no_tags() {
    assert!(project(None).is_empty());
    assert_eq!(render_head(&project(None)), "");
}

#[tokio::test]
async fn test_head_keeps_complete_tags_in_order() {
    let snapshot = fetch_fixture("homepage.json", PreviewGate::published()).await;
    let tags = project(snapshot.page());

    let kinds: Vec<MetaKind> = tags.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![MetaKind::Title, MetaKind::Meta, MetaKind::Meta, MetaKind::Link]
    );

    insta::assert_snapshot!(render_head(&tags).trim_end(), @r###"
    <title>DatoCMS - The Headless CMS for the Modern Web</title>
    <meta property="og:title" content="DatoCMS - The Headless CMS for the Modern Web"/>
    <meta name="description" content="Unified content &amp; API delivery"/>
    <link rel="canonical" href="https://www.datocms.com/"/>
    "###);
}

#[tokio::test]
async fn test_use_case_excerpts_follow_story_order() {
    let snapshot = fetch_fixture("homepage.json", PreviewGate::published()).await;
    let tree = compose(&snapshot, PreviewGate::published());

    let mut expected = STATIC_SLOTS.to_vec();
    expected.push(SectionSlot::UseCaseExcerpts);
    assert_eq!(tree.slots(), expected);

    let Some(Section::UseCaseExcerpts(section)) = tree.section(SectionSlot::UseCaseExcerpts)
    else {
        panic!("use-case excerpts missing");
    };
    let hrefs: Vec<&str> = section.cases.iter().map(|c| c.href.as_str()).collect();
    assert_eq!(
        hrefs,
        vec![
            "/customers/chillys",
            "/customers/matter-supply",
            "/customers/wonderland",
            "/customers/vmware",
        ]
    );
    assert_eq!(section.cases[0].accent.as_str(), "#ff7751");
    assert_eq!(
        section.cases[2].title_html,
        "<p><strong>Wonderland</strong> loads 6x faster</p>\n"
    );
}

#[tokio::test]
async fn test_composition_is_repeatable() {
    let snapshot = fetch_fixture("homepage.json", PreviewGate::published()).await;
    assert_eq!(
        compose(&snapshot, PreviewGate::published()),
        compose(&snapshot, PreviewGate::published())
    );
}

#[tokio::test]
async fn test_preview_only_changes_the_flag() {
    let published = fetch_fixture("homepage.json", PreviewGate::published()).await;
    let preview = fetch_fixture("homepage.json", PreviewGate::preview()).await;

    let published_tree = compose(&published, PreviewGate::published());
    let preview_tree = compose(&preview, PreviewGate::preview());
    assert!(preview_tree.preview);
    assert!(!published_tree.preview);
    assert_eq!(preview_tree.sections, published_tree.sections);
}

#[tokio::test]
async fn test_draft_only_hub_in_preview_shows_the_draft() {
    let snapshot = fetch_fixture("unpublished.json", PreviewGate::preview()).await;
    let artifact = assemble(page_id(), snapshot, PreviewGate::preview());

    assert_eq!(artifact.tree.use_case_count(), 1);
    assert_eq!(artifact.head.len(), 1);
    assert!(artifact.props.preview);
}

#[tokio::test]
async fn test_document_shell() {
    let snapshot = fetch_fixture("homepage.json", PreviewGate::published()).await;
    let artifact = assemble(page_id(), snapshot, PreviewGate::published());
    let html = document::render_document(&artifact).unwrap();
    let html = html.as_str();

    assert!(html.starts_with("<!DOCTYPE html>\n"));
    assert!(html.contains("<link rel=\"canonical\" href=\"https://www.datocms.com/\"/>\n</head>"));
    assert!(html.contains(r#"<div id="root" data-page="index"></div>"#));
    assert!(!html.contains(PREVIEW_BANNER_TEXT));
    assert_eq!(html.matches("</script>").count(), 1);

    let start = html.find(r#"id="__PAGE_DATA__">"#).unwrap() + r#"id="__PAGE_DATA__">"#.len();
    let end = html.rfind("</script>").unwrap();
    let embedded: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();
    assert_eq!(embedded["pageId"], "index");
    assert_eq!(embedded["props"]["successStories"][1]["slug"], "matter-supply");
    assert_eq!(embedded["tree"]["sections"][6]["kind"], "use_case_excerpts");
}

#[tokio::test]
async fn test_json_artifact_uses_render_layer_names() {
    let snapshot = fetch_fixture("homepage.json", PreviewGate::published()).await;
    let artifact = assemble(page_id(), snapshot, PreviewGate::published());
    let json: serde_json::Value = serde_json::from_str(&document::to_json(&artifact).unwrap()).unwrap();

    let story = &json["props"]["successStories"][0];
    assert_eq!(story["slug"], "chillys");
    assert_eq!(story["accentColor"], "#ff7751");
    assert_eq!(
        story["logoUrl"],
        "https://www.datocms-assets.com/205/chillys.svg"
    );
    assert_eq!(json["props"]["preview"], false);
    assert_eq!(json["head"][0]["kind"], "title");
}

// ---------------------------------------------------------------------------
// Whole pipeline
// ---------------------------------------------------------------------------

struct FixtureBuild {
    fixture: PathBuf,
    output: PathBuf,
}

#[async_trait::async_trait]
impl ContentSource for FixtureBuild {
    async fn fetch(&self, spec: &QuerySpec, gate: PreviewGate) -> Result<ContentSnapshot, AppError> {
        let hub = FixtureHub::load(&self.fixture).await?;
        ContentFetcher::new(Arc::new(hub)).fetch(spec, gate).await
    }
}

impl PageComposer for FixtureBuild {
    fn compose(&self, snapshot: ContentSnapshot, gate: PreviewGate) -> PageArtifact {
        assemble(page_id(), snapshot, gate)
    }
}

impl PageDelivery for FixtureBuild {
    fn deliver(&self, artifact: &PageArtifact) -> Result<OutputReport, AppError> {
        deliver(OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: self.output.clone(),
            content: document::render_document(artifact)?.into_string(),
        }))
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hub2page-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[tokio::test]
async fn test_build_page_writes_the_document() {
    let dir = scratch_dir("build");
    let build = FixtureBuild {
        fixture: fixture_path("homepage.json"),
        output: dir.join("site").join("index.page.html"),
    };

    let (artifact, report) = build_page(&build, &homepage_query(), PreviewGate::preview())
        .await
        .unwrap();

    assert!(report.is_success());
    assert_eq!(artifact.tree.use_case_count(), 4);
    let written = std::fs::read_to_string(&build.output).unwrap();
    assert!(written.contains(PREVIEW_BANNER_TEXT));
    assert!(written.contains("<title>DatoCMS - The Headless CMS for the Modern Web</title>"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_build_page_fails_before_writing() {
    let dir = scratch_dir("missing");
    let build = FixtureBuild {
        fixture: fixture_path("does-not-exist.json"),
        output: dir.join("index.page.html"),
    };

    let err = build_page(&build, &homepage_query(), PreviewGate::published())
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    assert!(!build.output.exists());
}
